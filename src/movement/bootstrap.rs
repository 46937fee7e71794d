//! Movement domain: player spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Combatant, Health, Invulnerable, Team};
use crate::core::PlayerCarryover;
use crate::doors::KeyRing;
use crate::movement::{GameLayer, MovementState, Player};
use crate::sprites::{AnimationClip, AnimationController, AnimationSet, SpriteSheets};
use crate::weapons::WeaponInventory;

const PLAYER_SHEET: &str = "guy";
const PLAYER_SIZE: Vec2 = Vec2::new(20.0, 24.0);
const PLAYER_FRAME_RATE: f32 = 20.0;

/// The player's animation frame layout on its sheet: nine turn frames,
/// thirteen run frames, one frame each for falling and rising, then the
/// hurt/death strip.
fn player_animation_set() -> AnimationSet {
    AnimationSet::new()
        .with(
            "turn",
            AnimationClip::range(0, 8)
                .with_frame_rate(PLAYER_FRAME_RATE / 4.0)
                .with_yoyo(),
        )
        .with(
            "run",
            AnimationClip::range(9, 21).with_frame_rate(PLAYER_FRAME_RATE),
        )
        .with("descend", AnimationClip::still(22))
        .with("ascend", AnimationClip::still(23))
        .with(
            "hurt",
            AnimationClip::once(23, 27).with_frame_rate(PLAYER_FRAME_RATE),
        )
        .with(
            "death",
            AnimationClip::once(23, 40).with_frame_rate(PLAYER_FRAME_RATE / 4.0),
        )
}

/// Spawn the player at a level's spawn point, applying carried-over stats.
/// The weapon inventory starts empty; the level spawner wires the fists in
/// the relation phase so the inventory invariant holds before the first
/// frame runs.
pub fn spawn_player(
    commands: &mut Commands,
    sheets: &SpriteSheets,
    carryover: &PlayerCarryover,
    position: Vec2,
) -> Entity {
    let mut controller = AnimationController::new(player_animation_set());
    controller.play("turn");

    commands
        .spawn((
            // Identity & movement
            (
                Player,
                Combatant,
                Team::Player,
                MovementState::default(),
                KeyRing::default(),
                WeaponInventory::default(),
            ),
            // Combat
            (
                Health::new(carryover.health, carryover.max_health),
                Invulnerable::default(),
            ),
            // Rendering
            (
                sheets.atlas_sprite(PLAYER_SHEET, 0, PLAYER_SIZE),
                Transform::from_xyz(position.x, position.y, 10.0),
                controller,
            ),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::Enemy, GameLayer::Sensor],
                ),
            ),
        ))
        .id()
}
