//! Weapons domain: weapon and projectile-pool spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, MovementState};
use crate::sprites::{AnimationClip, AnimationController, AnimationSet, SpriteSheets};
use crate::weapons::components::{Weapon, FireControl};
use crate::weapons::projectile::{Projectile, ProjectilePool};

const FISTS_SHEET: &str = "fists";
const FISTS_SIZE: Vec2 = Vec2::new(24.0, 20.0);
const PISTOL_SHEET: &str = "pistol";
const PISTOL_SIZE: Vec2 = Vec2::new(24.0, 16.0);
const BULLET_SHEET: &str = "bullet";
const BULLET_SIZE: Vec2 = Vec2::new(8.0, 8.0);

/// One pooled round per clip slot; stopped rounds are reused.
const PISTOL_POOL_SIZE: usize = 10;

fn fists_animation_set() -> AnimationSet {
    AnimationSet::new()
        .with("still", AnimationClip::still(0))
        .with("idle", AnimationClip::still(0))
        .with("fire", AnimationClip::once(0, 5).with_frame_rate(24.0))
}

fn pistol_animation_set() -> AnimationSet {
    AnimationSet::new()
        .with("still", AnimationClip::still(0))
        .with("idle", AnimationClip::still(0))
        .with("fire", AnimationClip::once(0, 1).with_frame_rate(24.0))
}

fn weapon_visual(
    sheets: &SpriteSheets,
    sheet: &str,
    size: Vec2,
    set: AnimationSet,
    position: Vec2,
) -> (Sprite, Transform, AnimationController) {
    let mut controller = AnimationController::new(set);
    controller.play("still");
    (
        sheets.atlas_sprite(sheet, 0, size),
        Transform::from_xyz(position.x, position.y, 9.0),
        controller,
    )
}

fn weapon_physics(size: Vec2) -> impl Bundle {
    (
        RigidBody::Kinematic,
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionEventsEnabled,
        CollidingEntities::default(),
        CollisionLayers::new(
            [GameLayer::Sensor, GameLayer::MeleeSwing],
            [GameLayer::Player, GameLayer::Enemy],
        ),
        LinearVelocity::default(),
        MovementState::default(),
        GravityScale(0.0),
    )
}

/// Spawn the player's permanent fists, already owned and equipped.
pub fn spawn_fists(commands: &mut Commands, sheets: &SpriteSheets, owner: Entity) -> Entity {
    let mut weapon = Weapon::fists();
    weapon.set_owner(owner);

    commands
        .spawn((
            weapon,
            FireControl::default(),
            weapon_visual(sheets, FISTS_SHEET, FISTS_SIZE, fists_animation_set(), Vec2::ZERO),
            weapon_physics(FISTS_SIZE),
            // The swing sensor wakes up when a fire begins.
            ColliderDisabled,
        ))
        .id()
}

/// Spawn a pistol and its pooled rounds. With an owner it lands in their
/// hands; without one it sits dropped in the world at `position`.
pub fn spawn_pistol(
    commands: &mut Commands,
    sheets: &SpriteSheets,
    owner: Option<Entity>,
    position: Vec2,
    clip_rounds: u32,
    reserve_rounds: u32,
) -> Entity {
    let mut weapon = Weapon::pistol(clip_rounds, reserve_rounds);
    match owner {
        Some(owner) => weapon.set_owner(owner),
        None => weapon.clear_owner(),
    }

    let weapon_entity = commands
        .spawn((
            weapon,
            FireControl::default(),
            weapon_visual(sheets, PISTOL_SHEET, PISTOL_SIZE, pistol_animation_set(), position),
            weapon_physics(PISTOL_SIZE),
        ))
        .id();

    let mut pool = ProjectilePool::default();
    for _ in 0..PISTOL_POOL_SIZE {
        let round = commands
            .spawn((
                Projectile::round(weapon_entity),
                sheets.atlas_sprite(BULLET_SHEET, 0, BULLET_SIZE),
                Transform::from_xyz(position.x, position.y, 8.0),
                Visibility::Hidden,
                RigidBody::Dynamic,
                GravityScale(0.0),
                LockedAxes::ROTATION_LOCKED,
                Collider::rectangle(BULLET_SIZE.x, BULLET_SIZE.y),
                Sensor,
                CollisionEventsEnabled,
                CollidingEntities::default(),
                CollisionLayers::new(
                    GameLayer::Projectile,
                    [GameLayer::Enemy, GameLayer::Ground],
                ),
                LinearVelocity::default(),
                ColliderDisabled,
            ))
            .id();
        pool.rounds.push(round);
    }

    commands.entity(weapon_entity).insert(pool);
    weapon_entity
}
