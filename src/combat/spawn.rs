//! Combat domain: gnome spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{Combatant, Health, Invulnerable, Team};
use crate::combat::gnome::{Gnome, GnomeBehavior};
use crate::movement::{GameLayer, MovementState};
use crate::sprites::{AnimationClip, AnimationController, AnimationSet, SpriteSheets};

const GNOME_SHEET: &str = "gnome";
const GNOME_SIZE: Vec2 = Vec2::new(20.0, 22.0);
const GNOME_HEALTH: i32 = 30;
const GNOME_FRAME_RATE: f32 = 20.0;

/// The gnome sheet carries distinct left/right strips, so no sprite
/// flipping: each direction is its own clip.
fn gnome_animation_set() -> AnimationSet {
    AnimationSet::new()
        .with(
            "turn_left",
            AnimationClip::range(0, 5)
                .with_frame_rate(GNOME_FRAME_RATE / 4.0)
                .with_yoyo(),
        )
        .with(
            "turn_right",
            AnimationClip::range(8, 14)
                .with_frame_rate(GNOME_FRAME_RATE / 4.0)
                .with_yoyo(),
        )
        .with("hurt_left", AnimationClip::still(6))
        .with("hurt_right", AnimationClip::still(7))
        .with("run_left", AnimationClip::range(14, 15))
        .with("run_right", AnimationClip::range(16, 17))
        .with(
            "death",
            AnimationClip::once(18, 31).with_frame_rate(GNOME_FRAME_RATE / 4.0),
        )
}

/// Bundle for spawning a gnome.
#[derive(Bundle)]
pub struct GnomeBundle {
    pub gnome: Gnome,
    pub behavior: GnomeBehavior,
    pub combatant: Combatant,
    pub team: Team,
    pub health: Health,
    pub invulnerable: Invulnerable,
    pub movement: MovementState,
    pub controller: AnimationController,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub colliding: CollidingEntities,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
    pub friction: Friction,
}

impl GnomeBundle {
    pub fn new(position: Vec2, sheets: &SpriteSheets) -> Self {
        let mut controller = AnimationController::new(gnome_animation_set());
        controller.play("turn_left");

        Self {
            gnome: Gnome::default(),
            behavior: GnomeBehavior::default(),
            combatant: Combatant,
            team: Team::Enemy,
            health: Health::full(GNOME_HEALTH),
            invulnerable: Invulnerable::default(),
            movement: MovementState::default(),
            controller,
            sprite: sheets.atlas_sprite(GNOME_SHEET, 0, GNOME_SIZE),
            transform: Transform::from_xyz(position.x, position.y, 5.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(GNOME_SIZE.x, GNOME_SIZE.y),
            collision_events: CollisionEventsEnabled,
            colliding: CollidingEntities::default(),
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [
                    GameLayer::Ground,
                    GameLayer::Player,
                    GameLayer::MeleeSwing,
                    GameLayer::Projectile,
                ],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(0.0),
            friction: Friction::new(0.0),
        }
    }
}
