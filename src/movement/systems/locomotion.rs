//! Movement domain: grounded detection, gravity, and player locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Dead, Invulnerable};
use crate::movement::{Facing, GameLayer, MovementState, MovementTuning, Player, PlayerInput};
use crate::sprites::AnimationController;

/// How far below the feet the ground probe reaches.
const GROUND_PROBE_DISTANCE: f32 = 4.0;

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &Collider, &mut MovementState)>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, collider, mut state) in &mut query {
        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 12.0,
        };

        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, half_height);
        let hit = spatial_query.cast_ray(
            ray_origin,
            Dir2::NEG_Y,
            GROUND_PROBE_DISTANCE,
            true,
            &ground_filter,
        );

        state.on_ground = hit.is_some();
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut LinearVelocity, &MovementState), Without<Dead>>,
) {
    let dt = time.delta_secs();

    for (mut velocity, state) in &mut query {
        if !state.on_ground || velocity.y > 0.0 {
            velocity.y -= tuning.gravity * dt;
        } else if velocity.y < 0.0 {
            velocity.y = 0.0;
        }
    }
}

pub(crate) fn player_move(
    input: Res<PlayerInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<
        (&mut LinearVelocity, &mut MovementState, &Invulnerable),
        (With<Player>, Without<Dead>),
    >,
) {
    for (mut velocity, mut state, invulnerable) in &mut query {
        // Horizontal control is suspended while the hurt window is open;
        // knockback carries the player instead.
        if !invulnerable.is_active() {
            if input.axis_x < 0.0 {
                velocity.x = -tuning.run_speed;
                state.facing = Facing::Left;
            } else if input.axis_x > 0.0 {
                velocity.x = tuning.run_speed;
                state.facing = Facing::Right;
            } else {
                velocity.x = 0.0;
            }

            if input.jump_held && state.on_ground {
                velocity.y = tuning.jump_velocity;
            }
        }
    }
}

/// Selects the player's animation each frame by fixed priority:
/// dead > hurt > ascending/descending > turning > running.
pub(crate) fn player_animation(
    tuning: Res<MovementTuning>,
    mut query: Query<
        (
            &LinearVelocity,
            &MovementState,
            &Invulnerable,
            &mut AnimationController,
            &mut Sprite,
            Option<&Dead>,
        ),
        With<Player>,
    >,
) {
    for (velocity, state, invulnerable, mut controller, mut sprite, dead) in &mut query {
        if dead.is_some() {
            controller.play("death");
        } else if invulnerable.is_active() {
            controller.play("hurt");
        } else if velocity.y > tuning.vertical_anim_threshold {
            controller.play("ascend");
        } else if velocity.y < -tuning.vertical_anim_threshold {
            controller.play("descend");
        } else if velocity.x == 0.0 {
            controller.play("turn");
        } else {
            controller.play("run");
        }

        sprite.flip_x = state.facing == Facing::Left;
    }
}

/// Dead entities stop where they are and hold still while the death
/// animation runs out.
pub(crate) fn hold_dead_still(mut query: Query<&mut LinearVelocity, With<Dead>>) {
    for mut velocity in &mut query {
        velocity.x = 0.0;
        velocity.y = 0.0;
    }
}
