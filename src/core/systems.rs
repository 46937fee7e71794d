//! Core domain: camera setup and follow.

use bevy::prelude::*;

use crate::movement::Player;

/// Horizontal/vertical interpolation factors for the follow camera. Slow on
/// x so the camera drifts after the player, snappier on y for jumps.
const FOLLOW_LERP_X: f32 = 0.02;
const FOLLOW_LERP_Y: f32 = 0.25;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn camera_follow(
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };

    for mut camera_transform in &mut camera_query {
        let target = player_transform.translation;
        camera_transform.translation.x +=
            (target.x - camera_transform.translation.x) * FOLLOW_LERP_X;
        camera_transform.translation.y +=
            (target.y - camera_transform.translation.y) * FOLLOW_LERP_Y;
    }
}
