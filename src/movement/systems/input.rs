//! Movement domain: keyboard sampling.

use bevy::prelude::*;

use crate::movement::PlayerInput;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    input.axis_x = x;
    input.jump_held = keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp);
    input.down_held = keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown);
    input.fire_held = keyboard.pressed(KeyCode::Space);
    input.reload_pressed = keyboard.just_pressed(KeyCode::KeyR);
    input.drop_pressed = keyboard.just_pressed(KeyCode::KeyQ);
    input.cycle_pressed = keyboard.just_pressed(KeyCode::KeyF);
    input.interact_held = keyboard.pressed(KeyCode::KeyE);
}
