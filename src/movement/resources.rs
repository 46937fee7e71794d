//! Movement domain: input and tuning resources.

use bevy::prelude::*;

/// One keyboard sample per frame; every gameplay system reads this instead
/// of polling the keyboard itself.
#[derive(Resource, Debug, Default)]
pub struct PlayerInput {
    /// -1, 0, or 1 from the left/right keys.
    pub axis_x: f32,
    pub jump_held: bool,
    pub down_held: bool,
    pub fire_held: bool,
    pub reload_pressed: bool,
    pub drop_pressed: bool,
    pub cycle_pressed: bool,
    pub interact_held: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub run_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    /// |vy| beyond this selects the ascend/descend animation states.
    pub vertical_anim_threshold: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            run_speed: 100.0,
            gravity: 300.0,
            jump_velocity: 300.0,
            vertical_anim_threshold: 10.0,
        }
    }
}
