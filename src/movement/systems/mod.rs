//! Movement domain: system implementations.

mod input;
mod locomotion;

pub(crate) use input::read_input;
pub(crate) use locomotion::{
    apply_gravity, detect_ground, hold_dead_still, player_animation, player_move,
};
