//! Movement domain: player locomotion and shared physics layers.

mod bootstrap;
mod components;
mod resources;
mod systems;

pub use bootstrap::spawn_player;
pub use components::{Facing, GameLayer, Ground, MovementState, Player};
pub use resources::{MovementTuning, PlayerInput};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::systems::{
    apply_gravity, detect_ground, hold_dead_still, player_animation, player_move, read_input,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<MovementTuning>()
            .add_systems(
                Update,
                (
                    read_input,
                    detect_ground,
                    player_move,
                    apply_gravity,
                    hold_dead_still,
                    player_animation,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
