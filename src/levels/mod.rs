//! Levels domain: level data, spawning, and transitions.

mod data;
mod flow;
mod loader;
mod registry;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use data::{DoorDef, GnomeDef, GroundDef, KeyDef, LevelDef, PointDef};
pub use flow::{LevelFlow, TransitionCooldown};
pub use loader::{parse_levels, LevelLoadError};
pub use registry::LevelRegistry;
pub use spawn::LevelEntity;

use bevy::prelude::*;

use crate::core::GameState;
use crate::levels::registry::setup_level_registry;
use crate::levels::systems::{
    finish_boot, process_level_transitions, spawn_current_level, tick_transition_cooldown,
};

pub struct LevelsPlugin;

impl Plugin for LevelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<LevelFlow>()
            .init_resource::<TransitionCooldown>()
            .add_systems(Startup, setup_level_registry)
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(OnEnter(GameState::Playing), spawn_current_level)
            .add_systems(
                Update,
                (tick_transition_cooldown, process_level_transitions)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
