//! Core domain: game states, run settings, carryover, and the camera.

mod events;
mod resources;
mod state;
mod systems;

pub use events::LevelTransitionRequested;
pub use resources::{GameRng, PlayerCarryover, RunSettings};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{camera_follow, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = RunSettings::default();
        let rng = GameRng::from_settings(&settings);
        info!("Run seed: {}", settings.seed);

        app.init_state::<GameState>()
            .insert_resource(settings)
            .insert_resource(rng)
            .init_resource::<PlayerCarryover>()
            .add_message::<LevelTransitionRequested>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                camera_follow.run_if(in_state(GameState::Playing)),
            );
    }
}
