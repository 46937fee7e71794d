//! Powerups domain: health packs.

mod systems;

#[cfg(test)]
mod tests;

pub use systems::{spawn_health_pack, HealthPack};

use bevy::prelude::*;

use crate::core::GameState;
use crate::powerups::systems::{health_pack_behavior, health_pack_pickup};

pub struct PowerUpsPlugin;

impl Plugin for PowerUpsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (health_pack_pickup, health_pack_behavior)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
