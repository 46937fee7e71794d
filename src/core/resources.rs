//! Core domain: shared resources for run configuration and level carryover.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run-wide settings fixed at startup.
#[derive(Resource, Debug)]
pub struct RunSettings {
    pub seed: u64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Seeded RNG driving all gameplay rolls (gnome decisions, knockback coin
/// flips), so a run replays identically for a given seed.
#[derive(Resource, Debug)]
pub struct GameRng(pub ChaCha8Rng);

impl GameRng {
    pub fn from_settings(settings: &RunSettings) -> Self {
        Self(ChaCha8Rng::seed_from_u64(settings.seed))
    }
}

/// The player stats that survive a door transition into the next level.
/// Position does not carry over; the player is re-seated at the new level's
/// spawn point.
#[derive(Resource, Debug, Clone)]
pub struct PlayerCarryover {
    pub health: i32,
    pub max_health: i32,
}

impl Default for PlayerCarryover {
    fn default() -> Self {
        Self {
            health: 100,
            max_health: 100,
        }
    }
}

impl PlayerCarryover {
    /// Reset for a fresh run.
    pub fn reset(&mut self) {
        self.health = self.max_health;
    }
}
