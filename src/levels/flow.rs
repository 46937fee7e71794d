//! Levels domain: flow tracking and the transition cooldown.

use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct LevelFlow {
    /// The level the player is in (or about to enter).
    pub current: Option<String>,
    /// Ids of levels entered this run, in order.
    pub visited: Vec<String>,
}

/// Cooldown timer to prevent rapid/double transitions between levels
#[derive(Resource, Debug)]
pub struct TransitionCooldown {
    pub timer: Timer,
}

impl Default for TransitionCooldown {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.3, TimerMode::Once),
        }
    }
}

impl TransitionCooldown {
    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
    }

    pub fn can_transition(&self) -> bool {
        self.timer.remaining_secs() == 0.0
    }
}
