//! Doors domain: the door/lock/key interaction triad.

mod components;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    Door, DoorInteraction, DoorState, Key, KeyRing, KeyType, Lock, DOOR_AUTO_CLOSE_SECONDS,
    DOOR_DEBOUNCE_SECONDS, LOCK_TRANSITION_SECONDS,
};

use bevy::prelude::*;

use crate::core::GameState;
use crate::doors::systems::{
    door_animation_finished, door_interactions, key_behavior, key_pickup, sync_locks, tick_doors,
};

pub struct DoorsPlugin;

impl Plugin for DoorsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                tick_doors,
                door_interactions,
                door_animation_finished,
                sync_locks,
                key_pickup,
                key_behavior,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
