//! Core domain: cross-cutting events.

use bevy::ecs::message::Message;

/// Fired when an open door is used: tear down the current level and bring up
/// the target, carrying the player's stats across.
#[derive(Debug)]
pub struct LevelTransitionRequested {
    pub to_level: String,
}

impl Message for LevelTransitionRequested {}
