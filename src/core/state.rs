//! Core domain: top-level game states.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Loading level data and sprite sheets.
    #[default]
    Boot,
    /// A level is live and the frame loop is running.
    Playing,
}
