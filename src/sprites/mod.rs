//! Sprites module: per-entity animation sets and sheet loading.

pub mod animation;
pub mod sheets;


pub use animation::{
    AnimationClip, AnimationController, AnimationFinished, AnimationRepeat, AnimationSet,
    DEFAULT_FRAME_RATE,
};
pub use sheets::SpriteSheets;

use bevy::prelude::*;

use crate::sprites::animation::{advance_animations, sync_sprite_frames};
use crate::sprites::sheets::load_sprite_sheets;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteSheets>()
            .add_message::<AnimationFinished>()
            .add_systems(Startup, load_sprite_sheets)
            .add_systems(Update, (advance_animations, sync_sprite_frames).chain());
    }
}
