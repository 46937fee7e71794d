//! UI domain: in-run HUD elements and death flow.

mod death;
mod hud_health;
mod hud_keys;
mod hud_weapon;

pub use death::PlayerDeathState;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::death::{detect_player_death, handle_retry};
use crate::ui::hud_health::{spawn_healthbar_ui, update_healthbar};
use crate::ui::hud_keys::{spawn_key_ui, update_key_ui};
use crate::ui::hud_weapon::{spawn_weapon_ui, update_weapon_ui};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerDeathState>()
            .add_systems(Startup, (spawn_healthbar_ui, spawn_weapon_ui, spawn_key_ui))
            .add_systems(
                Update,
                (
                    update_healthbar,
                    update_weapon_ui,
                    update_key_ui,
                    detect_player_death,
                    handle_retry,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
