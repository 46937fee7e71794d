//! Combat domain: health, damage, death, and the gnome enemy.

mod components;
mod events;
mod gnome;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    resolve_hit, Combatant, Dead, Health, Invulnerable, Team, DAMAGE_IMMUNITY_SECONDS,
};
pub use events::{DamageEvent, DeathEvent};
pub use gnome::{Gnome, GnomeAction, GnomeBehavior, GNOME_HIT_RECOVERY_SECONDS};
pub use spawn::GnomeBundle;

use bevy::prelude::*;

use crate::combat::gnome::{gnome_behavior, gnome_contact_attack};
use crate::combat::systems::{apply_damage, process_deaths, tick_combat_timers};
use crate::core::GameState;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(
                Update,
                (
                    tick_combat_timers,
                    gnome_contact_attack,
                    apply_damage,
                    process_deaths,
                    gnome_behavior,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
