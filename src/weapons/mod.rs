//! Weapons domain: ammo models, firing, inventory, and projectiles.

mod components;
mod projectile;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    try_fire, try_reload, AmmoModel, FireControl, FireOutcome, Weapon, WeaponInventory,
    WeaponKind, MELEE_SWING_SECONDS, WEAPON_SWITCH_LOCKOUT_SECONDS,
};
pub use projectile::{Projectile, ProjectilePool};
pub use spawn::{spawn_fists, spawn_pistol};

use bevy::prelude::*;

use crate::core::GameState;
use crate::weapons::projectile::{projectile_flight, projectile_hits};
use crate::weapons::systems::{
    cycle_weapons, drop_equipped_weapon, fire_equipped, melee_swings, pickup_weapons,
    reload_equipped, sync_weapon_sensors, tick_weapon_state, weapon_follow,
};

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                tick_weapon_state,
                fire_equipped,
                reload_equipped,
                cycle_weapons,
                drop_equipped_weapon,
                pickup_weapons,
                melee_swings,
                sync_weapon_sensors,
                weapon_follow,
                projectile_flight,
                projectile_hits,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
