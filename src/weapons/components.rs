//! Weapons domain: ammo models, fire control, and the player's inventory.

use bevy::prelude::*;

/// Seconds the weapon-cycle key is ignored after a switch.
pub const WEAPON_SWITCH_LOCKOUT_SECONDS: f32 = 0.5;
/// Seconds a melee swing's hit sensor stays live after a fire.
pub const MELEE_SWING_SECONDS: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponKind {
    Melee,
    Projectile,
}

/// The three ammo representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmmoModel {
    /// Never depletes.
    Infinite,
    /// A flat consumable pool with no clip concept.
    FiniteCount(u32),
    /// A bounded loaded pool plus a reserve, for reload-capable weapons.
    ClipAndReserve {
        clip_capacity: u32,
        clip_rounds: u32,
        reserve_rounds: u32,
    },
}

impl AmmoModel {
    /// Is a round immediately available?
    pub fn has_round(&self) -> bool {
        match self {
            AmmoModel::Infinite => true,
            AmmoModel::FiniteCount(n) => *n > 0,
            AmmoModel::ClipAndReserve { clip_rounds, .. } => *clip_rounds > 0,
        }
    }

    /// Pop one round. Returns false when empty.
    pub fn consume_round(&mut self) -> bool {
        match self {
            AmmoModel::Infinite => true,
            AmmoModel::FiniteCount(n) => {
                if *n == 0 {
                    return false;
                }
                *n -= 1;
                true
            }
            AmmoModel::ClipAndReserve { clip_rounds, .. } => {
                if *clip_rounds == 0 {
                    return false;
                }
                *clip_rounds -= 1;
                true
            }
        }
    }

    /// True when the clip is dry but the reserve can refill it.
    pub fn wants_reload(&self) -> bool {
        match self {
            AmmoModel::ClipAndReserve {
                clip_rounds,
                reserve_rounds,
                ..
            } => *clip_rounds == 0 && *reserve_rounds > 0,
            _ => false,
        }
    }

    /// Would a reload move any rounds right now?
    pub fn can_reload(&self) -> bool {
        match self {
            AmmoModel::ClipAndReserve {
                clip_capacity,
                clip_rounds,
                reserve_rounds,
            } => *clip_rounds < *clip_capacity && *reserve_rounds > 0,
            _ => false,
        }
    }

    /// Move `min(reserve, capacity - clip)` rounds from reserve into the
    /// clip. Returns how many moved.
    pub fn reload(&mut self) -> u32 {
        match self {
            AmmoModel::ClipAndReserve {
                clip_capacity,
                clip_rounds,
                reserve_rounds,
            } => {
                let moved = (*clip_capacity - *clip_rounds).min(*reserve_rounds);
                *clip_rounds += moved;
                *reserve_rounds -= moved;
                moved
            }
            _ => 0,
        }
    }

    /// HUD text: "∞", "12", or "3/90".
    pub fn display(&self) -> String {
        match self {
            AmmoModel::Infinite => "∞".to_string(),
            AmmoModel::FiniteCount(n) => n.to_string(),
            AmmoModel::ClipAndReserve {
                clip_rounds,
                reserve_rounds,
                ..
            } => format!("{}/{}", clip_rounds, reserve_rounds),
        }
    }
}

#[derive(Component, Debug)]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    pub damage: i32,
    /// Rounds per second; the post-fire cooldown derives from this.
    pub rate_of_fire: f32,
    /// Horizontal shove applied to whatever a melee swing connects with.
    pub knockback: f32,
    pub can_drop: bool,
    /// None iff the weapon is dropped — the two stay in lockstep.
    pub owner: Option<Entity>,
    pub dropped: bool,
    pub ammo: AmmoModel,
    pub reload_seconds: f32,
}

impl Weapon {
    /// The always-available melee fallback. Cannot be dropped.
    pub fn fists() -> Self {
        Self {
            name: "fists".to_string(),
            kind: WeaponKind::Melee,
            damage: 10,
            rate_of_fire: 1.0,
            knockback: 300.0,
            can_drop: false,
            owner: None,
            dropped: false,
            ammo: AmmoModel::Infinite,
            reload_seconds: 0.0,
        }
    }

    pub fn pistol(clip_rounds: u32, reserve_rounds: u32) -> Self {
        Self {
            name: "pistol".to_string(),
            kind: WeaponKind::Projectile,
            damage: 10,
            rate_of_fire: 2.0,
            knockback: 0.0,
            can_drop: true,
            owner: None,
            dropped: false,
            ammo: AmmoModel::ClipAndReserve {
                clip_capacity: 10,
                clip_rounds,
                reserve_rounds,
            },
            reload_seconds: 1.0,
        }
    }

    /// Seconds of cooldown after each successful discrete fire.
    pub fn cooldown_seconds(&self) -> f32 {
        1.0 / self.rate_of_fire.max(f32::EPSILON)
    }

    pub fn set_owner(&mut self, owner: Entity) {
        self.owner = Some(owner);
        self.dropped = false;
    }

    pub fn clear_owner(&mut self) {
        self.owner = None;
        self.dropped = true;
    }
}

/// Per-weapon fire/reload timing state.
#[derive(Component, Debug, Default)]
pub struct FireControl {
    pub cooldown_timer: f32,
    pub swing_timer: f32,
    /// Targets already damaged by the current swing.
    pub swing_hits: Vec<Entity>,
    pub reloading: bool,
    pub reload_timer: f32,
}

impl FireControl {
    pub fn is_swinging(&self) -> bool {
        self.swing_timer > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }
        if self.swing_timer > 0.0 {
            self.swing_timer -= dt;
            if self.swing_timer <= 0.0 {
                self.swing_hits.clear();
            }
        }
    }

    /// Tick the reload; returns true on the frame the reload completes.
    pub fn tick_reload(&mut self, dt: f32) -> bool {
        if !self.reloading {
            return false;
        }
        self.reload_timer -= dt;
        if self.reload_timer <= 0.0 {
            self.reloading = false;
            return true;
        }
        false
    }
}

/// What came of pulling the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// A discrete fire happened; the cooldown is armed.
    Fired,
    /// Empty clip with reserve available: the fire turned into a reload.
    StartedReload,
    /// Cooldown, reload in progress, or nothing to shoot with.
    Blocked,
}

/// The shared fire gate for every weapon kind. Blocked outcomes are silent:
/// they are normal gameplay, not errors.
pub fn try_fire(weapon: &mut Weapon, control: &mut FireControl) -> FireOutcome {
    if control.cooldown_timer > 0.0 || control.reloading {
        return FireOutcome::Blocked;
    }

    if weapon.ammo.wants_reload() {
        return match try_reload(weapon, control) {
            true => FireOutcome::StartedReload,
            false => FireOutcome::Blocked,
        };
    }

    if !weapon.ammo.consume_round() {
        return FireOutcome::Blocked;
    }

    control.cooldown_timer = weapon.cooldown_seconds();
    if weapon.kind == WeaponKind::Melee {
        control.swing_timer = MELEE_SWING_SECONDS;
        control.swing_hits.clear();
    }
    FireOutcome::Fired
}

/// Begin a reload if one would do anything. No-ops (full clip, empty
/// reserve, wrong ammo model, already reloading) return false silently.
pub fn try_reload(weapon: &Weapon, control: &mut FireControl) -> bool {
    if control.reloading || !weapon.ammo.can_reload() {
        return false;
    }
    control.reloading = true;
    control.reload_timer = weapon.reload_seconds;
    true
}

/// The player's ordered weapon list. Slot zero is the permanent fists.
#[derive(Component, Debug, Default)]
pub struct WeaponInventory {
    weapons: Vec<Entity>,
    equipped: usize,
    pub switch_lockout: f32,
}

impl WeaponInventory {
    /// Add a weapon and equip it.
    pub fn add(&mut self, weapon: Entity) {
        if self.weapons.contains(&weapon) {
            return;
        }
        self.weapons.push(weapon);
        self.equipped = self.weapons.len() - 1;
    }

    pub fn equipped(&self) -> Option<Entity> {
        self.weapons.get(self.equipped).copied()
    }

    pub fn contains(&self, weapon: Entity) -> bool {
        self.weapons.contains(&weapon)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.weapons.iter().copied()
    }

    /// Advance the equipped index modulo inventory size and arm the switch
    /// lockout. Returns false (and does nothing) while the lockout runs.
    pub fn cycle(&mut self) -> bool {
        if self.switch_lockout > 0.0 || self.weapons.len() < 2 {
            return false;
        }
        self.equipped = (self.equipped + 1) % self.weapons.len();
        self.switch_lockout = WEAPON_SWITCH_LOCKOUT_SECONDS;
        true
    }

    /// Drop the equipped weapon: switch to the next one first, then remove.
    /// Slot zero (the fists) is never removable. Returns the removed entity.
    pub fn drop_equipped(&mut self) -> Option<Entity> {
        if self.equipped == 0 || self.weapons.len() < 2 {
            return None;
        }
        let index = self.equipped;
        let dropped = self.weapons[index];

        self.equipped = (index + 1) % self.weapons.len();
        self.weapons.remove(index);
        // Removal shifts everything after `index` left by one.
        if self.equipped > index {
            self.equipped -= 1;
        }
        self.switch_lockout = WEAPON_SWITCH_LOCKOUT_SECONDS;
        Some(dropped)
    }

    pub fn tick(&mut self, dt: f32) {
        if self.switch_lockout > 0.0 {
            self.switch_lockout -= dt;
        }
    }
}
