//! Combat domain: health, immunity windows, and death.

use bevy::prelude::*;

/// Seconds of immunity opened by every hit that lands.
pub const DAMAGE_IMMUNITY_SECONDS: f32 = 0.25;

/// Marks an entity as a combat participant
#[derive(Component, Debug)]
pub struct Combatant;

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(current: i32, max: i32) -> Self {
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Reduce health, flooring at zero. Returns the amount actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Restore health up to the maximum. Dead entities stay dead: healing a
    /// zeroed pool is a no-op. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.is_dead() {
            return 0;
        }
        let actual = amount.max(0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Damage-immunity window; while the timer runs, further hits are ignored.
#[derive(Component, Debug, Default)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn begin(&mut self) {
        self.timer = DAMAGE_IMMUNITY_SECONDS;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer -= dt;
        }
    }
}

/// Terminal marker. Inserted once when health reaches zero, never removed.
#[derive(Component, Debug)]
pub struct Dead;

/// Apply one hit through the immunity gate. A hit landing inside an open
/// window is a silent no-op. Returns true when damage was applied (and a
/// fresh window opened).
pub fn resolve_hit(health: &mut Health, invulnerable: &mut Invulnerable, amount: i32) -> bool {
    if invulnerable.is_active() {
        return false;
    }
    health.take_damage(amount);
    invulnerable.begin();
    true
}
