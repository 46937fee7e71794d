//! Weapons domain: pooled projectiles.
//!
//! Projectiles are spawned once alongside their weapon and recycled:
//! `stop()` hides and freezes a round instead of despawning it, and the
//! next fire reuses the first stopped round in the pool.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{DamageEvent, Dead, Gnome};
use crate::movement::Ground;

#[derive(Component, Debug)]
pub struct Projectile {
    /// The weapon this round belongs to (used for immunity checks).
    pub weapon: Entity,
    pub damage: i32,
    pub speed: f32,
    pub max_range: f32,
    pub gravity: f32,
    pub in_flight: bool,
    pub origin: Vec2,
}

impl Projectile {
    pub fn round(weapon: Entity) -> Self {
        Self {
            weapon,
            damage: 10,
            speed: 600.0,
            max_range: 300.0,
            gravity: 0.0,
            in_flight: false,
            origin: Vec2::ZERO,
        }
    }

    /// Euclidean distance from the launch origin.
    pub fn distance_traveled(&self, position: Vec2) -> f32 {
        self.origin.distance(position)
    }

    pub fn past_max_range(&self, position: Vec2) -> bool {
        self.distance_traveled(position) > self.max_range
    }

    /// Record a launch from `origin`.
    pub fn launch(&mut self, origin: Vec2) {
        self.origin = origin;
        self.in_flight = true;
    }

    /// Mark the round stopped. Idempotent: returns false when it already
    /// was, so stop side effects run once.
    pub fn stop(&mut self) -> bool {
        if !self.in_flight {
            return false;
        }
        self.in_flight = false;
        true
    }
}

/// The spawned rounds belonging to one weapon.
#[derive(Component, Debug, Default)]
pub struct ProjectilePool {
    pub rounds: Vec<Entity>,
}

/// Freeze, hide, and deactivate a stopped round.
fn settle_stopped_round(
    commands: &mut Commands,
    entity: Entity,
    velocity: &mut LinearVelocity,
    visibility: &mut Visibility,
) {
    velocity.x = 0.0;
    velocity.y = 0.0;
    *visibility = Visibility::Hidden;
    commands.entity(entity).insert(ColliderDisabled);
}

/// Flight: apply projectile gravity and stop anything past its range.
pub(crate) fn projectile_flight(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &mut Projectile,
        &Transform,
        &mut LinearVelocity,
        &mut Visibility,
    )>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, transform, mut velocity, mut visibility) in &mut query {
        if !projectile.in_flight {
            continue;
        }

        velocity.y -= projectile.gravity * dt;

        if projectile.past_max_range(transform.translation.truncate()) && projectile.stop() {
            settle_stopped_round(&mut commands, entity, &mut velocity, &mut visibility);
        }
    }
}

/// Contact: damage gnomes, stop on terrain. Either way the round stops
/// exactly once.
pub(crate) fn projectile_hits(
    mut commands: Commands,
    mut damage_events: MessageWriter<DamageEvent>,
    mut query: Query<(
        Entity,
        &mut Projectile,
        &CollidingEntities,
        &mut LinearVelocity,
        &mut Visibility,
    )>,
    gnome_query: Query<&Gnome, Without<Dead>>,
    ground_query: Query<(), With<Ground>>,
) {
    for (entity, mut projectile, contacts, mut velocity, mut visibility) in &mut query {
        if !projectile.in_flight {
            continue;
        }

        for &contact in contacts.iter() {
            if let Ok(gnome) = gnome_query.get(contact) {
                if gnome.is_immune_to(projectile.weapon) {
                    continue;
                }
                damage_events.write(DamageEvent {
                    source: projectile.weapon,
                    target: contact,
                    amount: projectile.damage,
                    knockback: Vec2::ZERO,
                });
                if projectile.stop() {
                    settle_stopped_round(&mut commands, entity, &mut velocity, &mut visibility);
                }
                break;
            }

            if ground_query.get(contact).is_ok() {
                if projectile.stop() {
                    settle_stopped_round(&mut commands, entity, &mut velocity, &mut visibility);
                }
                break;
            }
        }
    }
}
