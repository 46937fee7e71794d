//! Combat domain: damage resolution and the death transition.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{resolve_hit, Dead, Health, Invulnerable};
use crate::combat::events::{DamageEvent, DeathEvent};
use crate::sprites::AnimationController;

pub(crate) fn tick_combat_timers(time: Res<Time>, mut query: Query<&mut Invulnerable>) {
    let dt = time.delta_secs();
    for mut invulnerable in &mut query {
        invulnerable.tick(dt);
    }
}

/// Resolve damage messages through the immunity gate. Knockback rides along
/// with the hit: a no-op hit moves nothing.
pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<
        (&mut Health, &mut Invulnerable, Option<&mut LinearVelocity>),
        Without<Dead>,
    >,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut invulnerable, velocity)) = query.get_mut(event.target) else {
            continue;
        };

        if !resolve_hit(&mut health, &mut invulnerable, event.amount) {
            continue;
        }

        if let Some(mut velocity) = velocity {
            velocity.x = event.knockback.x;
            if event.knockback.y != 0.0 {
                velocity.y = event.knockback.y;
            }
        }

        if health.is_dead() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}

/// The one-way death transition: mark the entity, shut its colliders off
/// forever, and start the death animation. The corpse keeps its entity and
/// holds the final frame once the clip runs out.
pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut query: Query<Option<&mut AnimationController>, Without<Dead>>,
) {
    for event in death_events.read() {
        let Ok(controller) = query.get_mut(event.entity) else {
            continue;
        };

        if let Some(mut controller) = controller {
            controller.play("death");
        }

        commands
            .entity(event.entity)
            .insert((Dead, ColliderDisabled));

        info!("Entity {:?} died", event.entity);
    }
}
