//! Combat domain: gnome behavior and contact attacks.
//!
//! Gnomes have no pathfinding: when idle they roll one of four actions at
//! fixed quartiles, hold it for a random fraction of a second, and
//! occasionally hop. Being hit interrupts the loop with a knockback and a
//! timed hurt animation.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::{Dead, Invulnerable};
use crate::combat::events::DamageEvent;
use crate::core::GameRng;
use crate::movement::{MovementState, MovementTuning, Player};
use crate::sprites::AnimationController;

/// Seconds a gnome stays in its hurt sub-state after a hit lands.
pub const GNOME_HIT_RECOVERY_SECONDS: f32 = 0.25;

#[derive(Component, Debug)]
pub struct Gnome {
    pub contact_damage: i32,
    pub run_speed: f32,
    pub jump_impulse: f32,
    pub jump_probability: f32,
    /// Weapons this gnome shrugs off entirely.
    pub immunities: Vec<Entity>,
}

impl Default for Gnome {
    fn default() -> Self {
        Self {
            contact_damage: 5,
            run_speed: 50.0,
            jump_impulse: 100.0,
            jump_probability: 0.30,
            immunities: Vec::new(),
        }
    }
}

impl Gnome {
    pub fn is_immune_to(&self, weapon: Entity) -> bool {
        self.immunities.contains(&weapon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GnomeAction {
    #[default]
    TurnLeft,
    TurnRight,
    RunLeft,
    RunRight,
}

impl GnomeAction {
    /// Map one uniform draw to an action by fixed quartiles.
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.25 {
            GnomeAction::TurnLeft
        } else if roll < 0.50 {
            GnomeAction::TurnRight
        } else if roll < 0.75 {
            GnomeAction::RunLeft
        } else {
            GnomeAction::RunRight
        }
    }

    pub fn animation(&self) -> &'static str {
        match self {
            GnomeAction::TurnLeft => "turn_left",
            GnomeAction::TurnRight => "turn_right",
            GnomeAction::RunLeft => "run_left",
            GnomeAction::RunRight => "run_right",
        }
    }
}

#[derive(Component, Debug, Default)]
pub struct GnomeBehavior {
    pub action: GnomeAction,
    /// Seconds until the next decision roll.
    pub action_timer: f32,
    /// Hurt sub-state hold, armed when a hit lands.
    pub hurt_timer: f32,
}

pub(crate) fn gnome_behavior(
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    mut query: Query<
        (
            &Gnome,
            &mut GnomeBehavior,
            &mut LinearVelocity,
            &MovementState,
            &Invulnerable,
            &mut AnimationController,
        ),
        Without<Dead>,
    >,
) {
    let dt = time.delta_secs();

    for (gnome, mut behavior, mut velocity, state, invulnerable, mut controller) in &mut query {
        if behavior.action_timer > 0.0 {
            behavior.action_timer -= dt;
        }
        if behavior.hurt_timer > 0.0 {
            behavior.hurt_timer -= dt;
        }

        // A landed hit interrupts whatever the gnome was doing.
        if invulnerable.is_active() && behavior.hurt_timer <= 0.0 {
            behavior.hurt_timer = GNOME_HIT_RECOVERY_SECONDS;
            behavior.action_timer = 0.0;
        }

        if behavior.hurt_timer > 0.0 {
            if velocity.x >= 0.0 {
                controller.play("hurt_right");
            } else {
                controller.play("hurt_left");
            }
            continue;
        }

        if behavior.action_timer <= 0.0 {
            behavior.action = GnomeAction::from_roll(rng.0.random::<f32>());
            behavior.action_timer = rng.0.random_range(0.0..1.0);

            let jump_roll = rng.0.random::<f32>();
            if jump_roll <= gnome.jump_probability && state.on_ground {
                velocity.y = gnome.jump_impulse;
            }
        }

        match behavior.action {
            GnomeAction::RunLeft => velocity.x = -gnome.run_speed,
            GnomeAction::RunRight => velocity.x = gnome.run_speed,
            GnomeAction::TurnLeft | GnomeAction::TurnRight => velocity.x = 0.0,
        }
        controller.play(behavior.action.animation());
    }
}

/// Contact damage: a gnome touching the player hurts them and knocks them
/// back. The push direction depends on which side of the gnome the player
/// is on; landing on top gets a random left/right shove.
pub(crate) fn gnome_contact_attack(
    tuning: Res<MovementTuning>,
    mut rng: ResMut<GameRng>,
    mut damage_events: MessageWriter<DamageEvent>,
    gnome_query: Query<
        (Entity, &Gnome, &Transform, &Collider, &CollidingEntities),
        Without<Dead>,
    >,
    player_query: Query<&Transform, (With<Player>, Without<Gnome>)>,
) {
    let blowback = tuning.gravity / 2.0;

    for (gnome_entity, gnome, gnome_transform, collider, contacts) in &gnome_query {
        for &contact in contacts.iter() {
            let Ok(player_transform) = player_query.get(contact) else {
                continue;
            };

            let offset =
                player_transform.translation.truncate() - gnome_transform.translation.truncate();
            let half_height = match collider.shape_scaled().as_cuboid() {
                Some(c) => c.half_extents.y,
                None => 11.0,
            };

            let push_x = if offset.y > half_height * 0.8 {
                // Touched from above
                if rng.0.random::<f32>() > 0.5 {
                    blowback
                } else {
                    -blowback
                }
            } else if offset.x < 0.0 {
                -blowback
            } else {
                blowback
            };

            damage_events.write(DamageEvent {
                source: gnome_entity,
                target: contact,
                amount: gnome.contact_damage,
                knockback: Vec2::new(push_x, blowback),
            });
        }
    }
}
