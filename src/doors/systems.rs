//! Doors domain: interaction, animation, and key-carry systems.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{Dead, Health};
use crate::core::{LevelTransitionRequested, PlayerCarryover};
use crate::doors::components::{Door, DoorInteraction, DoorState, Key, KeyRing, Lock};
use crate::levels::TransitionCooldown;
use crate::movement::{Player, PlayerInput};
use crate::sprites::{AnimationController, AnimationFinished};

/// Upward pop a key gets when its carrier dies.
const KEY_DROP_IMPULSE: f32 = 30.0;

/// Tick door debounce and auto-close; start the closing animation when an
/// open door times out.
pub(crate) fn tick_doors(
    time: Res<Time>,
    mut doors: Query<(&mut Door, &mut AnimationController)>,
) {
    for (mut door, mut controller) in &mut doors {
        if door.tick(time.delta()) {
            controller.play_reverse("opening");
        }

        // Steady-state frames when no transition animation is running.
        match door.state {
            DoorState::Open => controller.play("open"),
            DoorState::Closed | DoorState::Locked => controller.play("closed"),
            DoorState::Opening | DoorState::Closing => {}
        }
    }
}

/// Handle interact presses on doors the player is overlapping.
pub(crate) fn door_interactions(
    mut commands: Commands,
    input: Res<PlayerInput>,
    cooldown: Res<TransitionCooldown>,
    mut carryover: ResMut<PlayerCarryover>,
    mut transitions: MessageWriter<LevelTransitionRequested>,
    mut player_query: Query<(Entity, &Health, &mut KeyRing), (With<Player>, Without<Dead>)>,
    mut doors: Query<(&mut Door, &CollidingEntities, &mut AnimationController)>,
    mut locks: Query<(&mut Lock, &mut AnimationController), Without<Door>>,
    mut keys: Query<(&mut Key, &mut Visibility), Without<Door>>,
) {
    if !input.interact_held {
        return;
    }

    let Ok((player_entity, health, mut ring)) = player_query.single_mut() else {
        return;
    };

    for (mut door, contacts, mut controller) in &mut doors {
        if !contacts.contains(&player_entity) {
            continue;
        }

        let can_unlock = door
            .lock
            .and_then(|lock| locks.get(lock).ok())
            .is_some_and(|(lock, _)| lock.can_unlock(&ring));

        match door.interact(can_unlock) {
            DoorInteraction::Ignored => {}
            DoorInteraction::Unlocked => {
                let Some(lock_entity) = door.lock else {
                    continue;
                };
                let Ok((mut lock, mut lock_controller)) = locks.get_mut(lock_entity) else {
                    continue;
                };

                // Exactly one matching key leaves the ring and is spent
                // for good.
                if let Some(key_entity) = ring.take_key(lock.key_type) {
                    if let Ok((mut key, mut key_visibility)) = keys.get_mut(key_entity) {
                        key.consume();
                        *key_visibility = Visibility::Hidden;
                        commands.entity(key_entity).insert(ColliderDisabled);
                    }
                }
                lock.locked = false;
                lock_controller.play("unlocking");
                info!("Unlocked {:?} lock", lock.key_type);
            }
            DoorInteraction::Opening => {
                controller.play("opening");
            }
            DoorInteraction::Transition(destination) => {
                if !cooldown.can_transition() {
                    continue;
                }
                carryover.health = health.current;
                carryover.max_health = health.max;
                info!("Door used: heading to '{}'", destination);
                transitions.write(LevelTransitionRequested {
                    to_level: destination,
                });
            }
        }
    }
}

/// Settle doors when their opening/closing animation completes.
pub(crate) fn door_animation_finished(
    mut finished: MessageReader<AnimationFinished>,
    mut doors: Query<(&mut Door, &mut AnimationController)>,
) {
    for message in finished.read() {
        let Ok((mut door, mut controller)) = doors.get_mut(message.entity) else {
            continue;
        };
        if message.state != "opening" {
            continue;
        }

        match door.state {
            DoorState::Opening => {
                door.finish_opening();
                controller.play("open");
            }
            DoorState::Closing => {
                door.finish_closing();
                controller.play("closed");
            }
            _ => {}
        }
    }
}

/// Locks ride their door and show their locked/unlocked face when no
/// transition animation is running.
pub(crate) fn sync_locks(
    doors: Query<&Transform, With<Door>>,
    mut locks: Query<(&Lock, &mut Transform, &mut AnimationController), Without<Door>>,
) {
    for (lock, mut transform, mut controller) in &mut locks {
        if let Ok(door_transform) = doors.get(lock.door) {
            transform.translation.x = door_transform.translation.x;
            transform.translation.y = door_transform.translation.y;
        }

        if controller.state() == Some("unlocking") && !controller.is_finished() {
            continue;
        }
        if lock.locked {
            controller.play("locked");
        } else {
            controller.play("unlocked");
        }
    }
}

/// Free keys spin in place, flipping direction at each loop boundary;
/// carried keys hide and ride their carrier; a dead carrier drops the key.
pub(crate) fn key_behavior(
    mut keys: Query<
        (
            &mut Key,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut Sprite,
            &mut AnimationController,
        ),
        Without<Dead>,
    >,
    carriers: Query<(&Transform, Has<Dead>), Without<Key>>,
) {
    for (mut key, mut transform, mut velocity, mut visibility, mut sprite, mut controller) in
        &mut keys
    {
        if key.consumed {
            *visibility = Visibility::Hidden;
            continue;
        }

        let Some(carrier) = key.carrier else {
            *visibility = Visibility::Visible;
            controller.play("spinning");
            if controller.just_looped() {
                sprite.flip_x = !sprite.flip_x;
            }
            continue;
        };

        match carriers.get(carrier) {
            Ok((_, true)) | Err(_) => {
                // Carrier died (or despawned): the key pops free where the
                // carrier stood, visible again.
                key.carrier = None;
                *visibility = Visibility::Visible;
                velocity.y = KEY_DROP_IMPULSE;
            }
            Ok((carrier_transform, false)) => {
                *visibility = Visibility::Hidden;
                controller.play("still");
                transform.translation.x = carrier_transform.translation.x;
                transform.translation.y = carrier_transform.translation.y;
                velocity.x = 0.0;
                velocity.y = 0.0;
            }
        }
    }
}

/// A free key overlapping the player joins the key ring.
pub(crate) fn key_pickup(
    mut player_query: Query<(Entity, &mut KeyRing), (With<Player>, Without<Dead>)>,
    mut keys: Query<(Entity, &mut Key, &CollidingEntities)>,
) {
    let Ok((player_entity, mut ring)) = player_query.single_mut() else {
        return;
    };

    for (key_entity, mut key, contacts) in &mut keys {
        if !key.is_free() || !contacts.contains(&player_entity) {
            continue;
        }
        key.carrier = Some(player_entity);
        ring.add_key(key.key_type, key_entity);
        info!("Picked up {:?} key", key.key_type);
    }
}
