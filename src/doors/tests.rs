//! Doors domain: tests for the door state machine, locks, and key rings.

use std::time::Duration;

use bevy::prelude::World;

use super::components::{
    Door, DoorInteraction, DoorState, Key, KeyRing, KeyType, Lock, DOOR_AUTO_CLOSE_SECONDS,
    DOOR_DEBOUNCE_SECONDS, LOCK_TRANSITION_SECONDS,
};

fn settled_door(state: DoorState) -> Door {
    let mut door = Door::new("level_2", state, DOOR_DEBOUNCE_SECONDS);
    // Doors spawn with the debounce armed; settle it
    door.tick(Duration::from_secs_f32(DOOR_DEBOUNCE_SECONDS + 0.01));
    door
}

// -----------------------------------------------------------------------------
// Door state machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_fresh_door_starts_debounced() {
    let door = Door::new("level_2", DoorState::Closed, DOOR_DEBOUNCE_SECONDS);
    assert!(door.is_changing());
}

#[test]
fn test_closed_door_opens_on_interact() {
    let mut door = settled_door(DoorState::Closed);
    assert_eq!(door.interact(false), DoorInteraction::Opening);
    assert_eq!(door.state, DoorState::Opening);
}

#[test]
fn test_interact_twice_in_same_tick_transitions_once() {
    let mut door = settled_door(DoorState::Closed);

    assert_eq!(door.interact(false), DoorInteraction::Opening);
    // Second press in immediate succession lands inside the debounce
    assert_eq!(door.interact(false), DoorInteraction::Ignored);
    assert_eq!(door.state, DoorState::Opening);
}

#[test]
fn test_interaction_possible_again_after_debounce() {
    let mut door = settled_door(DoorState::Closed);

    door.interact(false);
    door.finish_opening();
    assert_eq!(door.state, DoorState::Open);

    // Still debounced right after the transition
    assert_eq!(door.interact(false), DoorInteraction::Ignored);

    door.tick(Duration::from_secs_f32(DOOR_DEBOUNCE_SECONDS + 0.01));
    assert_eq!(
        door.interact(false),
        DoorInteraction::Transition("level_2".to_string())
    );
}

#[test]
fn test_locked_door_without_key_is_a_no_op() {
    let mut door = settled_door(DoorState::Locked);
    assert_eq!(door.interact(false), DoorInteraction::Ignored);
    assert_eq!(door.state, DoorState::Locked);
}

#[test]
fn test_locked_door_with_key_unlocks_to_closed() {
    let mut door = settled_door(DoorState::Locked);
    assert_eq!(door.interact(true), DoorInteraction::Unlocked);
    assert_eq!(door.state, DoorState::Closed);
    // The unlock animation gates further interaction
    assert!(door.is_changing());
}

#[test]
fn test_unlock_debounce_spans_the_lock_transition() {
    let mut door = settled_door(DoorState::Locked);
    door.interact(true);

    door.tick(Duration::from_secs_f32(LOCK_TRANSITION_SECONDS - 0.05));
    assert!(door.is_changing());

    door.tick(Duration::from_secs_f32(0.1));
    assert!(!door.is_changing());
}

#[test]
fn test_open_door_auto_closes() {
    let mut door = settled_door(DoorState::Closed);
    door.interact(false);
    door.finish_opening();
    assert_eq!(door.state, DoorState::Open);

    // Not yet...
    let closed = door.tick(Duration::from_secs_f32(DOOR_AUTO_CLOSE_SECONDS - 0.1));
    assert!(!closed);
    assert_eq!(door.state, DoorState::Open);

    // ...now
    let closed = door.tick(Duration::from_secs_f32(0.2));
    assert!(closed);
    assert_eq!(door.state, DoorState::Closing);

    door.finish_closing();
    assert_eq!(door.state, DoorState::Closed);
}

#[test]
fn test_opening_door_ignores_interact() {
    let mut door = settled_door(DoorState::Closed);
    door.interact(false);
    door.tick(Duration::from_secs_f32(DOOR_DEBOUNCE_SECONDS + 0.01));

    // Debounce has passed but the door is still mid-animation
    assert_eq!(door.state, DoorState::Opening);
    assert_eq!(door.interact(false), DoorInteraction::Ignored);
}

#[test]
fn test_finish_opening_only_applies_while_opening() {
    let mut door = settled_door(DoorState::Closed);
    door.finish_opening();
    assert_eq!(door.state, DoorState::Closed);
}

#[test]
fn test_lock_door_bolts_a_closed_door() {
    let mut door = settled_door(DoorState::Closed);
    assert!(door.lock_door());
    assert_eq!(door.state, DoorState::Locked);
    assert!(door.is_changing());
}

#[test]
fn test_lock_door_refuses_an_open_door() {
    let mut door = settled_door(DoorState::Closed);
    door.interact(false);
    door.finish_opening();

    assert!(!door.lock_door());
    assert_eq!(door.state, DoorState::Open);
}

// -----------------------------------------------------------------------------
// Lock/Key round trip
// -----------------------------------------------------------------------------

#[test]
fn test_lock_key_round_trip() {
    let mut world = World::new();
    let door_entity = world.spawn_empty().id();
    let key_entity = world.spawn_empty().id();

    let lock = Lock::new(KeyType::Small, door_entity);
    let mut ring = KeyRing::default();
    let mut key = Key::free(KeyType::Small);

    // No keys of the type: cannot unlock
    assert!(!lock.can_unlock(&ring));

    // Pick up a small key
    key.carrier = Some(world.spawn_empty().id());
    ring.add_key(key.key_type, key_entity);
    assert!(lock.can_unlock(&ring));
    assert_eq!(ring.count(KeyType::Small), 1);

    // Unlock consumes exactly one matching key
    let spent = ring.take_key(KeyType::Small).expect("a key to spend");
    assert_eq!(spent, key_entity);
    key.consume();

    assert_eq!(ring.count(KeyType::Small), 0);
    assert!(key.consumed);
    assert!(!key.is_free());
    assert!(!ring.has_key(KeyType::Small));
}

#[test]
fn test_unlock_only_spends_matching_key_type() {
    let mut world = World::new();
    let door_entity = world.spawn_empty().id();
    let large_key = world.spawn_empty().id();

    let lock = Lock::new(KeyType::Small, door_entity);
    let mut ring = KeyRing::default();
    ring.add_key(KeyType::Large, large_key);

    assert!(!lock.can_unlock(&ring));
    assert!(ring.take_key(KeyType::Small).is_none());
    assert_eq!(ring.count(KeyType::Large), 1);
}

#[test]
fn test_unlocked_lock_cannot_unlock_again() {
    let mut world = World::new();
    let door_entity = world.spawn_empty().id();
    let key_entity = world.spawn_empty().id();

    let mut lock = Lock::new(KeyType::Medium, door_entity);
    let mut ring = KeyRing::default();
    ring.add_key(KeyType::Medium, key_entity);

    assert!(lock.can_unlock(&ring));
    lock.locked = false;
    assert!(!lock.can_unlock(&ring));
}

// -----------------------------------------------------------------------------
// Key tests
// -----------------------------------------------------------------------------

#[test]
fn test_key_free_and_carried_states() {
    let mut world = World::new();
    let gnome = world.spawn_empty().id();

    let free = Key::free(KeyType::Small);
    assert!(free.is_free());

    let carried = Key::carried_by(KeyType::Small, gnome);
    assert!(!carried.is_free());
    assert_eq!(carried.carrier, Some(gnome));
}

#[test]
fn test_consumed_key_is_permanently_inert() {
    let mut key = Key::free(KeyType::Large);
    key.consume();

    assert!(key.consumed);
    assert!(key.carrier.is_none());
    assert!(!key.is_free());
}

// -----------------------------------------------------------------------------
// KeyRing tests
// -----------------------------------------------------------------------------

#[test]
fn test_key_ring_counts_per_type() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let c = world.spawn_empty().id();

    let mut ring = KeyRing::default();
    ring.add_key(KeyType::Small, a);
    ring.add_key(KeyType::Small, b);
    ring.add_key(KeyType::Medium, c);

    assert_eq!(ring.count(KeyType::Small), 2);
    assert_eq!(ring.count(KeyType::Medium), 1);
    assert_eq!(ring.count(KeyType::Large), 0);
}

#[test]
fn test_key_ring_ignores_duplicate_adds() {
    let mut world = World::new();
    let a = world.spawn_empty().id();

    let mut ring = KeyRing::default();
    ring.add_key(KeyType::Small, a);
    ring.add_key(KeyType::Small, a);

    assert_eq!(ring.count(KeyType::Small), 1);
}
