//! Doors domain: door state machine, locks, keys, and the player's key ring.

use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;

/// Seconds an open door waits before closing itself.
pub const DOOR_AUTO_CLOSE_SECONDS: f32 = 6.0;
/// Seconds a lock's unlock/lock animation takes; interactions are gated
/// while it runs.
pub const LOCK_TRANSITION_SECONDS: f32 = 1.0;
/// Default per-door debounce between state changes.
pub const DOOR_DEBOUNCE_SECONDS: f32 = 0.3;

/// The kinds of keys, matched against lock types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum KeyType {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    Open,
    #[default]
    Closed,
    Locked,
    Opening,
    Closing,
}

/// What an interact press did to a door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoorInteraction {
    /// Debounced, locked without the key, or mid-animation.
    Ignored,
    /// The lock accepted a key; the door is now closed and unlockable.
    Unlocked,
    /// The door began opening.
    Opening,
    /// The door was open: move to its destination level.
    Transition(String),
}

#[derive(Component, Debug)]
pub struct Door {
    pub state: DoorState,
    /// Level this door leads to.
    pub destination: String,
    /// Lock entity guarding this door, if any.
    pub lock: Option<Entity>,
    /// Debounce between state changes; interactions are ignored while it
    /// runs.
    debounce: Timer,
    /// Baseline debounce duration; unlocks stretch a single window to the
    /// lock's transition time.
    debounce_seconds: f32,
    /// Countdown to self-close while the door stands open.
    auto_close: Option<f32>,
}

impl Door {
    pub fn new(destination: impl Into<String>, state: DoorState, debounce_seconds: f32) -> Self {
        Self {
            state,
            destination: destination.into(),
            lock: None,
            debounce: Timer::from_seconds(debounce_seconds, TimerMode::Once),
            debounce_seconds,
            auto_close: None,
        }
    }

    /// True while the debounce window is open.
    pub fn is_changing(&self) -> bool {
        self.debounce.remaining_secs() > 0.0
    }

    fn arm_debounce(&mut self) {
        self.arm_debounce_for(self.debounce_seconds);
    }

    fn arm_debounce_for(&mut self, seconds: f32) {
        self.debounce.set_duration(Duration::from_secs_f32(seconds));
        self.debounce.reset();
    }

    /// Advance the debounce and the auto-close countdown. Returns true on
    /// the frame the open door decides to close itself.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.debounce.tick(delta);

        if self.state == DoorState::Open {
            if let Some(remaining) = self.auto_close.as_mut() {
                *remaining -= delta.as_secs_f32();
                if *remaining <= 0.0 {
                    self.begin_close();
                    return true;
                }
            }
        }
        false
    }

    /// Handle one interact press. `can_unlock` reflects the lock and the
    /// player's key ring; the caller performs the key consumption on
    /// `Unlocked` and the level change on `Transition`.
    pub fn interact(&mut self, can_unlock: bool) -> DoorInteraction {
        if self.is_changing() {
            return DoorInteraction::Ignored;
        }

        match self.state {
            DoorState::Locked if can_unlock => {
                self.state = DoorState::Closed;
                self.arm_debounce_for(LOCK_TRANSITION_SECONDS.max(self.debounce_seconds));
                DoorInteraction::Unlocked
            }
            DoorState::Locked => DoorInteraction::Ignored,
            DoorState::Closed => {
                self.state = DoorState::Opening;
                self.arm_debounce();
                DoorInteraction::Opening
            }
            DoorState::Open => DoorInteraction::Transition(self.destination.clone()),
            DoorState::Opening | DoorState::Closing => DoorInteraction::Ignored,
        }
    }

    /// The opening animation finished: the door stands open and the
    /// auto-close countdown starts.
    pub fn finish_opening(&mut self) {
        if self.state == DoorState::Opening {
            self.state = DoorState::Open;
            self.auto_close = Some(DOOR_AUTO_CLOSE_SECONDS);
        }
    }

    /// Start swinging shut (auto-close or an explicit close).
    pub fn begin_close(&mut self) {
        if self.state == DoorState::Open {
            self.state = DoorState::Closing;
            self.auto_close = None;
            self.arm_debounce();
        }
    }

    /// The closing animation finished.
    pub fn finish_closing(&mut self) {
        if self.state == DoorState::Closing {
            self.state = DoorState::Closed;
        }
    }

    /// Bolt the door. Only a closed door can take the locked state; the
    /// debounce is armed like any other transition.
    pub fn lock_door(&mut self) -> bool {
        if self.state == DoorState::Closed {
            self.state = DoorState::Locked;
            self.arm_debounce_for(LOCK_TRANSITION_SECONDS.max(self.debounce_seconds));
            return true;
        }
        false
    }
}

#[derive(Component, Debug)]
pub struct Lock {
    pub key_type: KeyType,
    pub locked: bool,
    /// The door this lock guards.
    pub door: Entity,
    /// Seconds the unlock/lock animation runs.
    pub transition_seconds: f32,
}

impl Lock {
    pub fn new(key_type: KeyType, door: Entity) -> Self {
        Self {
            key_type,
            locked: true,
            door,
            transition_seconds: LOCK_TRANSITION_SECONDS,
        }
    }

    /// Unlockable iff locked and the ring holds a matching key.
    pub fn can_unlock(&self, ring: &KeyRing) -> bool {
        self.locked && ring.has_key(self.key_type)
    }
}

#[derive(Component, Debug)]
pub struct Key {
    pub key_type: KeyType,
    /// Whoever holds the key; None while it sits in the world.
    pub carrier: Option<Entity>,
    /// Consumed keys are permanently inert.
    pub consumed: bool,
}

impl Key {
    pub fn free(key_type: KeyType) -> Self {
        Self {
            key_type,
            carrier: None,
            consumed: false,
        }
    }

    pub fn carried_by(key_type: KeyType, carrier: Entity) -> Self {
        Self {
            key_type,
            carrier: Some(carrier),
            consumed: false,
        }
    }

    /// Free-floating and still interactive.
    pub fn is_free(&self) -> bool {
        self.carrier.is_none() && !self.consumed
    }

    /// Permanently spend the key.
    pub fn consume(&mut self) {
        self.consumed = true;
        self.carrier = None;
    }
}

/// The player's keys, grouped by type. Only player systems write to it.
#[derive(Component, Debug, Default)]
pub struct KeyRing {
    keys: HashMap<KeyType, Vec<Entity>>,
}

impl KeyRing {
    pub fn has_key(&self, key_type: KeyType) -> bool {
        self.count(key_type) > 0
    }

    pub fn count(&self, key_type: KeyType) -> usize {
        self.keys.get(&key_type).map_or(0, |keys| keys.len())
    }

    pub fn add_key(&mut self, key_type: KeyType, key: Entity) {
        let keys = self.keys.entry(key_type).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    /// Remove and return one key of the given type.
    pub fn take_key(&mut self, key_type: KeyType) -> Option<Entity> {
        self.keys.get_mut(&key_type)?.pop()
    }
}
