//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Player character
    Player,
    /// Gnomes and other enemies
    Enemy,
    /// Sensors (doors, keys, pickups, dropped weapons) - never block movement
    Sensor,
    /// Melee swing sensors (damage enemies)
    MeleeSwing,
    /// Launched projectiles
    Projectile,
}

#[derive(Component, Debug)]
pub struct Player;

/// Which way an entity is looking; drives sprite flip and launch vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Unit sign on the x axis.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub on_ground: bool,
    pub facing: Facing,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;
