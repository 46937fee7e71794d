//! Powerups domain: health pack components and systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Dead, Health};
use crate::movement::{GameLayer, MovementState, Player};
use crate::sprites::{AnimationClip, AnimationController, AnimationSet, SpriteSheets};

const HEALTH_PACK_SHEET: &str = "health_pack";
const HEALTH_PACK_SIZE: Vec2 = Vec2::new(16.0, 16.0);
/// Upward pop when a carrying gnome dies.
const DROP_IMPULSE: f32 = 30.0;

#[derive(Component, Debug)]
pub struct HealthPack {
    pub heal_amount: i32,
    /// A gnome carrying the pack; it drops on the carrier's death.
    pub carrier: Option<Entity>,
    pub used: bool,
}

impl HealthPack {
    pub fn new(heal_amount: i32) -> Self {
        Self {
            heal_amount,
            carrier: None,
            used: false,
        }
    }

    /// Apply the pack to a health pool. Only consumed when the pool is
    /// actually below max; at full health it stays on the ground.
    pub fn apply(&mut self, health: &mut Health) -> bool {
        if self.used || health.current >= health.max {
            return false;
        }
        health.heal(self.heal_amount);
        self.used = true;
        true
    }
}

pub fn spawn_health_pack(
    commands: &mut Commands,
    sheets: &SpriteSheets,
    position: Vec2,
    heal_amount: i32,
    carrier: Option<Entity>,
) -> Entity {
    let mut controller = AnimationController::new(
        AnimationSet::new().with("spinning", AnimationClip::range(0, 5).with_yoyo()),
    );
    controller.play("spinning");

    commands
        .spawn((
            HealthPack {
                carrier,
                ..HealthPack::new(heal_amount)
            },
            controller,
            sheets.atlas_sprite(HEALTH_PACK_SHEET, 0, HEALTH_PACK_SIZE),
            Transform::from_xyz(position.x, position.y, 6.0),
            RigidBody::Kinematic,
            Collider::rectangle(HEALTH_PACK_SIZE.x, HEALTH_PACK_SIZE.y),
            Sensor,
            CollisionEventsEnabled,
            CollidingEntities::default(),
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player, GameLayer::Ground]),
            LinearVelocity::default(),
            MovementState::default(),
            GravityScale(0.0),
        ))
        .id()
}

/// Overlapping the player heals them; the pack disappears for good.
pub(crate) fn health_pack_pickup(
    mut commands: Commands,
    mut player_query: Query<(Entity, &mut Health), (With<Player>, Without<Dead>)>,
    mut packs: Query<(Entity, &mut HealthPack, &CollidingEntities, &mut Visibility)>,
) {
    let Ok((player_entity, mut health)) = player_query.single_mut() else {
        return;
    };

    for (pack_entity, mut pack, contacts, mut visibility) in &mut packs {
        if pack.used || pack.carrier.is_some() || !contacts.contains(&player_entity) {
            continue;
        }

        if pack.apply(&mut health) {
            *visibility = Visibility::Hidden;
            commands.entity(pack_entity).insert(ColliderDisabled);
            info!("Health pack restored up to {} health", pack.heal_amount);
        }
    }
}

/// Carried packs hide and ride their gnome; a dead carrier drops them.
pub(crate) fn health_pack_behavior(
    mut packs: Query<(
        &mut HealthPack,
        &mut Transform,
        &mut LinearVelocity,
        &mut Visibility,
    )>,
    carriers: Query<(&Transform, Has<Dead>), Without<HealthPack>>,
) {
    for (mut pack, mut transform, mut velocity, mut visibility) in &mut packs {
        if pack.used {
            continue;
        }
        let Some(carrier) = pack.carrier else {
            continue;
        };

        match carriers.get(carrier) {
            Ok((_, true)) | Err(_) => {
                pack.carrier = None;
                *visibility = Visibility::Visible;
                velocity.y = DROP_IMPULSE;
            }
            Ok((carrier_transform, false)) => {
                *visibility = Visibility::Hidden;
                transform.translation.x = carrier_transform.translation.x;
                transform.translation.y = carrier_transform.translation.y;
                velocity.x = 0.0;
                velocity.y = 0.0;
            }
        }
    }
}
