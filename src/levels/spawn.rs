//! Levels domain: two-phase level spawning.
//!
//! Phase one creates every entity (visuals, physics bodies); phase two
//! wires cross-entity relations (lock→door, key→carrier, fists→player).
//! The split keeps construction free of ordering/circular-reference
//! problems: no relation is wired until both ends exist.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::GnomeBundle;
use crate::core::PlayerCarryover;
use crate::doors::{Door, DoorState, Key, Lock, DOOR_DEBOUNCE_SECONDS};
use crate::levels::data::{KeyDef, LevelDef};
use crate::levels::registry::LevelRegistry;
use crate::movement::{spawn_player, GameLayer, Ground, MovementState};
use crate::powerups::spawn_health_pack;
use crate::sprites::{AnimationClip, AnimationController, AnimationSet, SpriteSheets};
use crate::weapons::{spawn_fists, spawn_pistol, WeaponInventory};

const DOOR_SHEET: &str = "door";
const DOOR_SIZE: Vec2 = Vec2::new(32.0, 48.0);
const LOCK_SHEET: &str = "lock";
const LOCK_SIZE: Vec2 = Vec2::new(16.0, 16.0);
const KEY_SHEET: &str = "key";
const KEY_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// Everything torn down when the level changes.
#[derive(Component, Debug)]
pub struct LevelEntity;

fn door_animation_set() -> AnimationSet {
    AnimationSet::new()
        .with("closed", AnimationClip::still(0))
        .with("open", AnimationClip::still(5))
        .with("opening", AnimationClip::once(0, 5).with_frame_rate(6.0))
}

fn lock_animation_set() -> AnimationSet {
    AnimationSet::new()
        .with("locked", AnimationClip::still(0))
        .with("unlocked", AnimationClip::still(3))
        .with("unlocking", AnimationClip::once(0, 3).with_frame_rate(4.0))
}

fn key_animation_set() -> AnimationSet {
    AnimationSet::new()
        .with("still", AnimationClip::still(0))
        .with("spinning", AnimationClip::range(0, 7).with_yoyo())
}

/// Spawn one level's entities. Returns false when the id is unknown.
pub fn spawn_level(
    commands: &mut Commands,
    sheets: &SpriteSheets,
    registry: &LevelRegistry,
    carryover: &PlayerCarryover,
    level_id: &str,
) -> bool {
    let Some(def) = registry.get(level_id) else {
        error!("Cannot spawn unknown level '{}'", level_id);
        return false;
    };

    // --- Phase 1: entities ---------------------------------------------------

    for slab in &def.ground {
        commands.spawn((
            LevelEntity,
            Ground,
            Sprite {
                color: Color::srgb(0.35, 0.30, 0.25),
                custom_size: Some(Vec2::new(slab.width, slab.height)),
                ..default()
            },
            Transform::from_xyz(slab.x, slab.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(slab.width, slab.height),
            CollisionLayers::new(
                GameLayer::Ground,
                [
                    GameLayer::Player,
                    GameLayer::Enemy,
                    GameLayer::Projectile,
                    GameLayer::Sensor,
                ],
            ),
        ));
    }

    let player = spawn_player(commands, sheets, carryover, def.player_spawn.into());
    commands.entity(player).insert(LevelEntity);

    let gnomes: Vec<Entity> = def
        .gnomes
        .iter()
        .map(|gnome| {
            commands
                .spawn((GnomeBundle::new(gnome.position.into(), sheets), LevelEntity))
                .id()
        })
        .collect();

    let door_shells: Vec<Entity> = def
        .doors
        .iter()
        .map(|door| {
            let mut controller = AnimationController::new(door_animation_set());
            controller.play("closed");
            commands
                .spawn((
                    LevelEntity,
                    controller,
                    sheets.atlas_sprite(DOOR_SHEET, 0, DOOR_SIZE),
                    Transform::from_xyz(door.position.x, door.position.y, 1.0),
                    RigidBody::Static,
                    Collider::rectangle(DOOR_SIZE.x, DOOR_SIZE.y),
                    Sensor,
                    CollisionEventsEnabled,
                    CollidingEntities::default(),
                    CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
                ))
                .id()
        })
        .collect();

    // --- Phase 2: relations --------------------------------------------------

    let fists = spawn_fists(commands, sheets, player);
    commands.entity(fists).insert(LevelEntity);
    let mut inventory = WeaponInventory::default();
    inventory.add(fists);
    commands.entity(player).insert(inventory);

    for (shell, door_def) in door_shells.iter().zip(&def.doors) {
        let debounce = door_def.debounce_seconds.unwrap_or(DOOR_DEBOUNCE_SECONDS);
        let mut door = Door::new(door_def.destination.clone(), DoorState::Closed, debounce);

        if let Some(key_type) = door_def.lock {
            let mut lock_controller = AnimationController::new(lock_animation_set());
            lock_controller.play("locked");
            let lock = commands
                .spawn((
                    LevelEntity,
                    Lock::new(key_type, *shell),
                    lock_controller,
                    sheets.atlas_sprite(LOCK_SHEET, 0, LOCK_SIZE),
                    Transform::from_xyz(door_def.position.x, door_def.position.y, 2.0),
                ))
                .id();
            door.lock = Some(lock);
            door.lock_door();
        }

        commands.entity(*shell).insert(door);
    }

    for key_def in &def.keys {
        spawn_key(commands, sheets, def, key_def, &gnomes);
    }

    for pack in &def.health_packs {
        let carrier = pack.carried_by_gnome.and_then(|i| gnomes.get(i).copied());
        let entity = spawn_health_pack(
            commands,
            sheets,
            pack.position.into(),
            pack.heal_amount,
            carrier,
        );
        commands.entity(entity).insert(LevelEntity);
    }

    for pistol in &def.pistols {
        let entity = spawn_pistol(
            commands,
            sheets,
            None,
            pistol.position.into(),
            pistol.clip_rounds,
            pistol.reserve_rounds,
        );
        commands.entity(entity).insert(LevelEntity);
    }

    info!(
        "Spawned level '{}' ({}): {} gnomes, {} doors, {} keys",
        def.id,
        def.title,
        def.gnomes.len(),
        def.doors.len(),
        def.keys.len()
    );
    true
}

fn spawn_key(
    commands: &mut Commands,
    sheets: &SpriteSheets,
    level: &LevelDef,
    key_def: &KeyDef,
    gnomes: &[Entity],
) {
    // Loader validation already rejected bad placements; this guards data
    // assembled at runtime.
    if let Err(e) = key_def.validate(gnomes.len()) {
        error!("level '{}': {}", level.id, e);
        return;
    }

    let (key, position) = match key_def.carried_by_gnome {
        Some(index) => (
            Key::carried_by(key_def.key_type, gnomes[index]),
            level.gnomes[index].position.into(),
        ),
        None => {
            let position: Vec2 = key_def
                .position
                .map(Into::into)
                .unwrap_or(Vec2::ZERO);
            (Key::free(key_def.key_type), position)
        }
    };

    let mut controller = AnimationController::new(key_animation_set());
    controller.play(if key.carrier.is_some() { "still" } else { "spinning" });

    commands.spawn((
        LevelEntity,
        key,
        controller,
        sheets.atlas_sprite(KEY_SHEET, 0, KEY_SIZE),
        Transform::from_xyz(position.x, position.y, 6.0),
        RigidBody::Kinematic,
        Collider::rectangle(KEY_SIZE.x, KEY_SIZE.y),
        Sensor,
        CollisionEventsEnabled,
        CollidingEntities::default(),
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player, GameLayer::Ground]),
        LinearVelocity::default(),
        MovementState::default(),
        GravityScale(0.0),
    ));
}
