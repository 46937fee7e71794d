//! Levels domain: boot handoff, transitions, and teardown.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::{GameState, LevelTransitionRequested, PlayerCarryover};
use crate::levels::flow::{LevelFlow, TransitionCooldown};
use crate::levels::registry::LevelRegistry;
use crate::levels::spawn::{spawn_level, LevelEntity};
use crate::sprites::SpriteSheets;
use crate::weapons::{Projectile, Weapon};

/// Leave Boot once the registry has levels to offer.
pub(crate) fn finish_boot(
    registry: Res<LevelRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if registry.is_ready() {
        next_state.set(GameState::Playing);
    }
}

pub(crate) fn spawn_current_level(
    mut commands: Commands,
    sheets: Res<SpriteSheets>,
    registry: Res<LevelRegistry>,
    carryover: Res<PlayerCarryover>,
    mut flow: ResMut<LevelFlow>,
    mut cooldown: ResMut<TransitionCooldown>,
) {
    let Some(level_id) = flow.current.clone() else {
        error!("No current level to spawn");
        return;
    };

    if spawn_level(&mut commands, &sheets, &registry, &carryover, &level_id) {
        flow.visited.push(level_id);
        cooldown.reset();
    }
}

pub(crate) fn tick_transition_cooldown(mut cooldown: ResMut<TransitionCooldown>, time: Res<Time>) {
    cooldown.tick(time.delta());
}

/// Tear down the old level and bring up the requested one. Weapons and
/// projectiles are always level-scoped, marker or not, so pooled rounds
/// never leak across levels.
pub(crate) fn process_level_transitions(
    mut commands: Commands,
    mut transitions: MessageReader<LevelTransitionRequested>,
    sheets: Res<SpriteSheets>,
    registry: Res<LevelRegistry>,
    carryover: Res<PlayerCarryover>,
    mut flow: ResMut<LevelFlow>,
    mut cooldown: ResMut<TransitionCooldown>,
    teardown: Query<Entity, Or<(With<LevelEntity>, With<Weapon>, With<Projectile>)>>,
) {
    let Some(request) = transitions.read().last() else {
        return;
    };

    if !cooldown.can_transition() {
        return;
    }

    if registry.get(&request.to_level).is_none() {
        error!("Door leads to unknown level '{}'", request.to_level);
        return;
    }

    for entity in &teardown {
        commands.entity(entity).despawn();
    }

    flow.current = Some(request.to_level.clone());
    if spawn_level(&mut commands, &sheets, &registry, &carryover, &request.to_level) {
        flow.visited.push(request.to_level.clone());
    }
    cooldown.reset();
}
