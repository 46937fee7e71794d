//! UI domain: death screen presentation and retry flow.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{Dead, Health};
use crate::core::{LevelTransitionRequested, PlayerCarryover};
use crate::levels::LevelFlow;
use crate::movement::Player;

/// Marker for the death screen overlay
#[derive(Component)]
pub struct DeathScreenUI;

/// Resource to track if player has died (prevents multiple death screens)
#[derive(Resource, Default)]
pub struct PlayerDeathState {
    pub is_dead: bool,
}

pub(crate) fn detect_player_death(
    mut commands: Commands,
    player_query: Query<&Health, (With<Player>, With<Dead>)>,
    mut death_state: ResMut<PlayerDeathState>,
    existing_death_screen: Query<Entity, With<DeathScreenUI>>,
) {
    if death_state.is_dead {
        return;
    }

    if player_query.single().is_err() {
        return;
    }

    death_state.is_dead = true;
    if existing_death_screen.is_empty() {
        spawn_death_screen(&mut commands);
    }
}

fn spawn_death_screen(commands: &mut Commands) {
    commands
        .spawn((
            DeathScreenUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("GNOMED"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.15, 0.15)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Press [Enter] to try again"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
            ));
        });
}

/// Restart the current level with a fresh health pool.
pub(crate) fn handle_retry(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    death_screen_query: Query<Entity, With<DeathScreenUI>>,
    mut death_state: ResMut<PlayerDeathState>,
    mut carryover: ResMut<PlayerCarryover>,
    flow: Res<LevelFlow>,
    mut transitions: MessageWriter<LevelTransitionRequested>,
) {
    let should_retry =
        keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::NumpadEnter);
    if !should_retry || !death_state.is_dead {
        return;
    }

    let Some(current) = flow.current.clone() else {
        return;
    };

    death_state.is_dead = false;
    for entity in &death_screen_query {
        commands.entity(entity).despawn();
    }

    carryover.reset();
    transitions.write(LevelTransitionRequested { to_level: current });
}
