//! UI domain: key ring counters.

use bevy::prelude::*;

use crate::doors::{KeyRing, KeyType};
use crate::movement::Player;
use crate::ui::hud_health::{HEALTHBAR_HEIGHT, HEALTHBAR_PADDING};

/// Marker for the key counter text
#[derive(Component)]
pub struct KeyRingUI;

pub(crate) fn spawn_key_ui(mut commands: Commands) {
    commands.spawn((
        KeyRingUI,
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.85, 0.4)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HEALTHBAR_PADDING),
            top: Val::Px(HEALTHBAR_PADDING + HEALTHBAR_HEIGHT + 8.0),
            ..default()
        },
    ));
}

pub(crate) fn update_key_ui(
    player_query: Query<&KeyRing, With<Player>>,
    mut text_query: Query<&mut Text, With<KeyRingUI>>,
) {
    let Ok(ring) = player_query.single() else {
        return;
    };

    for mut text in &mut text_query {
        let small = ring.count(KeyType::Small);
        let medium = ring.count(KeyType::Medium);
        let large = ring.count(KeyType::Large);
        text.0 = if small + medium + large == 0 {
            String::new()
        } else {
            format!("Keys  S:{}  M:{}  L:{}", small, medium, large)
        };
    }
}
