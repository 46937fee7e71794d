//! UI domain: equipped weapon icon and ammo readout.

use bevy::prelude::*;

use crate::movement::Player;
use crate::weapons::{Weapon, WeaponInventory, WeaponKind};

const ICON_SIZE: f32 = 48.0;
const ICON_PADDING: f32 = 16.0;

/// Marker for the weapon icon swatch
#[derive(Component)]
pub struct WeaponIconUI;

/// Marker for the weapon name + ammo text
#[derive(Component)]
pub struct WeaponTextUI;

pub(crate) fn spawn_weapon_ui(mut commands: Commands) {
    commands
        .spawn((
            WeaponIconUI,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(ICON_PADDING),
                top: Val::Px(ICON_PADDING),
                width: Val::Px(ICON_SIZE),
                height: Val::Px(ICON_SIZE),
                border: UiRect::all(Val::Px(2.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::FlexEnd,
                ..default()
            },
            BackgroundColor(Color::srgba(0.15, 0.15, 0.2, 0.85)),
            BorderColor::all(Color::srgb(0.4, 0.4, 0.5)),
        ))
        .with_child((
            WeaponTextUI,
            Text::new(""),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.9, 0.9)),
        ));
}

/// Show the equipped weapon's name and ammo; the swatch color doubles as
/// the icon, toggled as the equipped weapon changes.
pub(crate) fn update_weapon_ui(
    player_query: Query<&WeaponInventory, With<Player>>,
    weapons: Query<&Weapon>,
    mut icon_query: Query<&mut BackgroundColor, With<WeaponIconUI>>,
    mut text_query: Query<&mut Text, With<WeaponTextUI>>,
) {
    let Ok(inventory) = player_query.single() else {
        return;
    };
    let weapon = inventory.equipped().and_then(|e| weapons.get(e).ok());

    for mut text in &mut text_query {
        text.0 = match weapon {
            Some(weapon) => format!("{} {}", weapon.name, weapon.ammo.display()),
            None => String::new(),
        };
    }

    for mut bg_color in &mut icon_query {
        bg_color.0 = match weapon.map(|w| w.kind) {
            Some(WeaponKind::Melee) => Color::srgba(0.7, 0.5, 0.3, 0.85),
            Some(WeaponKind::Projectile) => Color::srgba(0.4, 0.45, 0.55, 0.85),
            None => Color::srgba(0.15, 0.15, 0.2, 0.85),
        };
    }
}
