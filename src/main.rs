mod combat;
mod core;
mod doors;
mod levels;
mod movement;
mod powerups;
mod sprites;
mod ui;
mod weapons;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gnomeward".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            core::CorePlugin,
            sprites::SpritesPlugin,
            movement::MovementPlugin,
            combat::CombatPlugin,
            weapons::WeaponsPlugin,
            doors::DoorsPlugin,
            powerups::PowerUpsPlugin,
            levels::LevelsPlugin,
            ui::UiPlugin,
        ))
        .run();
}
