//! Levels domain: the level registry and built-in fallback levels.

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use crate::doors::KeyType;
use crate::levels::data::{
    DoorDef, GnomeDef, GroundDef, HealthPackDef, KeyDef, LevelDef, PointDef, WeaponDef,
};
use crate::levels::flow::LevelFlow;
use crate::levels::loader::{load_levels, report_errors, validate_destinations};

/// All loaded levels, keyed by id, plus the id the game starts in.
#[derive(Resource, Debug, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDef>,
    pub start_level: Option<String>,
}

impl LevelRegistry {
    pub fn get(&self, id: &str) -> Option<&LevelDef> {
        self.levels.get(id)
    }

    pub fn is_ready(&self) -> bool {
        !self.levels.is_empty() && self.start_level.is_some()
    }

    fn install(&mut self, levels: Vec<LevelDef>) {
        self.start_level = levels.first().map(|l| l.id.clone());
        self.levels = levels.into_iter().map(|l| (l.id.clone(), l)).collect();
    }
}

/// Load levels from disk, falling back to the built-in pair when the data
/// directory is missing or broken.
pub(crate) fn setup_level_registry(
    mut registry: ResMut<LevelRegistry>,
    mut flow: ResMut<LevelFlow>,
) {
    let levels = match load_levels(Path::new("assets/levels")) {
        Ok(levels) => {
            let errors = validate_destinations(&levels);
            if errors.is_empty() {
                levels
            } else {
                report_errors(&errors);
                error!("Level data has dangling door destinations; using built-in levels");
                builtin_levels()
            }
        }
        Err(errors) => {
            report_errors(&errors);
            error!("Could not load assets/levels/levels.ron; using built-in levels");
            builtin_levels()
        }
    };

    registry.install(levels);
    flow.current = registry.start_level.clone();

    info!(
        "Level registry ready: {} levels, starting in {:?}",
        registry.levels.len(),
        registry.start_level
    );
}

/// Two hand-built levels so the game runs without any data files: an
/// outdoor stretch full of gnomes, and a vault behind a locked door.
fn builtin_levels() -> Vec<LevelDef> {
    vec![
        LevelDef {
            id: "gnome_fields".to_string(),
            title: "Gnome Fields".to_string(),
            width: 1600.0,
            height: 720.0,
            player_spawn: PointDef { x: 120.0, y: 80.0 },
            ground: vec![
                GroundDef {
                    x: 800.0,
                    y: 10.0,
                    width: 1600.0,
                    height: 20.0,
                },
                GroundDef {
                    x: 500.0,
                    y: 140.0,
                    width: 200.0,
                    height: 16.0,
                },
                GroundDef {
                    x: 1000.0,
                    y: 220.0,
                    width: 160.0,
                    height: 16.0,
                },
            ],
            gnomes: vec![
                GnomeDef {
                    position: PointDef { x: 600.0, y: 60.0 },
                },
                GnomeDef {
                    position: PointDef { x: 900.0, y: 60.0 },
                },
                GnomeDef {
                    position: PointDef { x: 1200.0, y: 60.0 },
                },
            ],
            doors: vec![DoorDef {
                position: PointDef { x: 1500.0, y: 60.0 },
                destination: "gnome_vault".to_string(),
                lock: Some(KeyType::Small),
                debounce_seconds: None,
            }],
            keys: vec![KeyDef {
                key_type: KeyType::Small,
                position: None,
                carried_by_gnome: Some(2),
            }],
            health_packs: vec![HealthPackDef {
                position: PointDef { x: 500.0, y: 170.0 },
                heal_amount: 25,
                carried_by_gnome: None,
            }],
            pistols: vec![WeaponDef {
                position: PointDef { x: 1000.0, y: 250.0 },
                clip_rounds: 10,
                reserve_rounds: 90,
            }],
        },
        LevelDef {
            id: "gnome_vault".to_string(),
            title: "Gnome Vault".to_string(),
            width: 1280.0,
            height: 720.0,
            player_spawn: PointDef { x: 100.0, y: 80.0 },
            ground: vec![
                GroundDef {
                    x: 640.0,
                    y: 10.0,
                    width: 1280.0,
                    height: 20.0,
                },
                GroundDef {
                    x: 640.0,
                    y: 180.0,
                    width: 240.0,
                    height: 16.0,
                },
            ],
            gnomes: vec![
                GnomeDef {
                    position: PointDef { x: 400.0, y: 60.0 },
                },
                GnomeDef {
                    position: PointDef { x: 700.0, y: 60.0 },
                },
                GnomeDef {
                    position: PointDef { x: 640.0, y: 220.0 },
                },
                GnomeDef {
                    position: PointDef { x: 1000.0, y: 60.0 },
                },
            ],
            doors: vec![DoorDef {
                position: PointDef { x: 1180.0, y: 60.0 },
                destination: "gnome_fields".to_string(),
                lock: None,
                debounce_seconds: None,
            }],
            keys: vec![],
            health_packs: vec![HealthPackDef {
                position: PointDef { x: 640.0, y: 210.0 },
                heal_amount: 50,
                carried_by_gnome: Some(2),
            }],
            pistols: vec![],
        },
    ]
}

#[cfg(test)]
pub(crate) fn builtin_levels_for_tests() -> Vec<LevelDef> {
    builtin_levels()
}
