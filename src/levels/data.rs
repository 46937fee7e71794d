//! Levels domain: serializable level definitions.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::doors::KeyType;

/// Wrapper for RON data files holding a list of items.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub items: Vec<T>,
}

/// Serializable point.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PointDef {
    pub x: f32,
    pub y: f32,
}

impl From<PointDef> for Vec2 {
    fn from(p: PointDef) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A static slab of terrain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroundDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GnomeDef {
    pub position: PointDef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoorDef {
    pub position: PointDef,
    /// Level this door leads to.
    pub destination: String,
    /// Present iff the door starts locked.
    pub lock: Option<KeyType>,
    /// Per-door debounce override, seconds.
    pub debounce_seconds: Option<f32>,
}

/// Where a key starts: in the world at a position, or carried by a gnome
/// (index into the level's gnome list). Exactly one must be given.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyDef {
    pub key_type: KeyType,
    pub position: Option<PointDef>,
    pub carried_by_gnome: Option<usize>,
}

impl KeyDef {
    /// Check the placement invariant: a key needs either coordinates or a
    /// carrier to exist. Reports both offending values.
    pub fn validate(&self, gnome_count: usize) -> Result<(), String> {
        if self.position.is_none() && self.carried_by_gnome.is_none() {
            return Err(format!(
                "key needs either a position or a carrier to exist \
                 (got position: {:?}, carried_by_gnome: {:?})",
                self.position, self.carried_by_gnome
            ));
        }
        if let Some(index) = self.carried_by_gnome {
            if index >= gnome_count {
                return Err(format!(
                    "key carrier index {} out of range ({} gnomes in level)",
                    index, gnome_count
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthPackDef {
    pub position: PointDef,
    pub heal_amount: i32,
    pub carried_by_gnome: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeaponDef {
    pub position: PointDef,
    pub clip_rounds: u32,
    pub reserve_rounds: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LevelDef {
    pub id: String,
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub player_spawn: PointDef,
    pub ground: Vec<GroundDef>,
    pub gnomes: Vec<GnomeDef>,
    pub doors: Vec<DoorDef>,
    pub keys: Vec<KeyDef>,
    pub health_packs: Vec<HealthPackDef>,
    pub pistols: Vec<WeaponDef>,
}

impl LevelDef {
    /// Structural validation of one level in isolation. Door destinations
    /// are checked against the registry once every level is loaded.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, key) in self.keys.iter().enumerate() {
            if let Err(e) = key.validate(self.gnomes.len()) {
                errors.push(format!("level '{}', key #{}: {}", self.id, i, e));
            }
        }
        for (i, pack) in self.health_packs.iter().enumerate() {
            if let Some(index) = pack.carried_by_gnome {
                if index >= self.gnomes.len() {
                    errors.push(format!(
                        "level '{}', health pack #{}: carrier index {} out of range \
                         ({} gnomes in level)",
                        self.id,
                        i,
                        index,
                        self.gnomes.len()
                    ));
                }
            }
        }
        if self.ground.is_empty() {
            errors.push(format!("level '{}' has no ground", self.id));
        }

        errors
    }
}
