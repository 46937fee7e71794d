//! Sprite sheet manifest loading.
//!
//! The manifest JSON under `assets/sprites/manifest.json` names every sheet
//! the game uses, with its frame grid. Sheets are loaded once at boot and
//! looked up by name when entities are spawned.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Definition of a single sprite sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetDef {
    /// Path to the sheet image, relative to assets/.
    pub path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SheetDef {
    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(self.frame_width as f32, self.frame_height as f32)
    }
}

/// Raw manifest JSON structure.
#[derive(Deserialize)]
struct ManifestJson {
    version: u32,
    sheets: HashMap<String, SheetDef>,
}

struct LoadedSheet {
    def: SheetDef,
    image: Handle<Image>,
    layout: Handle<TextureAtlasLayout>,
}

/// Resource holding every loaded sheet, keyed by name.
#[derive(Resource, Default)]
pub struct SpriteSheets {
    version: u32,
    sheets: HashMap<String, LoadedSheet>,
}

impl SpriteSheets {
    /// Load the manifest and register an atlas layout per sheet.
    pub fn load_from_file(
        &mut self,
        path: &str,
        asset_server: &AssetServer,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) {
        let manifest_path = Path::new(path);

        if !manifest_path.exists() {
            warn!("Sprite manifest not found at {:?}, using empty manifest", path);
            return;
        }

        let contents = match fs::read_to_string(manifest_path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read sprite manifest: {}", e);
                return;
            }
        };

        let manifest: ManifestJson = match serde_json::from_str(&contents) {
            Ok(m) => m,
            Err(e) => {
                error!("Failed to parse sprite manifest: {}", e);
                return;
            }
        };

        self.version = manifest.version;
        for (name, def) in manifest.sheets {
            let image = asset_server.load(&def.path);
            let layout = layouts.add(TextureAtlasLayout::from_grid(
                UVec2::new(def.frame_width, def.frame_height),
                def.columns,
                def.rows,
                None,
                None,
            ));
            self.sheets.insert(name, LoadedSheet { def, image, layout });
        }

        info!(
            "Loaded sprite manifest v{} with {} sheets",
            self.version,
            self.sheets.len()
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    pub fn frame_size(&self, name: &str) -> Option<Vec2> {
        self.sheets.get(name).map(|s| s.def.frame_size())
    }

    /// Build a sprite showing `frame` of the named sheet. Falls back to a
    /// plain color quad when the sheet is missing so a bad manifest entry
    /// degrades visibly instead of crashing.
    pub fn atlas_sprite(&self, name: &str, frame: u32, fallback_size: Vec2) -> Sprite {
        match self.sheets.get(name) {
            Some(sheet) => Sprite {
                image: sheet.image.clone(),
                texture_atlas: Some(TextureAtlas {
                    layout: sheet.layout.clone(),
                    index: frame as usize,
                }),
                custom_size: Some(sheet.def.frame_size()),
                ..default()
            },
            None => Sprite {
                color: Color::srgb(0.9, 0.2, 0.9),
                custom_size: Some(fallback_size),
                ..default()
            },
        }
    }
}

/// Startup system loading the manifest.
pub(crate) fn load_sprite_sheets(
    mut sheets: ResMut<SpriteSheets>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    sheets.load_from_file("assets/sprites/manifest.json", &asset_server, &mut layouts);
}
