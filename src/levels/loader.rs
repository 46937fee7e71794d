//! Loader for RON level files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{DataFile, LevelDef};

/// Error type for level loading failures.
#[derive(Debug)]
pub struct LevelLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a RON string containing a DataFile<LevelDef>, validating each level.
pub fn parse_levels(source: &str, origin: &str) -> Result<Vec<LevelDef>, Vec<LevelLoadError>> {
    let data: DataFile<LevelDef> = ron_options().from_str(source).map_err(|e| {
        vec![LevelLoadError {
            file: origin.to_string(),
            message: format!("Parse error: {}", e),
        }]
    })?;

    let errors: Vec<LevelLoadError> = data
        .items
        .iter()
        .flat_map(|level| level.validate())
        .map(|message| LevelLoadError {
            file: origin.to_string(),
            message,
        })
        .collect();

    if errors.is_empty() {
        Ok(data.items)
    } else {
        Err(errors)
    }
}

/// Load all levels from `assets/levels/levels.ron`.
pub fn load_levels(base_path: &Path) -> Result<Vec<LevelDef>, Vec<LevelLoadError>> {
    let path = base_path.join("levels.ron");
    let file_name = path.display().to_string();

    let contents = fs::read_to_string(&path).map_err(|e| {
        vec![LevelLoadError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        }]
    })?;

    parse_levels(&contents, &file_name)
}

/// Cross-check door destinations once all levels are known.
pub fn validate_destinations(levels: &[LevelDef]) -> Vec<LevelLoadError> {
    let mut errors = Vec::new();
    for level in levels {
        for (i, door) in level.doors.iter().enumerate() {
            if !levels.iter().any(|l| l.id == door.destination) {
                errors.push(LevelLoadError {
                    file: level.id.clone(),
                    message: format!(
                        "door #{} leads to unknown level '{}'",
                        i, door.destination
                    ),
                });
            }
        }
    }
    errors
}

/// Log a batch of load errors in one place.
pub fn report_errors(errors: &[LevelLoadError]) {
    for e in errors {
        error!("{}", e);
    }
}
