//! Levels domain: tests for level data, parsing, and transition cooldown.

use std::time::Duration;

use super::data::{KeyDef, PointDef};
use super::flow::TransitionCooldown;
use super::loader::{parse_levels, validate_destinations};
use super::registry::builtin_levels_for_tests;
use crate::doors::KeyType;

// -----------------------------------------------------------------------------
// Key placement validation
// -----------------------------------------------------------------------------

#[test]
fn test_key_with_position_is_valid() {
    let key = KeyDef {
        key_type: KeyType::Small,
        position: Some(PointDef { x: 10.0, y: 20.0 }),
        carried_by_gnome: None,
    };
    assert!(key.validate(0).is_ok());
}

#[test]
fn test_key_with_carrier_is_valid() {
    let key = KeyDef {
        key_type: KeyType::Small,
        position: None,
        carried_by_gnome: Some(1),
    };
    assert!(key.validate(2).is_ok());
}

#[test]
fn test_key_with_neither_is_rejected_with_both_values() {
    let key = KeyDef {
        key_type: KeyType::Small,
        position: None,
        carried_by_gnome: None,
    };
    let error = key.validate(3).unwrap_err();
    assert!(error.contains("position: None"));
    assert!(error.contains("carried_by_gnome: None"));
}

#[test]
fn test_key_with_out_of_range_carrier_is_rejected() {
    let key = KeyDef {
        key_type: KeyType::Small,
        position: None,
        carried_by_gnome: Some(5),
    };
    let error = key.validate(2).unwrap_err();
    assert!(error.contains("out of range"));
}

// -----------------------------------------------------------------------------
// RON parsing
// -----------------------------------------------------------------------------

const MINIMAL_LEVEL_RON: &str = r#"
(
    items: [
        (
            id: "test_level",
            title: "Test Level",
            width: 800.0,
            height: 600.0,
            player_spawn: (x: 50.0, y: 40.0),
            ground: [(x: 400.0, y: 10.0, width: 800.0, height: 20.0)],
            gnomes: [(position: (x: 300.0, y: 40.0))],
            doors: [],
            keys: [(key_type: Small, position: (x: 100.0, y: 40.0), carried_by_gnome: None)],
            health_packs: [],
            pistols: [],
        ),
    ],
)
"#;

#[test]
fn test_parse_minimal_level() {
    let levels = parse_levels(MINIMAL_LEVEL_RON, "test").expect("level should parse");
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].id, "test_level");
    assert_eq!(levels[0].gnomes.len(), 1);
    assert_eq!(levels[0].keys[0].key_type, KeyType::Small);
}

#[test]
fn test_parse_rejects_ungrounded_level() {
    let source = MINIMAL_LEVEL_RON.replace(
        "ground: [(x: 400.0, y: 10.0, width: 800.0, height: 20.0)]",
        "ground: []",
    );
    let errors = parse_levels(&source, "test").unwrap_err();
    assert!(errors.iter().any(|e| e.message.contains("no ground")));
}

#[test]
fn test_parse_rejects_floating_keyless_placement() {
    let source = MINIMAL_LEVEL_RON.replace(
        "position: (x: 100.0, y: 40.0), carried_by_gnome: None",
        "position: None, carried_by_gnome: None",
    );
    let errors = parse_levels(&source, "test").unwrap_err();
    assert!(errors.iter().any(|e| e.message.contains("key")));
}

#[test]
fn test_parse_garbage_reports_origin() {
    let errors = parse_levels("not ron at all {", "levels.ron").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file, "levels.ron");
    assert!(errors[0].to_string().contains("levels.ron"));
}

// -----------------------------------------------------------------------------
// Built-in levels
// -----------------------------------------------------------------------------

#[test]
fn test_builtin_levels_are_valid() {
    let levels = builtin_levels_for_tests();
    assert!(!levels.is_empty());
    for level in &levels {
        assert!(
            level.validate().is_empty(),
            "built-in level '{}' failed validation",
            level.id
        );
    }
}

#[test]
fn test_builtin_door_destinations_exist() {
    let levels = builtin_levels_for_tests();
    assert!(validate_destinations(&levels).is_empty());
}

#[test]
fn test_builtin_levels_have_unique_ids() {
    let levels = builtin_levels_for_tests();
    for (i, a) in levels.iter().enumerate() {
        for b in levels.iter().skip(i + 1) {
            assert_ne!(a.id, b.id);
        }
    }
}

// -----------------------------------------------------------------------------
// TransitionCooldown tests
// -----------------------------------------------------------------------------

#[test]
fn test_transition_cooldown_default_blocks_until_expired() {
    let cooldown = TransitionCooldown::default();
    assert!(!cooldown.can_transition());
}

#[test]
fn test_transition_cooldown_reset_blocks_transitions() {
    let mut cooldown = TransitionCooldown::default();
    cooldown.tick(Duration::from_secs_f32(0.5));
    assert!(cooldown.can_transition());

    cooldown.reset();
    assert!(!cooldown.can_transition());
}

#[test]
fn test_transition_cooldown_expires() {
    let mut cooldown = TransitionCooldown::default();
    cooldown.reset();

    cooldown.tick(Duration::from_secs_f32(0.1));
    assert!(!cooldown.can_transition());

    cooldown.tick(Duration::from_secs_f32(0.5));
    assert!(cooldown.can_transition());
}
