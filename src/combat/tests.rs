//! Combat domain: tests for health, immunity windows, and gnome rolls.

use super::components::{resolve_hit, Health, Invulnerable, DAMAGE_IMMUNITY_SECONDS};
use super::gnome::{Gnome, GnomeAction};
use bevy::prelude::World;

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_never_goes_below_zero() {
    let mut health = Health::full(25);

    health.take_damage(10);
    health.take_damage(10);
    health.take_damage(10);
    assert_eq!(health.current, 0);

    health.take_damage(999);
    assert_eq!(health.current, 0);
}

#[test]
fn test_take_damage_returns_actual_loss() {
    let mut health = Health::full(25);
    assert_eq!(health.take_damage(10), 10);
    assert_eq!(health.take_damage(20), 15);
    assert_eq!(health.take_damage(5), 0);
}

#[test]
fn test_negative_damage_is_ignored() {
    let mut health = Health::full(50);
    assert_eq!(health.take_damage(-10), 0);
    assert_eq!(health.current, 50);
}

#[test]
fn test_heal_caps_at_max() {
    let mut health = Health::new(40, 100);
    assert_eq!(health.heal(100), 60);
    assert_eq!(health.current, 100);
}

#[test]
fn test_heal_does_not_resurrect() {
    let mut health = Health::full(10);
    health.take_damage(10);
    assert!(health.is_dead());

    assert_eq!(health.heal(50), 0);
    assert!(health.is_dead());
}

#[test]
fn test_new_clamps_carryover_into_range() {
    let health = Health::new(150, 100);
    assert_eq!(health.current, 100);
}

#[test]
fn test_percent() {
    let health = Health::new(30, 120);
    assert!((health.percent() - 0.25).abs() < 1e-6);
}

// -----------------------------------------------------------------------------
// Immunity window tests
// -----------------------------------------------------------------------------

#[test]
fn test_hit_inside_window_applies_damage_once() {
    let mut health = Health::full(100);
    let mut invulnerable = Invulnerable::default();

    assert!(resolve_hit(&mut health, &mut invulnerable, 10));
    // Second hit lands immediately, inside the window
    assert!(!resolve_hit(&mut health, &mut invulnerable, 10));
    assert_eq!(health.current, 90);
}

#[test]
fn test_hit_after_window_applies_damage_twice() {
    let mut health = Health::full(100);
    let mut invulnerable = Invulnerable::default();

    assert!(resolve_hit(&mut health, &mut invulnerable, 10));
    invulnerable.tick(DAMAGE_IMMUNITY_SECONDS + 0.01);
    assert!(resolve_hit(&mut health, &mut invulnerable, 10));
    assert_eq!(health.current, 80);
}

#[test]
fn test_every_landed_hit_reopens_the_window() {
    let mut health = Health::full(100);
    let mut invulnerable = Invulnerable::default();

    resolve_hit(&mut health, &mut invulnerable, 10);
    invulnerable.tick(DAMAGE_IMMUNITY_SECONDS + 0.01);
    resolve_hit(&mut health, &mut invulnerable, 10);
    assert!(invulnerable.is_active());
}

// -----------------------------------------------------------------------------
// Scenario: melee kill
// -----------------------------------------------------------------------------

#[test]
fn test_gnome_dies_to_three_spaced_fist_hits() {
    // A gnome with 30 health hit three times for 10, each hit spaced past
    // the immunity window.
    let mut health = Health::full(30);
    let mut invulnerable = Invulnerable::default();

    for _ in 0..3 {
        assert!(resolve_hit(&mut health, &mut invulnerable, 10));
        invulnerable.tick(DAMAGE_IMMUNITY_SECONDS + 0.05);
    }

    assert_eq!(health.current, 0);
    assert!(health.is_dead());
}

#[test]
fn test_rapid_hits_inside_window_do_not_kill() {
    let mut health = Health::full(30);
    let mut invulnerable = Invulnerable::default();

    // Three hits in the same window only land once
    resolve_hit(&mut health, &mut invulnerable, 10);
    resolve_hit(&mut health, &mut invulnerable, 10);
    resolve_hit(&mut health, &mut invulnerable, 10);

    assert_eq!(health.current, 20);
    assert!(!health.is_dead());
}

// -----------------------------------------------------------------------------
// Gnome decision tests
// -----------------------------------------------------------------------------

#[test]
fn test_action_quartiles() {
    assert_eq!(GnomeAction::from_roll(0.0), GnomeAction::TurnLeft);
    assert_eq!(GnomeAction::from_roll(0.24), GnomeAction::TurnLeft);
    assert_eq!(GnomeAction::from_roll(0.25), GnomeAction::TurnRight);
    assert_eq!(GnomeAction::from_roll(0.49), GnomeAction::TurnRight);
    assert_eq!(GnomeAction::from_roll(0.50), GnomeAction::RunLeft);
    assert_eq!(GnomeAction::from_roll(0.74), GnomeAction::RunLeft);
    assert_eq!(GnomeAction::from_roll(0.75), GnomeAction::RunRight);
    assert_eq!(GnomeAction::from_roll(0.99), GnomeAction::RunRight);
}

#[test]
fn test_action_animations_are_distinct() {
    let actions = [
        GnomeAction::TurnLeft,
        GnomeAction::TurnRight,
        GnomeAction::RunLeft,
        GnomeAction::RunRight,
    ];
    for a in actions {
        for b in actions {
            if a != b {
                assert_ne!(a.animation(), b.animation());
            }
        }
    }
}

#[test]
fn test_weapon_immunity_list() {
    let mut world = World::new();
    let fists = world.spawn_empty().id();
    let pistol = world.spawn_empty().id();

    let gnome = Gnome {
        immunities: vec![pistol],
        ..Default::default()
    };

    assert!(gnome.is_immune_to(pistol));
    assert!(!gnome.is_immune_to(fists));
}
