//! Weapons domain: tests for ammo models, fire gating, inventory, and
//! projectile flight.

use bevy::prelude::{Entity, Vec2, World};

use super::components::{
    try_fire, try_reload, AmmoModel, FireControl, FireOutcome, Weapon, WeaponInventory,
    WEAPON_SWITCH_LOCKOUT_SECONDS,
};
use super::projectile::Projectile;

fn entity(world: &mut World) -> Entity {
    world.spawn_empty().id()
}

// -----------------------------------------------------------------------------
// AmmoModel tests
// -----------------------------------------------------------------------------

#[test]
fn test_infinite_ammo_never_depletes() {
    let mut ammo = AmmoModel::Infinite;
    for _ in 0..1000 {
        assert!(ammo.consume_round());
    }
    assert!(ammo.has_round());
}

#[test]
fn test_finite_pool_depletes_to_zero() {
    let mut ammo = AmmoModel::FiniteCount(3);
    assert!(ammo.consume_round());
    assert!(ammo.consume_round());
    assert!(ammo.consume_round());
    assert!(!ammo.consume_round());
    assert!(!ammo.has_round());
    // Flat pools never reload
    assert!(!ammo.can_reload());
    assert_eq!(ammo.reload(), 0);
}

#[test]
fn test_clip_reload_moves_min_of_reserve_and_space() {
    let mut ammo = AmmoModel::ClipAndReserve {
        clip_capacity: 10,
        clip_rounds: 4,
        reserve_rounds: 90,
    };
    assert_eq!(ammo.reload(), 6);
    assert_eq!(
        ammo,
        AmmoModel::ClipAndReserve {
            clip_capacity: 10,
            clip_rounds: 10,
            reserve_rounds: 84,
        }
    );
}

#[test]
fn test_clip_reload_with_low_reserve() {
    let mut ammo = AmmoModel::ClipAndReserve {
        clip_capacity: 10,
        clip_rounds: 0,
        reserve_rounds: 4,
    };
    assert_eq!(ammo.reload(), 4);
    assert_eq!(
        ammo,
        AmmoModel::ClipAndReserve {
            clip_capacity: 10,
            clip_rounds: 4,
            reserve_rounds: 0,
        }
    );
}

#[test]
fn test_full_clip_reload_is_a_no_op() {
    let mut ammo = AmmoModel::ClipAndReserve {
        clip_capacity: 10,
        clip_rounds: 10,
        reserve_rounds: 50,
    };
    assert!(!ammo.can_reload());
    assert_eq!(ammo.reload(), 0);
}

#[test]
fn test_ammo_display() {
    assert_eq!(AmmoModel::Infinite.display(), "∞");
    assert_eq!(AmmoModel::FiniteCount(7).display(), "7");
    assert_eq!(
        AmmoModel::ClipAndReserve {
            clip_capacity: 10,
            clip_rounds: 3,
            reserve_rounds: 90,
        }
        .display(),
        "3/90"
    );
}

// -----------------------------------------------------------------------------
// Fire gate tests
// -----------------------------------------------------------------------------

#[test]
fn test_fire_arms_cooldown_from_rate_of_fire() {
    let mut weapon = Weapon::fists();
    let mut control = FireControl::default();

    assert_eq!(try_fire(&mut weapon, &mut control), FireOutcome::Fired);
    // 1 round/sec fists: one full second of cooldown
    assert!((control.cooldown_timer - 1.0).abs() < 1e-6);

    assert_eq!(try_fire(&mut weapon, &mut control), FireOutcome::Blocked);

    control.tick(1.01);
    assert_eq!(try_fire(&mut weapon, &mut control), FireOutcome::Fired);
}

#[test]
fn test_melee_fire_opens_swing_window() {
    let mut weapon = Weapon::fists();
    let mut control = FireControl::default();

    try_fire(&mut weapon, &mut control);
    assert!(control.is_swinging());

    control.tick(0.3);
    assert!(!control.is_swinging());
}

#[test]
fn test_swing_hits_clear_when_window_closes() {
    let mut world = World::new();
    let gnome = entity(&mut world);

    let mut weapon = Weapon::fists();
    let mut control = FireControl::default();

    try_fire(&mut weapon, &mut control);
    control.swing_hits.push(gnome);

    control.tick(0.3);
    assert!(control.swing_hits.is_empty());
}

// -----------------------------------------------------------------------------
// Scenario: clip exhaustion and reload
// -----------------------------------------------------------------------------

#[test]
fn test_pistol_clip_exhaustion_triggers_reload() {
    let mut weapon = Weapon::pistol(10, 90);
    let mut control = FireControl::default();

    // 10 successful shots, spaced past the cooldown
    for _ in 0..10 {
        assert_eq!(try_fire(&mut weapon, &mut control), FireOutcome::Fired);
        control.tick(0.51);
    }

    // The 11th trigger pull starts a reload instead of a shot
    assert_eq!(
        try_fire(&mut weapon, &mut control),
        FireOutcome::StartedReload
    );
    assert!(control.reloading);

    // Firing is disabled while the reload runs
    assert_eq!(try_fire(&mut weapon, &mut control), FireOutcome::Blocked);

    // Reload completes: clip refills to min(capacity, reserve)
    assert!(control.tick_reload(1.0));
    weapon.ammo.reload();
    assert_eq!(
        weapon.ammo,
        AmmoModel::ClipAndReserve {
            clip_capacity: 10,
            clip_rounds: 10,
            reserve_rounds: 80,
        }
    );
}

#[test]
fn test_dry_weapon_fire_is_silent_no_op() {
    let mut weapon = Weapon::pistol(0, 0);
    let mut control = FireControl::default();
    assert_eq!(try_fire(&mut weapon, &mut control), FireOutcome::Blocked);
}

#[test]
fn test_manual_reload_with_full_clip_is_no_op() {
    let weapon = Weapon::pistol(10, 90);
    let mut control = FireControl::default();
    assert!(!try_reload(&weapon, &mut control));
    assert!(!control.reloading);
}

// -----------------------------------------------------------------------------
// WeaponInventory tests
// -----------------------------------------------------------------------------

#[test]
fn test_equipped_is_always_a_member() {
    let mut world = World::new();
    let fists = entity(&mut world);
    let pistol = entity(&mut world);
    let rifle = entity(&mut world);

    let mut inventory = WeaponInventory::default();
    inventory.add(fists);
    assert_eq!(inventory.equipped(), Some(fists));

    inventory.add(pistol);
    inventory.add(rifle);
    assert!(inventory.contains(inventory.equipped().unwrap()));

    for _ in 0..10 {
        inventory.switch_lockout = 0.0;
        inventory.cycle();
        assert!(inventory.contains(inventory.equipped().unwrap()));
    }
}

#[test]
fn test_cycle_wraps_modulo_inventory_size() {
    let mut world = World::new();
    let fists = entity(&mut world);
    let pistol = entity(&mut world);

    let mut inventory = WeaponInventory::default();
    inventory.add(fists);
    inventory.add(pistol);
    assert_eq!(inventory.equipped(), Some(pistol));

    inventory.switch_lockout = 0.0;
    assert!(inventory.cycle());
    assert_eq!(inventory.equipped(), Some(fists));

    inventory.switch_lockout = 0.0;
    assert!(inventory.cycle());
    assert_eq!(inventory.equipped(), Some(pistol));
}

#[test]
fn test_cycle_blocked_during_switch_lockout() {
    let mut world = World::new();
    let fists = entity(&mut world);
    let pistol = entity(&mut world);

    let mut inventory = WeaponInventory::default();
    inventory.add(fists);
    inventory.add(pistol);
    inventory.switch_lockout = 0.0;

    assert!(inventory.cycle());
    // Lockout is armed; an immediate second press does nothing
    assert!(!inventory.cycle());

    inventory.tick(WEAPON_SWITCH_LOCKOUT_SECONDS + 0.01);
    assert!(inventory.cycle());
}

#[test]
fn test_fists_are_never_removable() {
    let mut world = World::new();
    let fists = entity(&mut world);

    let mut inventory = WeaponInventory::default();
    inventory.add(fists);

    // Equipped is slot zero: the drop refuses
    assert_eq!(inventory.drop_equipped(), None);
    assert!(inventory.contains(fists));
    assert_eq!(inventory.len(), 1);
}

#[test]
fn test_drop_switches_then_removes() {
    let mut world = World::new();
    let fists = entity(&mut world);
    let pistol = entity(&mut world);

    let mut inventory = WeaponInventory::default();
    inventory.add(fists);
    inventory.add(pistol);
    assert_eq!(inventory.equipped(), Some(pistol));

    let removed = inventory.drop_equipped();
    assert_eq!(removed, Some(pistol));
    assert!(!inventory.contains(pistol));
    assert_eq!(inventory.equipped(), Some(fists));
    assert!(inventory.contains(fists));
}

#[test]
fn test_add_equips_the_new_weapon() {
    let mut world = World::new();
    let fists = entity(&mut world);
    let pistol = entity(&mut world);

    let mut inventory = WeaponInventory::default();
    inventory.add(fists);
    inventory.add(pistol);
    assert_eq!(inventory.equipped(), Some(pistol));

    // Re-adding an owned weapon changes nothing
    inventory.add(pistol);
    assert_eq!(inventory.len(), 2);
}

// -----------------------------------------------------------------------------
// Weapon owner/dropped invariant
// -----------------------------------------------------------------------------

#[test]
fn test_owner_and_dropped_stay_in_lockstep() {
    let mut world = World::new();
    let player = entity(&mut world);

    let mut weapon = Weapon::pistol(10, 90);
    weapon.clear_owner();
    assert!(weapon.owner.is_none());
    assert!(weapon.dropped);

    weapon.set_owner(player);
    assert_eq!(weapon.owner, Some(player));
    assert!(!weapon.dropped);
}

// -----------------------------------------------------------------------------
// Projectile tests
// -----------------------------------------------------------------------------

#[test]
fn test_projectile_stops_at_max_range() {
    let mut world = World::new();
    let weapon = entity(&mut world);

    let mut round = Projectile::round(weapon);
    round.launch(Vec2::ZERO);

    assert!(!round.past_max_range(Vec2::new(299.0, 0.0)));
    assert!(round.past_max_range(Vec2::new(301.0, 0.0)));
}

#[test]
fn test_projectile_range_is_euclidean() {
    let mut world = World::new();
    let weapon = entity(&mut world);

    let mut round = Projectile::round(weapon);
    round.max_range = 5.0;
    round.launch(Vec2::ZERO);

    // 3-4-5 triangle: exactly at range, one step past it
    assert!(!round.past_max_range(Vec2::new(3.0, 4.0)));
    assert!(round.past_max_range(Vec2::new(3.1, 4.1)));
}

#[test]
fn test_projectile_stop_is_idempotent() {
    let mut world = World::new();
    let weapon = entity(&mut world);

    let mut round = Projectile::round(weapon);
    round.launch(Vec2::ZERO);
    assert!(round.in_flight);

    assert!(round.stop());
    assert!(!round.in_flight);

    // Second stop reports nothing to do
    assert!(!round.stop());
    assert!(!round.in_flight);
}

#[test]
fn test_projectile_relaunch_resets_origin() {
    let mut world = World::new();
    let weapon = entity(&mut world);

    let mut round = Projectile::round(weapon);
    round.launch(Vec2::new(100.0, 0.0));
    round.stop();

    round.launch(Vec2::new(500.0, 50.0));
    assert!(round.in_flight);
    assert_eq!(round.origin, Vec2::new(500.0, 50.0));
    assert!(!round.past_max_range(Vec2::new(500.0, 50.0)));
}
