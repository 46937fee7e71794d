//! Powerups domain: tests for health pack consumption rules.

use super::systems::HealthPack;
use crate::combat::Health;

#[test]
fn test_pack_heals_up_to_max() {
    let mut pack = HealthPack::new(50);
    let mut health = Health::new(80, 100);

    assert!(pack.apply(&mut health));
    assert_eq!(health.current, 100);
    assert!(pack.used);
}

#[test]
fn test_pack_not_consumed_at_full_health() {
    let mut pack = HealthPack::new(50);
    let mut health = Health::full(100);

    assert!(!pack.apply(&mut health));
    assert!(!pack.used);
    assert_eq!(health.current, 100);
}

#[test]
fn test_used_pack_never_heals_again() {
    let mut pack = HealthPack::new(25);
    let mut health = Health::new(10, 100);

    assert!(pack.apply(&mut health));
    assert_eq!(health.current, 35);

    health.take_damage(20);
    assert!(!pack.apply(&mut health));
    assert_eq!(health.current, 15);
}
