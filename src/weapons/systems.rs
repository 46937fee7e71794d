//! Weapons domain: firing, reloading, inventory, and carry/drop systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{DamageEvent, Dead, Gnome};
use crate::movement::{Facing, MovementState, MovementTuning, Player, PlayerInput};
use crate::sprites::AnimationController;
use crate::weapons::components::{
    try_fire, try_reload, FireControl, FireOutcome, Weapon, WeaponInventory, WeaponKind,
};
use crate::weapons::projectile::{Projectile, ProjectilePool};

/// Where an equipped weapon rides relative to the owner, x mirrored by facing.
const HOLD_OFFSET: Vec2 = Vec2::new(16.0, -2.0);
/// Where projectiles leave from, x mirrored by facing.
const MUZZLE_OFFSET: Vec2 = Vec2::new(20.0, 2.0);

pub(crate) fn tick_weapon_state(
    time: Res<Time>,
    mut weapons: Query<(&mut Weapon, &mut FireControl)>,
    mut inventories: Query<&mut WeaponInventory>,
) {
    let dt = time.delta_secs();

    for (mut weapon, mut control) in &mut weapons {
        control.tick(dt);
        if control.tick_reload(dt) {
            let moved = weapon.ammo.reload();
            debug!("{} reloaded {} rounds", weapon.name, moved);
        }
    }

    for mut inventory in &mut inventories {
        inventory.tick(dt);
    }
}

pub(crate) fn fire_equipped(
    mut commands: Commands,
    input: Res<PlayerInput>,
    player_query: Query<(&Transform, &MovementState, &WeaponInventory), (With<Player>, Without<Dead>)>,
    mut weapons: Query<(&mut Weapon, &mut FireControl, &mut AnimationController, Option<&ProjectilePool>)>,
    mut rounds: Query<
        (&mut Projectile, &mut Transform, &mut LinearVelocity, &mut Visibility, &mut Sprite),
        Without<Player>,
    >,
) {
    if !input.fire_held {
        return;
    }

    let Ok((player_transform, movement, inventory)) = player_query.single() else {
        return;
    };
    let Some(equipped) = inventory.equipped() else {
        return;
    };
    let Ok((mut weapon, mut control, mut controller, pool)) = weapons.get_mut(equipped) else {
        return;
    };

    match try_fire(&mut weapon, &mut control) {
        FireOutcome::Fired => {}
        FireOutcome::StartedReload | FireOutcome::Blocked => return,
    }

    match weapon.kind {
        WeaponKind::Melee => {
            controller.play("fire");
            controller.restart();
            // Wake the swing sensor for the duration of the window.
            commands.entity(equipped).remove::<ColliderDisabled>();
        }
        WeaponKind::Projectile => {
            let Some(pool) = pool else {
                return;
            };
            let sign = movement.facing.sign();
            let muzzle = player_transform.translation.truncate()
                + Vec2::new(MUZZLE_OFFSET.x * sign, MUZZLE_OFFSET.y);

            for &round_entity in &pool.rounds {
                let Ok((mut round, mut transform, mut velocity, mut visibility, mut sprite)) =
                    rounds.get_mut(round_entity)
                else {
                    continue;
                };
                if round.in_flight {
                    continue;
                }

                round.launch(muzzle);
                transform.translation.x = muzzle.x;
                transform.translation.y = muzzle.y;
                velocity.x = round.speed * sign;
                velocity.y = 0.0;
                *visibility = Visibility::Visible;
                sprite.flip_x = movement.facing == Facing::Left;
                commands.entity(round_entity).remove::<ColliderDisabled>();
                break;
            }
        }
    }
}

pub(crate) fn reload_equipped(
    input: Res<PlayerInput>,
    player_query: Query<&WeaponInventory, (With<Player>, Without<Dead>)>,
    mut weapons: Query<(&Weapon, &mut FireControl)>,
) {
    if !input.reload_pressed {
        return;
    }

    let Ok(inventory) = player_query.single() else {
        return;
    };
    let Some(equipped) = inventory.equipped() else {
        return;
    };
    if let Ok((weapon, mut control)) = weapons.get_mut(equipped) {
        try_reload(weapon, &mut control);
    }
}

pub(crate) fn cycle_weapons(
    input: Res<PlayerInput>,
    mut player_query: Query<&mut WeaponInventory, (With<Player>, Without<Dead>)>,
) {
    if !input.cycle_pressed {
        return;
    }

    for mut inventory in &mut player_query {
        if inventory.cycle() {
            debug!("Switched weapon to slot {:?}", inventory.equipped());
        }
    }
}

pub(crate) fn drop_equipped_weapon(
    input: Res<PlayerInput>,
    tuning: Res<MovementTuning>,
    mut player_query: Query<(&Transform, &mut WeaponInventory), (With<Player>, Without<Weapon>, Without<Dead>)>,
    mut weapons: Query<
        (&mut Weapon, &mut Transform, &mut LinearVelocity, &mut Visibility),
        Without<Player>,
    >,
) {
    if !input.drop_pressed {
        return;
    }

    let Ok((player_transform, mut inventory)) = player_query.single_mut() else {
        return;
    };
    let Some(equipped) = inventory.equipped() else {
        return;
    };
    match weapons.get(equipped) {
        Ok((weapon, _, _, _)) if weapon.can_drop => {}
        _ => return,
    }

    let Some(removed) = inventory.drop_equipped() else {
        return;
    };
    if let Ok((mut weapon, mut transform, mut velocity, mut visibility)) = weapons.get_mut(removed)
    {
        weapon.clear_owner();
        transform.translation.x = player_transform.translation.x;
        transform.translation.y = player_transform.translation.y;
        // Pops up, then falls under gravity until the ground probe catches.
        velocity.y = tuning.gravity;
        *visibility = Visibility::Visible;
        info!("Dropped {}", weapon.name);
    }
}

pub(crate) fn pickup_weapons(
    input: Res<PlayerInput>,
    mut player_query: Query<(Entity, &mut WeaponInventory), (With<Player>, Without<Dead>)>,
    mut weapons: Query<(Entity, &mut Weapon, &CollidingEntities)>,
) {
    if !input.interact_held {
        return;
    }

    let Ok((player_entity, mut inventory)) = player_query.single_mut() else {
        return;
    };

    for (weapon_entity, mut weapon, contacts) in &mut weapons {
        if !weapon.dropped || !contacts.contains(&player_entity) {
            continue;
        }
        weapon.set_owner(player_entity);
        inventory.add(weapon_entity);
        info!("Picked up {}", weapon.name);
    }
}

/// Resolve melee swings: every gnome overlapping a live swing sensor takes
/// the weapon's damage once per swing, shoved away from the weapon.
pub(crate) fn melee_swings(
    mut damage_events: MessageWriter<DamageEvent>,
    mut weapons: Query<(Entity, &Weapon, &mut FireControl, &Transform, &CollidingEntities)>,
    gnome_query: Query<(&Gnome, &Transform), Without<Dead>>,
) {
    for (weapon_entity, weapon, mut control, weapon_transform, contacts) in &mut weapons {
        if weapon.kind != WeaponKind::Melee || !control.is_swinging() {
            continue;
        }

        for &contact in contacts.iter() {
            let Ok((gnome, gnome_transform)) = gnome_query.get(contact) else {
                continue;
            };
            if gnome.is_immune_to(weapon_entity) || control.swing_hits.contains(&contact) {
                continue;
            }

            control.swing_hits.push(contact);
            let side = if gnome_transform.translation.x >= weapon_transform.translation.x {
                1.0
            } else {
                -1.0
            };
            damage_events.write(DamageEvent {
                source: weapon_entity,
                target: contact,
                amount: weapon.damage,
                knockback: Vec2::new(side * weapon.knockback, 0.0),
            });
        }
    }
}

/// A weapon's sensor is only live while it can do something: swinging melee
/// hits gnomes, a dropped weapon waits for pickup. Everything else is off.
pub(crate) fn sync_weapon_sensors(
    mut commands: Commands,
    weapons: Query<(Entity, &Weapon, &FireControl, Has<ColliderDisabled>)>,
) {
    for (entity, weapon, control, disabled) in &weapons {
        let should_be_active =
            weapon.dropped || (weapon.kind == WeaponKind::Melee && control.is_swinging());

        if should_be_active && disabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else if !should_be_active && !disabled {
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

/// Carried weapons ride their owner; only the equipped one is shown.
pub(crate) fn weapon_follow(
    player_query: Query<
        (Entity, &Transform, &MovementState, &WeaponInventory),
        (With<Player>, Without<Weapon>),
    >,
    mut weapons: Query<
        (
            Entity,
            &Weapon,
            &FireControl,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut Sprite,
            &mut AnimationController,
        ),
        Without<Player>,
    >,
) {
    let Ok((player_entity, player_transform, movement, inventory)) = player_query.single() else {
        return;
    };
    let equipped = inventory.equipped();

    for (entity, weapon, control, mut transform, mut velocity, mut visibility, mut sprite, mut controller) in
        &mut weapons
    {
        if weapon.dropped {
            *visibility = Visibility::Visible;
            controller.play("still");
            continue;
        }
        if weapon.owner != Some(player_entity) {
            continue;
        }

        let sign = movement.facing.sign();
        transform.translation.x = player_transform.translation.x + HOLD_OFFSET.x * sign;
        transform.translation.y = player_transform.translation.y + HOLD_OFFSET.y;
        velocity.x = 0.0;
        velocity.y = 0.0;
        sprite.flip_x = movement.facing == Facing::Left;

        if equipped == Some(entity) {
            *visibility = Visibility::Visible;
            if weapon.kind == WeaponKind::Melee && control.is_swinging() {
                controller.play("fire");
            } else {
                controller.play("idle");
            }
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}
