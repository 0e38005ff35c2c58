//! Weapon state, immobility, minimum range, intrinsic and stealth modifiers.

use crate::config::RulesConfig;
use crate::env::{
    AmmoFlags, Combatant, Munition, MountedFlags, WeaponFamily, WeaponFlags, WeaponSnapshot,
};
use crate::range::{RangeBracket, RangeTable, minimum_range_penalty};
use crate::target_number::TargetNumber;

use super::AttackTarget;

/// Impossible when the weapon cannot fire at all.
pub fn weapon_state(weapon: &WeaponSnapshot<'_>) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    let flags = weapon.flags;
    let reason = if flags.contains(MountedFlags::DESTROYED) {
        Some("weapon destroyed")
    } else if flags.contains(MountedFlags::MISSING) {
        Some("weapon missing")
    } else if flags.contains(MountedFlags::BREACHED) {
        Some("weapon location breached")
    } else if flags.contains(MountedFlags::JAMMED) {
        Some("weapon jammed")
    } else if weapon.weapon.uses_ammo {
        match weapon.shots_remaining {
            None => Some("no ammunition loaded"),
            Some(0) => Some("out of ammunition"),
            Some(_) => None,
        }
    } else {
        None
    };
    if let Some(reason) = reason {
        tn.set_impossible(reason);
    }
    tn
}

/// -4 against immobile units and fixed hexes or buildings.
pub fn immobility(target: &AttackTarget<'_>) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    match target {
        AttackTarget::Hex(_) => tn.add(-4, "immobile target"),
        AttackTarget::Unit(unit) if unit.is_immobile() => tn.add(-4, "immobile target"),
        AttackTarget::Unit(_) => {}
    }
    tn
}

/// Minimum range penalty and the same-hex special cases.
pub fn minimum_range(
    attacker: &dyn Combatant,
    target: Option<&dyn Combatant>,
    distance: u32,
    weapon: &WeaponSnapshot<'_>,
    ranges: &RangeTable,
    rules: &RulesConfig,
) -> TargetNumber {
    let mut tn = TargetNumber::zero();

    if distance == 0
        && let Some(target) = target
    {
        if !attacker.is_infantry() && !target.is_infantry() {
            tn.set_impossible("cannot attack a unit in the same hex");
            return tn;
        }
        if attacker.is_conventional_infantry() {
            tn.add(-2, "point-blank infantry attack");
        }
    }

    if weapon.hotloaded && rules.hotload_waives_minimum_range {
        return tn;
    }

    let doubled = weapon
        .ammo
        .is_some_and(|ammo| ammo.flags.contains(AmmoFlags::DOUBLE_MINIMUM_RANGE))
        || (attacker.is_conventional_infantry()
            && weapon.weapon.flags.contains(WeaponFlags::FIELD_GUN));
    tn.add(
        minimum_range_penalty(distance, ranges.minimum, doubled),
        "minimum range",
    );
    tn
}

/// Accuracy built into the weapon and its ammunition.
pub fn intrinsic(weapon: &WeaponSnapshot<'_>, target: Option<&dyn Combatant>) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    tn.add(weapon.weapon.to_hit_modifier, "weapon accuracy");
    if let Some(ammo) = weapon.ammo {
        tn.add(ammo.to_hit_modifier, "ammunition accuracy");
    }
    let munition = weapon.munition();
    if munition == Munition::Cluster && weapon.family() == WeaponFamily::LbX {
        tn.add(-1, "cluster ammunition");
    }
    if munition == Munition::Flak && target.is_some_and(|t| t.is_airborne()) {
        tn.add(-2, "flak against airborne target");
    }
    tn
}

/// Stealth armor modifier for the resolved bracket.
///
/// `own_ecm_working` is only consulted when stealth depends on the target's
/// own ECM.
pub fn stealth(
    target: &dyn Combatant,
    bracket: RangeBracket,
    rules: &RulesConfig,
    own_ecm_working: impl FnOnce() -> bool,
) -> TargetNumber {
    let mut tn = TargetNumber::zero();
    let Some(profile) = target.stealth() else {
        return tn;
    };
    if rules.stealth_requires_own_ecm && !own_ecm_working() {
        return tn;
    }
    let value = match bracket {
        RangeBracket::Minimum | RangeBracket::Short => profile.short,
        RangeBracket::Medium => profile.medium,
        RangeBracket::Long => profile.long,
        RangeBracket::Extreme => profile.extreme,
        RangeBracket::Out => 0,
    };
    tn.add(value, "target stealth armor");
    tn
}
