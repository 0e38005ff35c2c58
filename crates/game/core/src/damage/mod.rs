//! Damage and absorption.
//!
//! Turns a hit count into per-location damage events: the salvo is split into
//! damage groups, each group is scaled by the ammunition multiplier, sent to a
//! hit location chosen by the target, and routed through any structure
//! standing between the attacker and the target.

mod absorb;
mod jam;
mod multiplier;
mod terrain;

pub use absorb::{Absorption, absorb, absorption_capacity};
pub use jam::{FiringCheck, JamOutcome, firing_check, jam_check, jam_threshold};
pub use multiplier::{
    Multiplier, armor_piercing_critical_modifier, damage_multiplier, supports_munition,
};
pub use terrain::{IGNITION_TARGET, TerrainOutcome, damage_terrain};

use crate::arc::AttackDirection;
use crate::dice::DiceOracle;
use crate::env::{
    Absorber, DamageSink, Location, Munition, WeaponFamily, WeaponFlags, WeaponSnapshot,
};
use crate::report::{CombatLog, Report};

/// How a weapon's fire breaks down into submunitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Salvo {
    /// Submunitions fired.
    pub count: u32,
    pub damage_each: u32,
    /// Submunitions per damage group; 0 keeps all hits in one group.
    pub grouping: u32,
    /// Whether the hit count comes from the cluster table.
    pub clustered: bool,
}

impl Salvo {
    pub fn total_damage(&self, hits: u32) -> u32 {
        hits * self.damage_each
    }
}

/// Break a weapon's fire into submunitions.
pub fn salvo(weapon: &WeaponSnapshot<'_>) -> Salvo {
    let stats = weapon.weapon;
    let munition = weapon.munition();

    if stats.family == WeaponFamily::LbX && matches!(munition, Munition::Cluster | Munition::Flak) {
        return Salvo {
            count: stats.rack_size,
            damage_each: 1,
            grouping: 1,
            clustered: true,
        };
    }
    if weapon.mode.is_multi_shot() {
        let shots = weapon.shots();
        return Salvo {
            count: shots,
            damage_each: stats.damage,
            grouping: 1,
            clustered: shots > 1,
        };
    }
    if stats.flags.contains(WeaponFlags::CLUSTER) {
        return Salvo {
            count: stats.rack_size,
            damage_each: stats.damage,
            grouping: stats.cluster_grouping,
            clustered: stats.rack_size > 1,
        };
    }
    Salvo {
        count: 1,
        damage_each: stats.damage,
        grouping: 0,
        clustered: false,
    }
}

/// Damage per group for `hits` submunitions.
pub fn group_damage(hits: u32, damage_each: u32, grouping: u32) -> Vec<u32> {
    if hits == 0 {
        return Vec::new();
    }
    let size = if grouping == 0 { hits } else { grouping };
    let mut groups = vec![size * damage_each; (hits / size) as usize];
    let rest = hits % size;
    if rest > 0 {
        groups.push(rest * damage_each);
    }
    groups
}

/// Damage landing on one location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEvent {
    pub location: Location,
    /// Damage that reaches the unit.
    pub amount: u32,
    /// Damage soaked by an intervening structure.
    pub absorbed: u32,
    pub critical_modifier: Option<i32>,
}

/// Where damage may be soaked by a structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shielding {
    #[default]
    None,
    /// Target inside the structure: every hit passes through it.
    Inside,
    /// Structure gives partial cover: only leg hits pass through it.
    LegCover,
}

impl Shielding {
    fn covers(self, location: Location) -> bool {
        match self {
            Shielding::None => false,
            Shielding::Inside => true,
            Shielding::LegCover => location.is_leg(),
        }
    }
}

/// Per-attack inputs to damage distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Distribution {
    pub salvo: Salvo,
    pub multiplier: Multiplier,
    pub critical_modifier: Option<i32>,
    pub direction: AttackDirection,
    pub shielding: Shielding,
}

/// Build one event per damage group, choosing locations and routing damage
/// through the shielding structure.
pub fn distribute(
    hits: u32,
    plan: &Distribution,
    sink: &mut dyn DamageSink,
    mut structure: Option<&mut dyn Absorber>,
    dice: &mut dyn DiceOracle,
    log: &mut CombatLog,
) -> Vec<DamageEvent> {
    let mut events = Vec::new();
    for raw in group_damage(hits, plan.salvo.damage_each, plan.salvo.grouping) {
        let amount = plan.multiplier.apply(raw);
        if amount == 0 {
            continue;
        }
        let location = sink.hit_location(dice, plan.direction);

        let split = match structure.as_deref_mut() {
            Some(absorber) if plan.shielding.covers(location) => {
                let split = absorb(amount, absorber);
                if split.absorbed > 0 {
                    log.push(Report::Absorbed {
                        amount: split.absorbed,
                        remaining: absorber.construction_factor(),
                    });
                }
                split
            }
            _ => Absorption {
                absorbed: 0,
                passed: amount,
            },
        };

        events.push(DamageEvent {
            location,
            amount: split.passed,
            absorbed: split.absorbed,
            critical_modifier: plan.critical_modifier,
        });
    }
    events
}

/// Issue the mutating calls for a set of events.
pub fn apply_damage(events: &[DamageEvent], sink: &mut dyn DamageSink, log: &mut CombatLog) {
    for event in events.iter().filter(|e| e.amount > 0) {
        sink.damage(event.location, event.amount, event.critical_modifier);
        log.push(Report::Damage {
            location: event.location,
            amount: event.amount,
        });
    }
}

/// Critical modifier attached to every hit of an armor-piercing round.
pub fn critical_modifier(weapon: &WeaponSnapshot<'_>) -> Option<i32> {
    (weapon.munition() == Munition::ArmorPiercing)
        .then(|| armor_piercing_critical_modifier(weapon.weapon.damage))
}
