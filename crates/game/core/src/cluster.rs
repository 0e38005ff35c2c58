//! Cluster hit table.
//!
//! Salvo weapons (missile racks, LB-X cluster rounds, multi-shot autocannon)
//! roll on a fixed table to see how many submunitions connect. Rows exist only
//! for canonical salvo sizes; other sizes use the next larger row and are
//! capped at the salvo size.

use tracing::trace;

use crate::config::RulesConfig;
use crate::dice::DiceOracle;
use crate::env::{Combatant, WeaponFlags, WeaponSnapshot};
use crate::resolve::ResolveError;
use crate::target_number::{Modifier, TWO_D6_WAYS};

/// Rows keyed by salvo size; column `i` is the hit count for a modified roll
/// of `i + 1`. The roll-1 column is only reachable with the advanced floor.
static CLUSTER_TABLE: [(u32, [u32; 12]); 11] = [
    (2, [1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2]),
    (3, [1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3]),
    (4, [1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4]),
    (5, [1, 1, 2, 2, 3, 3, 3, 3, 4, 4, 5, 5]),
    (6, [1, 2, 2, 3, 3, 4, 4, 4, 5, 5, 6, 6]),
    (8, [2, 3, 3, 4, 4, 5, 5, 5, 6, 6, 8, 8]),
    (9, [2, 3, 3, 4, 5, 5, 5, 5, 7, 7, 9, 9]),
    (10, [2, 3, 3, 4, 6, 6, 6, 6, 8, 8, 10, 10]),
    (12, [3, 4, 4, 5, 8, 8, 8, 8, 10, 10, 12, 12]),
    (15, [4, 5, 5, 6, 9, 9, 9, 9, 12, 12, 15, 15]),
    (20, [5, 6, 6, 9, 12, 12, 12, 12, 16, 16, 20, 20]),
];

/// Largest salvo the table covers.
pub const MAX_CLUSTER_SIZE: u32 = 20;

/// How a cluster roll is made.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterOptions {
    /// Clamp the modified roll at 1 instead of 2.
    pub advanced_floor: bool,
    /// Roll three dice and keep the two lowest.
    pub hotloaded: bool,
}

impl ClusterOptions {
    /// Options for a roll under `rules`, hot-loaded or not.
    pub fn from_rules(rules: &RulesConfig, hotloaded: bool) -> Self {
        Self {
            advanced_floor: rules.advanced_cluster_floor,
            hotloaded,
        }
    }

    /// Lowest value a modified cluster roll can take.
    pub const fn floor(&self) -> u32 {
        if self.advanced_floor { 1 } else { 2 }
    }
}

/// Outcome of one cluster roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterRoll {
    /// Natural dice total before modifiers.
    pub roll: u32,
    pub modifier: i32,
    pub hits: u32,
}

fn row(size: u32) -> Result<&'static [u32; 12], ResolveError> {
    CLUSTER_TABLE
        .iter()
        .find(|(row_size, _)| *row_size >= size)
        .map(|(_, row)| row)
        .ok_or(ResolveError::MissingClusterRow(size))
}

/// Hits for a salvo of `size` given a natural roll. Pure.
///
/// # Errors
///
/// Returns [`ResolveError::MissingClusterRow`] for salvos larger than the
/// table.
pub fn cluster_hits_for_roll(
    size: u32,
    roll: u32,
    modifier: i32,
    floor: u32,
) -> Result<u32, ResolveError> {
    if size == 0 {
        return Ok(0);
    }
    let row = row(size)?;
    let modified = (roll as i32 + modifier).clamp(floor as i32, 12) as usize;
    Ok(row[modified - 1].min(size))
}

/// Roll the dice and look up the hit count.
///
/// # Errors
///
/// Returns [`ResolveError::MissingClusterRow`] for salvos larger than the
/// table.
pub fn cluster_hits(
    size: u32,
    modifier: i32,
    options: ClusterOptions,
    dice: &mut dyn DiceOracle,
) -> Result<ClusterRoll, ResolveError> {
    let roll = if options.hotloaded {
        let mut faces = dice.d6_each(3);
        faces.sort_unstable();
        faces[0] + faces[1]
    } else {
        dice.d6(2)
    };
    let hits = cluster_hits_for_roll(size, roll, modifier, options.floor())?;
    trace!(size, roll, modifier, hits, "cluster roll");
    Ok(ClusterRoll {
        roll,
        modifier,
        hits,
    })
}

/// Ways (out of 36, or 216 when hot-loaded) to make each natural total 0..=12.
pub fn roll_distribution(hotloaded: bool) -> ([u32; 13], u32) {
    if !hotloaded {
        return (TWO_D6_WAYS, 36);
    }
    let mut ways = [0u32; 13];
    for a in 1..=6u32 {
        for b in 1..=6u32 {
            for c in 1..=6u32 {
                let mut faces = [a, b, c];
                faces.sort_unstable();
                ways[(faces[0] + faces[1]) as usize] += 1;
            }
        }
    }
    (ways, 216)
}

/// Mean hit count for a salvo over every possible roll.
///
/// # Errors
///
/// Returns [`ResolveError::MissingClusterRow`] for salvos larger than the
/// table.
pub fn expected_cluster_hits(
    size: u32,
    modifier: i32,
    options: ClusterOptions,
) -> Result<f64, ResolveError> {
    let (ways, total) = roll_distribution(options.hotloaded);
    let mut sum = 0.0;
    for (roll, &count) in ways.iter().enumerate().skip(2) {
        if count > 0 {
            let hits = cluster_hits_for_roll(size, roll as u32, modifier, options.floor())?;
            sum += f64::from(hits) * f64::from(count);
        }
    }
    Ok(sum / f64::from(total))
}

/// Modifiers to the cluster roll for a weapon fired at a target.
///
/// Guidance bonuses (Artemis, Narc) are denied while the attacker is jammed.
/// Anti-missile systems on the target subtract 4 from missile salvos.
pub fn cluster_roll_modifiers(
    weapon: &WeaponSnapshot<'_>,
    target: Option<&dyn Combatant>,
    attacker_jammed: bool,
) -> Vec<Modifier> {
    let mut modifiers = Vec::new();
    let flags = weapon.weapon.flags;
    if !attacker_jammed {
        if flags.contains(WeaponFlags::ARTEMIS) {
            modifiers.push(Modifier::new(2, "artemis guidance"));
        }
        if flags.contains(WeaponFlags::NARC_CAPABLE)
            && target.is_some_and(|t| t.is_narc_tagged())
        {
            modifiers.push(Modifier::new(2, "narc beacon"));
        }
    }
    if weapon.family().is_missile() && target.is_some_and(|t| t.has_ams()) {
        modifiers.push(Modifier::new(-4, "anti-missile system"));
    }
    modifiers
}
