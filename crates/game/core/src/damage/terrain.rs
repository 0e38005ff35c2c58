//! Damage to terrain features: clearing woods and starting fires.

use tracing::debug;

use crate::dice::DiceOracle;
use crate::env::{Munition, Terrain, TerrainTarget, WeaponFamily, WeaponFlags, WeaponSnapshot};
use crate::report::{CombatLog, Report};

/// Natural 2d6 needed for an incendiary weapon to ignite woods.
pub const IGNITION_TARGET: u32 = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainOutcome {
    pub damage: u32,
    pub remaining: u32,
    pub ignited: bool,
}

/// Apply an attack's damage to a terrain feature.
///
/// Inferno rounds and flamers ignite automatically; infernos do no clearing
/// damage. Other incendiary weapons ignite woods or jungle on 7+.
pub fn damage_terrain(
    target: &mut dyn TerrainTarget,
    amount: u32,
    weapon: &WeaponSnapshot<'_>,
    dice: &mut dyn DiceOracle,
    log: &mut CombatLog,
) -> TerrainOutcome {
    let hex = target.hex();
    let munition = weapon.munition();
    let automatic = munition == Munition::Inferno || weapon.family() == WeaponFamily::Flamer;

    let mut outcome = TerrainOutcome {
        remaining: target.factor(),
        ..TerrainOutcome::default()
    };

    if munition != Munition::Inferno && amount > 0 {
        outcome.damage = amount;
        outcome.remaining = target.debit(amount);
        log.push(Report::TerrainDamaged {
            hex,
            amount,
            remaining: outcome.remaining,
        });
    }

    let flammable = matches!(target.terrain(), Terrain::Woods | Terrain::Jungle);
    outcome.ignited = if automatic {
        true
    } else if flammable && weapon.weapon.flags.contains(WeaponFlags::INCENDIARY) {
        dice.d6(2) >= IGNITION_TARGET
    } else {
        false
    };

    if outcome.ignited {
        target.ignite();
        log.push(Report::Ignition { hex });
    }
    debug!(%hex, ?outcome, "terrain damaged");
    outcome
}
