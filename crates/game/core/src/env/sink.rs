//! Mutable collaborators the engine issues damage calls to.
//!
//! The engine never owns units, buildings or terrain. It reads from them and
//! issues single mutating calls through these traits.

use super::{Combatant, Location, Terrain};
use crate::arc::AttackDirection;
use crate::dice::DiceOracle;
use crate::hex::Hex;

/// Receiver of damage for a unit target.
pub trait DamageSink {
    /// Roll a hit location on the unit's hit-location table.
    fn hit_location(&mut self, dice: &mut dyn DiceOracle, direction: AttackDirection) -> Location;

    /// Apply damage to one location.
    ///
    /// `critical_modifier` is set for rounds that force a critical-chance roll
    /// with the given modifier.
    fn damage(&mut self, location: Location, amount: u32, critical_modifier: Option<i32>);

    fn add_heat(&mut self, _heat: u32) {}

    /// Set fire to the hex the unit stands in.
    fn ignite_hex(&mut self, _hex: Hex) {}
}

/// Structure that soaks up part of the damage aimed through or into it.
pub trait Absorber {
    /// Remaining construction factor.
    fn construction_factor(&self) -> u32;

    /// Fraction of the construction factor available to absorb damage,
    /// as `(numerator, denominator)`.
    fn damage_scale(&self) -> (u32, u32) {
        (1, 1)
    }

    /// Reduce the construction factor.
    fn debit(&mut self, amount: u32);
}

/// Terrain feature attacked directly (clearing woods, setting fires).
pub trait TerrainTarget {
    fn hex(&self) -> Hex;

    fn terrain(&self) -> Terrain;

    /// Remaining damage the feature takes before it is cleared.
    fn factor(&self) -> u32;

    /// Reduce the factor; returns what remains.
    fn debit(&mut self, amount: u32) -> u32;

    fn ignite(&mut self);
}

/// Which units stand in each hex.
pub trait Occupancy {
    fn occupants(&self, hex: Hex) -> Vec<&dyn Combatant>;
}
