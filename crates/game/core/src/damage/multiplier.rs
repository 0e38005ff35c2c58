//! Ammunition damage multipliers.
//!
//! Each rule is a narrow entry keyed by weapon family, munition and target
//! class. Multipliers are exact fractions and round half up when applied.

use std::fmt;

use crate::env::{Munition, TargetClass, WeaponFamily, WeaponFlags, WeaponType};
use crate::resolve::ResolveError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Multiplier {
    pub num: u32,
    pub den: u32,
}

impl Multiplier {
    pub const ZERO: Self = Self::new(0, 1);
    pub const HALF: Self = Self::new(1, 2);
    pub const ONE: Self = Self::new(1, 1);
    pub const THREE_HALVES: Self = Self::new(3, 2);
    pub const DOUBLE: Self = Self::new(2, 1);

    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Scale `amount`, rounding half up.
    pub fn apply(self, amount: u32) -> u32 {
        if self.den == 0 {
            return 0;
        }
        let scaled = u64::from(amount) * u64::from(self.num) * 2 + u64::from(self.den);
        (scaled / (2 * u64::from(self.den))) as u32
    }

    pub fn as_f64(self) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            f64::from(self.num) / f64::from(self.den)
        }
    }

    pub fn is_zero(self) -> bool {
        self.num == 0
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "x{}", self.num)
        } else {
            write!(f, "x{}/{}", self.num, self.den)
        }
    }
}

/// Whether a weapon family has a handler for a munition.
pub fn supports_munition(family: WeaponFamily, munition: Munition) -> bool {
    use WeaponFamily::*;
    match munition {
        Munition::Standard => true,
        Munition::ArmorPiercing | Munition::Precision => {
            matches!(family, Autocannon | Ultra | Rotary)
        }
        Munition::Flechette => family.is_autocannon(),
        Munition::Cluster => matches!(family, LbX | Artillery),
        Munition::Inferno => family == Srm,
        Munition::Flak => family.is_autocannon() || family == Artillery,
    }
}

/// Damage multiplier for a munition fired from `weapon` at a target class.
///
/// `target` is `None` for hexes and buildings. `in_open` marks infantry
/// caught without building or woods cover.
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedMunition`] when the weapon family has no
/// handler for the munition.
pub fn damage_multiplier(
    weapon: &WeaponType,
    munition: Munition,
    target: Option<TargetClass>,
    in_open: bool,
) -> Result<Multiplier, ResolveError> {
    if !supports_munition(weapon.family, munition) {
        return Err(ResolveError::UnsupportedMunition {
            weapon: weapon.id.clone(),
            munition,
        });
    }
    let Some(class) = target else {
        return Ok(match munition {
            Munition::Inferno | Munition::Flechette => Multiplier::ZERO,
            _ => Multiplier::ONE,
        });
    };

    use TargetClass::*;
    let multiplier = match (munition, class) {
        (Munition::ArmorPiercing, ConventionalInfantry) => Multiplier::HALF,
        (Munition::Flechette, ConventionalInfantry) => Multiplier::DOUBLE,
        (Munition::Flechette, BattleArmor) => Multiplier::HALF,
        (Munition::Flechette, Mech | Vehicle | ProtoMech) => Multiplier::ZERO,
        (Munition::Inferno, ConventionalInfantry) => Multiplier::DOUBLE,
        (Munition::Inferno, _) => Multiplier::ZERO,
        (Munition::Standard | Munition::Cluster | Munition::Precision, ConventionalInfantry)
            if in_open && !weapon.flags.contains(WeaponFlags::INFANTRY) =>
        {
            Multiplier::DOUBLE
        }
        _ => Multiplier::ONE,
    };
    Ok(multiplier)
}

/// Critical-chance modifier carried by armor-piercing autocannon rounds.
pub fn armor_piercing_critical_modifier(damage: u32) -> i32 {
    match damage {
        0..=2 => -4,
        3..=5 => -3,
        6..=10 => -2,
        _ => -1,
    }
}
