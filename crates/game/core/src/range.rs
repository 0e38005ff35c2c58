//! Range brackets and minimum-range penalties.

use tracing::trace;

use crate::env::BoardOracle;
use crate::hex::Hex;

/// Ascending range bounds of a weapon, in hexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeTable {
    pub minimum: u32,
    pub short: u32,
    pub medium: u32,
    pub long: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extreme: Option<u32>,
}

impl RangeTable {
    pub const fn new(minimum: u32, short: u32, medium: u32, long: u32) -> Self {
        Self {
            minimum,
            short,
            medium,
            long,
            extreme: None,
        }
    }

    pub const fn with_extreme(mut self, extreme: u32) -> Self {
        self.extreme = Some(extreme);
        self
    }

    /// Upper bound of the extreme bracket.
    pub fn extreme_bound(&self, multiplier: u32) -> u32 {
        self.extreme
            .unwrap_or_else(|| self.long.max(self.medium.saturating_mul(multiplier)))
    }
}

/// Discretized range category. Ordered from closest to farthest.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RangeBracket {
    Minimum,
    Short,
    Medium,
    Long,
    Extreme,
    /// Terminal: the shot cannot be taken.
    Out,
}

impl RangeBracket {
    /// To-hit modifier for firing into this bracket. `Out` has none.
    pub const fn modifier(self) -> i32 {
        match self {
            RangeBracket::Minimum | RangeBracket::Short | RangeBracket::Out => 0,
            RangeBracket::Medium => 2,
            RangeBracket::Long => 4,
            RangeBracket::Extreme => 6,
        }
    }
}

/// Classify `distance` against a weapon's range table.
///
/// # Arguments
///
/// * `allow_extreme` - Whether the extreme bracket exists under current rules
/// * `multiplier` - Derives the extreme bound from medium range when the
///   table has no explicit one
pub fn range_bracket(
    distance: u32,
    table: &RangeTable,
    allow_extreme: bool,
    multiplier: u32,
) -> RangeBracket {
    let bracket = if distance <= table.minimum {
        RangeBracket::Minimum
    } else if distance <= table.short {
        RangeBracket::Short
    } else if distance <= table.medium {
        RangeBracket::Medium
    } else if distance <= table.long {
        RangeBracket::Long
    } else if allow_extreme && distance <= table.extreme_bound(multiplier) {
        RangeBracket::Extreme
    } else {
        RangeBracket::Out
    };
    trace!(distance, ?table, %bracket, "range bracket");
    bracket
}

/// To-hit penalty for firing inside a weapon's minimum range.
///
/// The shot stays legal; the penalty is `minimum - distance + 1`, doubled for
/// munitions and units that suffer twice.
pub fn minimum_range_penalty(distance: u32, minimum: u32, doubled: bool) -> i32 {
    if minimum == 0 || distance > minimum {
        return 0;
    }
    let penalty = (minimum - distance + 1) as i32;
    if doubled { penalty * 2 } else { penalty }
}

/// Hex distance, plus the elevation gap when both ends are in the same building.
pub fn effective_distance(
    board: &dyn BoardOracle,
    from: Hex,
    from_elevation: i32,
    to: Hex,
    to_elevation: i32,
) -> u32 {
    let distance = from.distance(to);
    match (board.building(from), board.building(to)) {
        (Some(a), Some(b)) if a == b => distance + from_elevation.abs_diff(to_elevation),
        _ => distance,
    }
}
