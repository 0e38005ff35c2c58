//! Hex stacking limits and displacement.
//!
//! Successful pushes, charges and domino effects move a unit one hex. The
//! destination has to respect the same stacking limits as ordinary movement.

use tracing::trace;

use crate::env::{BoardOracle, Combatant, Occupancy, UnitId};
use crate::hex::{Facing, Hex};

/// Infantry and battle armor units that may share one hex.
pub const MAX_INFANTRY_PER_HEX: usize = 4;

/// Why a unit may not enter a hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StackingViolation {
    /// A non-infantry ground unit already occupies the hex.
    GroundUnitPresent,
    InfantryLimit,
    EnemyPresent,
}

/// Check whether `entering` may join `occupants` in `hex`.
///
/// Airborne units neither count nor are restricted. Enemy units may share a
/// hex only when both are infantry inside a building.
pub fn stacking_violation(
    occupants: &[&dyn Combatant],
    entering: &dyn Combatant,
    hex: Hex,
    board: &dyn BoardOracle,
) -> Option<StackingViolation> {
    if entering.is_airborne() {
        return None;
    }
    let ground = occupants
        .iter()
        .filter(|unit| unit.id() != entering.id() && !unit.is_airborne());

    let mut infantry = 0;
    for unit in ground {
        if unit.team() != entering.team() {
            let sheltered =
                unit.is_infantry() && entering.is_infantry() && board.building(hex).is_some();
            if !sheltered {
                return Some(StackingViolation::EnemyPresent);
            }
        }
        if unit.is_infantry() {
            infantry += 1;
        } else if !entering.is_infantry() {
            return Some(StackingViolation::GroundUnitPresent);
        }
    }

    if entering.is_infantry() && infantry >= MAX_INFANTRY_PER_HEX {
        return Some(StackingViolation::InfantryLimit);
    }
    None
}

/// Where a displaced unit ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Displacement {
    /// Moves into a legal hex; `fall` when it drops two or more levels.
    Clear { to: Hex, fall: bool },
    /// Moves into an occupied hex, and `occupant` must be displaced in turn.
    Domino { to: Hex, occupant: UnitId },
}

impl Displacement {
    pub fn to(&self) -> Hex {
        match self {
            Displacement::Clear { to, .. } | Displacement::Domino { to, .. } => *to,
        }
    }
}

/// Facings tried for a displacement: straight ahead, then alternating
/// clockwise and counter-clockwise.
fn candidate_facings(direction: Facing) -> [Facing; 6] {
    [0, 1, -1, 2, -2, 3].map(|steps| direction.rotate(steps))
}

/// Find the hex a unit is displaced into from `from`, preferring `direction`.
///
/// A candidate must be on the board, at most one level above `from` and free
/// of stacking violations. When none qualifies, the unit is pushed into the
/// preferred hex anyway and its occupant becomes a domino. `None` when the
/// preferred hex is off the board, too high or holds no ground unit.
pub fn displacement(
    board: &dyn BoardOracle,
    occupancy: &dyn Occupancy,
    unit: &dyn Combatant,
    from: Hex,
    direction: Facing,
) -> Option<Displacement> {
    let origin = board.level(from);
    let candidates = candidate_facings(direction).map(|facing| from.neighbor(facing));
    let reachable = |to: Hex| board.contains(to) && board.level(to) <= origin + 1;

    for to in candidates {
        if !reachable(to) {
            continue;
        }
        let occupants = occupancy.occupants(to);
        if stacking_violation(&occupants, unit, to, board).is_none() {
            let fall = origin - board.level(to) >= 2;
            trace!(unit = %unit.id(), %from, %to, fall, "displaced");
            return Some(Displacement::Clear { to, fall });
        }
    }

    let preferred = candidates[0];
    if !reachable(preferred) {
        return None;
    }
    let occupant = occupancy
        .occupants(preferred)
        .into_iter()
        .find(|occupant| occupant.id() != unit.id() && !occupant.is_airborne())?;
    trace!(unit = %unit.id(), %from, to = %preferred, occupant = %occupant.id(), "domino");
    Some(Displacement::Domino {
        to: preferred,
        occupant: occupant.id(),
    })
}
