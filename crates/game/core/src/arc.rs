//! Firing arcs.
//!
//! Arc membership is a pure function of the bearing from the shooter to the
//! target, measured relative to the shooter's facing (or to north for the
//! absolute arcs). Bands are inclusive and expressed in whole degrees.

use crate::hex::{Facing, Hex};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Arc {
    #[default]
    Forward,
    LeftArm,
    RightArm,
    LeftSide,
    RightSide,
    Rear,
    /// Turret or main gun mount.
    Turret,
    Full360,
    North,
    East,
    West,
}

impl Arc {
    /// Absolute arcs ignore the shooter's facing.
    pub const fn is_absolute(self) -> bool {
        matches!(self, Arc::North | Arc::East | Arc::West)
    }

    /// Whether a bearing (0..360) lies inside this arc's band.
    pub const fn contains(self, bearing: u32) -> bool {
        match self {
            Arc::Forward => bearing >= 300 || bearing <= 60,
            Arc::RightSide => bearing > 60 && bearing <= 120,
            Arc::Rear => bearing > 120 && bearing < 240,
            Arc::LeftSide => bearing >= 240 && bearing < 300,
            Arc::LeftArm => bearing >= 240 || bearing <= 60,
            Arc::RightArm => bearing >= 300 || bearing <= 120,
            Arc::Turret => bearing >= 240 || bearing <= 120,
            Arc::Full360 => true,
            Arc::North => bearing >= 270 || bearing <= 30,
            Arc::East => bearing >= 30 && bearing <= 150,
            Arc::West => bearing >= 150 && bearing <= 270,
        }
    }
}

/// Bearing from `origin` to `target` relative to `facing`, in 0..360.
pub fn relative_bearing(origin: Hex, facing: Facing, target: Hex) -> u32 {
    (origin.degree_to(target) + 360 - facing.degrees()) % 360
}

/// Whether `target` lies in `arc` of a unit at `origin` facing `facing`.
///
/// A target in the shooter's own hex is in every arc.
pub fn is_in_arc(origin: Hex, facing: Facing, target: Hex, arc: Arc) -> bool {
    if origin == target {
        return true;
    }
    let bearing = if arc.is_absolute() {
        origin.degree_to(target)
    } else {
        relative_bearing(origin, facing, target)
    };
    arc.contains(bearing)
}

/// Side of the target that an attack strikes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackDirection {
    #[default]
    Front,
    Left,
    Right,
    Rear,
}

/// Which side of a target facing `target_facing` an attack from `attacker` hits.
pub fn attack_direction(attacker: Hex, target: Hex, target_facing: Facing) -> AttackDirection {
    if attacker == target {
        return AttackDirection::Front;
    }
    let bearing = relative_bearing(target, target_facing, attacker);
    if Arc::Forward.contains(bearing) {
        AttackDirection::Front
    } else if Arc::RightSide.contains(bearing) {
        AttackDirection::Right
    } else if Arc::Rear.contains(bearing) {
        AttackDirection::Rear
    } else {
        AttackDirection::Left
    }
}
