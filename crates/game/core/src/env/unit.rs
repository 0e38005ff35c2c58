//! Capability view of a unit.
//!
//! The engine never asks what concrete kind of unit it is dealing with. It
//! asks capability questions through [`Combatant`], and each unit kind answers
//! them its own way. Most questions have a default answer so simple units only
//! implement the handful that matter to them.

use std::fmt;

use crate::hex::{Facing, Hex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u8);

/// Target category used by damage multipliers and stacking.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetClass {
    Mech,
    ProtoMech,
    Vehicle,
    BattleArmor,
    ConventionalInfantry,
    Aircraft,
}

impl TargetClass {
    pub const fn is_infantry(self) -> bool {
        matches!(
            self,
            TargetClass::BattleArmor | TargetClass::ConventionalInfantry
        )
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MoveKind {
    #[default]
    Stationary,
    Walked,
    Ran,
    Jumped,
    /// Flying infantry or VTOL movement.
    Flew,
}

/// Movement a unit made this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    pub kind: MoveKind,
    pub hexes: u32,
}

impl Movement {
    pub const STATIONARY: Self = Self {
        kind: MoveKind::Stationary,
        hexes: 0,
    };

    pub const fn new(kind: MoveKind, hexes: u32) -> Self {
        Self { kind, hexes }
    }
}

/// Body location of a mounted weapon or a hit.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum Location {
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    /// Vehicle body, infantry platoon, turret-less hull.
    Body,
    Turret,
}

impl Location {
    pub const fn is_arm(self) -> bool {
        matches!(self, Location::LeftArm | Location::RightArm)
    }

    pub const fn is_leg(self) -> bool {
        matches!(self, Location::LeftLeg | Location::RightLeg)
    }

    /// The other arm, for arm locations.
    pub const fn opposite_arm(self) -> Option<Location> {
        match self {
            Location::LeftArm => Some(Location::RightArm),
            Location::RightArm => Some(Location::LeftArm),
            _ => None,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Actuator {
    Shoulder,
    UpperArm,
    LowerArm,
    Hand,
    Hip,
    UpperLeg,
    LowerLeg,
    Foot,
}

/// Stealth to-hit modifiers per range bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StealthProfile {
    pub short: i32,
    pub medium: i32,
    pub long: i32,
    pub extreme: i32,
}

impl Default for StealthProfile {
    fn default() -> Self {
        Self {
            short: 0,
            medium: 1,
            long: 2,
            extreme: 2,
        }
    }
}

/// Capability queries the engine asks about attackers and targets.
///
/// Elevation is measured from the surface of the unit's hex: a mech standing
/// in depth-2 water has elevation -2.
pub trait Combatant {
    fn id(&self) -> UnitId;

    fn team(&self) -> TeamId;

    /// `None` while the unit is off the board or not yet placed.
    fn position(&self) -> Option<Hex>;

    fn facing(&self) -> Facing;

    fn target_class(&self) -> TargetClass;

    fn gunnery(&self) -> i32;

    fn piloting(&self) -> i32;

    fn movement(&self) -> Movement {
        Movement::STATIONARY
    }

    fn elevation(&self) -> i32 {
        0
    }

    /// Levels the unit rises above its elevation: a standing mech is 1.
    fn height(&self) -> i32 {
        if self.is_mech() && !self.is_prone() { 1 } else { 0 }
    }

    fn is_mech(&self) -> bool {
        self.target_class() == TargetClass::Mech
    }

    fn is_infantry(&self) -> bool {
        self.target_class().is_infantry()
    }

    fn is_conventional_infantry(&self) -> bool {
        self.target_class() == TargetClass::ConventionalInfantry
    }

    fn is_airborne(&self) -> bool {
        self.target_class() == TargetClass::Aircraft
    }

    fn is_submerged(&self) -> bool {
        self.elevation() + self.height() < 0
    }

    fn is_immobile(&self) -> bool {
        false
    }

    fn is_prone(&self) -> bool {
        false
    }

    fn is_hull_down(&self) -> bool {
        false
    }

    fn heat(&self) -> i32 {
        0
    }

    /// Whether heat added to the unit has any effect.
    fn tracks_heat(&self) -> bool {
        self.is_mech()
    }

    /// Active stealth armor and its modifiers.
    fn stealth(&self) -> Option<StealthProfile> {
        None
    }

    fn has_active_probe(&self) -> bool {
        false
    }

    /// Attached hostile jamming pod.
    fn has_jamming_pod(&self) -> bool {
        false
    }

    fn has_ams(&self) -> bool {
        false
    }

    fn is_narc_tagged(&self) -> bool {
        false
    }

    fn sensor_hits(&self) -> u32 {
        0
    }

    fn actuator_damaged(&self, _location: Location, _actuator: Actuator) -> bool {
        false
    }

    fn is_location_destroyed(&self, _location: Location) -> bool {
        false
    }

    /// Remaining armor as a percentage of its starting value.
    fn armor_ratio_percent(&self) -> u32 {
        100
    }

    fn tonnage(&self) -> u32 {
        0
    }
}
