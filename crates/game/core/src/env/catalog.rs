//! Static weapon and ammunition statistics.

use bitflags::bitflags;

use crate::range::RangeTable;

/// Catalog key of a weapon type, e.g. `"lrm_10"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeaponTypeId(pub String);

/// Catalog key of an ammunition type, e.g. `"ac_10_armor_piercing"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AmmoTypeId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(WeaponTypeId);
string_id!(AmmoTypeId);

/// Weapon family, the key for ammunition compatibility and damage rules.
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
pub enum WeaponFamily {
    Laser,
    Ppc,
    Gauss,
    MachineGun,
    Flamer,
    Autocannon,
    Ultra,
    Rotary,
    LbX,
    Lrm,
    Srm,
    Mrm,
    Artillery,
}

impl WeaponFamily {
    /// Autocannon rounds (plain, ultra, rotary and LB-X).
    pub const fn is_autocannon(self) -> bool {
        matches!(
            self,
            WeaponFamily::Autocannon
                | WeaponFamily::Ultra
                | WeaponFamily::Rotary
                | WeaponFamily::LbX
        )
    }

    pub const fn is_missile(self) -> bool {
        matches!(self, WeaponFamily::Lrm | WeaponFamily::Srm | WeaponFamily::Mrm)
    }
}

bitflags! {
    /// Static capabilities of a weapon type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct WeaponFlags: u16 {
        const INDIRECT        = 1 << 0;
        const UNDERWATER_ONLY = 1 << 1;
        /// Supports multi-shot modes and runs the jam check when using them.
        const RAPID_FIRE      = 1 << 2;
        const HOTLOADABLE     = 1 << 3;
        const ARTEMIS         = 1 << 4;
        const NARC_CAPABLE    = 1 << 5;
        const STREAK          = 1 << 6;
        /// Crew-served gun; conventional infantry suffer double minimum range.
        const FIELD_GUN       = 1 << 7;
        const INCENDIARY      = 1 << 8;
        /// Anti-infantry weapon; no open-ground doubling against infantry.
        const INFANTRY        = 1 << 9;
        /// Fires a salvo resolved on the cluster table.
        const CLUSTER         = 1 << 10;
    }
}

/// Ammunition behavior selector.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Munition {
    #[default]
    Standard,
    ArmorPiercing,
    Flechette,
    Cluster,
    Inferno,
    Flak,
    Precision,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AmmoFlags: u8 {
        const CASELESS             = 1 << 0;
        const DOUBLE_MINIMUM_RANGE = 1 << 1;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponType {
    pub id: WeaponTypeId,
    pub name: String,
    pub family: WeaponFamily,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: WeaponFlags,
    pub ranges: RangeTable,
    #[cfg_attr(feature = "serde", serde(default))]
    pub underwater_ranges: Option<RangeTable>,
    /// Damage per submunition (per missile, per pellet, per shot).
    pub damage: u32,
    /// Submunitions per salvo: missiles in a rack, pellets in an LB-X cluster
    /// round. Single-shot autocannon use it as the caliber their ammunition
    /// must match; other single-shot weapons use 1.
    pub rack_size: u32,
    /// Submunitions per damage group; 0 keeps the salvo as one group.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cluster_grouping: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heat: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub to_hit_modifier: i32,
    /// Whether the weapon draws from an ammunition bin.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses_ammo: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoType {
    pub id: AmmoTypeId,
    pub name: String,
    /// Weapon family that can load this ammunition.
    pub family: WeaponFamily,
    /// Rack size the ammunition fits; 0 fits any size of the family.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rack_size: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub munition: Munition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: AmmoFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub to_hit_modifier: i32,
    pub shots_per_ton: u32,
}

impl AmmoType {
    /// Whether a weapon of this type can load this ammunition.
    pub fn fits(&self, weapon: &WeaponType) -> bool {
        self.family == weapon.family && (self.rack_size == 0 || self.rack_size == weapon.rack_size)
    }
}

/// Lookup of static equipment statistics.
pub trait CatalogOracle {
    fn weapon(&self, id: &WeaponTypeId) -> Option<&WeaponType>;

    fn ammo(&self, id: &AmmoTypeId) -> Option<&AmmoType>;
}
