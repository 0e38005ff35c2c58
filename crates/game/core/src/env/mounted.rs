//! Mounted equipment and its per-attack snapshot.

use bitflags::bitflags;

use super::{
    AmmoType, AmmoTypeId, CatalogOracle, Location, Munition, WeaponFamily, WeaponType,
    WeaponTypeId,
};
use crate::arc::Arc;
use crate::resolve::ResolveError;

/// Firing mode of a weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponMode {
    #[default]
    Single,
    /// Ultra autocannon double-rate fire.
    Ultra,
    /// Rotary autocannon with 2 to 6 shots.
    Rotary(u8),
}

impl WeaponMode {
    pub const fn shots(self) -> u32 {
        match self {
            WeaponMode::Single => 1,
            WeaponMode::Ultra => 2,
            WeaponMode::Rotary(shots) => shots as u32,
        }
    }

    pub const fn is_multi_shot(self) -> bool {
        !matches!(self, WeaponMode::Single)
    }

    /// Whether the mode is legal for a weapon family.
    pub const fn is_valid_for(self, family: WeaponFamily) -> bool {
        match self {
            WeaponMode::Single => true,
            WeaponMode::Ultra => matches!(family, WeaponFamily::Ultra),
            WeaponMode::Rotary(shots) => {
                matches!(family, WeaponFamily::Rotary) && shots >= 2 && shots <= 6
            }
        }
    }
}

bitflags! {
    /// Mutable state flags of a mounted weapon.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct MountedFlags: u8 {
        const DESTROYED = 1 << 0;
        /// Cleared at the start of the next phase.
        const JAMMED    = 1 << 1;
        const BREACHED  = 1 << 2;
        const MISSING   = 1 << 3;
        const HOTLOADED = 1 << 4;
    }
}

impl MountedFlags {
    /// Any flag that prevents firing.
    pub const INOPERABLE: Self = Self::DESTROYED
        .union(Self::JAMMED)
        .union(Self::BREACHED)
        .union(Self::MISSING);
}

/// Ammunition loaded into (or candidate for) a weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoBin {
    pub ammo: AmmoTypeId,
    pub shots_remaining: u32,
}

impl AmmoBin {
    pub fn new(ammo: impl Into<AmmoTypeId>, shots_remaining: u32) -> Self {
        Self {
            ammo: ammo.into(),
            shots_remaining,
        }
    }
}

/// One equipped weapon on a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mounted {
    pub weapon: WeaponTypeId,
    pub location: Location,
    pub arc: Arc,
    pub mode: WeaponMode,
    pub flags: MountedFlags,
    pub ammo: Option<AmmoBin>,
}

impl Mounted {
    pub fn new(weapon: impl Into<WeaponTypeId>, location: Location, arc: Arc) -> Self {
        Self {
            weapon: weapon.into(),
            location,
            arc,
            mode: WeaponMode::Single,
            flags: MountedFlags::empty(),
            ammo: None,
        }
    }

    #[must_use]
    pub fn with_ammo(mut self, bin: AmmoBin) -> Self {
        self.ammo = Some(bin);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: WeaponMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MountedFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Swap in a different ammunition bin, returning the previous one.
    pub fn load(&mut self, bin: AmmoBin) -> Option<AmmoBin> {
        self.ammo.replace(bin)
    }

    pub fn is_operable(&self) -> bool {
        !self.flags.intersects(MountedFlags::INOPERABLE)
    }

    pub fn set_jammed(&mut self) {
        self.flags.insert(MountedFlags::JAMMED);
    }

    pub fn set_destroyed(&mut self) {
        self.flags.insert(MountedFlags::DESTROYED);
    }

    /// Clear a jam at the start of a new phase.
    pub fn clear_jam(&mut self) {
        self.flags.remove(MountedFlags::JAMMED);
    }

    /// Debit up to `shots` rounds; returns the number actually spent.
    pub fn spend(&mut self, shots: u32) -> u32 {
        match self.ammo.as_mut() {
            Some(bin) => {
                let spent = shots.min(bin.shots_remaining);
                bin.shots_remaining -= spent;
                spent
            }
            None => 0,
        }
    }

    /// Capture an immutable view of the weapon for one attack.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the weapon or ammunition is not in the
    /// catalog, the loaded ammunition does not fit, or the mode is not legal
    /// for the weapon.
    pub fn snapshot<'c>(
        &self,
        catalog: &'c dyn CatalogOracle,
    ) -> Result<WeaponSnapshot<'c>, ResolveError> {
        let weapon = catalog
            .weapon(&self.weapon)
            .ok_or_else(|| ResolveError::UnknownWeapon(self.weapon.clone()))?;

        let ammo = match &self.ammo {
            Some(bin) => {
                let ammo = catalog
                    .ammo(&bin.ammo)
                    .ok_or_else(|| ResolveError::UnknownAmmo(bin.ammo.clone()))?;
                if !ammo.fits(weapon) {
                    return Err(ResolveError::AmmoMismatch {
                        weapon: weapon.id.clone(),
                        ammo: ammo.id.clone(),
                    });
                }
                Some(ammo)
            }
            None => None,
        };

        if !self.mode.is_valid_for(weapon.family) {
            return Err(ResolveError::InvalidMode {
                weapon: weapon.id.clone(),
                mode: self.mode,
            });
        }

        Ok(WeaponSnapshot {
            weapon,
            ammo,
            location: self.location,
            arc: self.arc,
            mode: self.mode,
            flags: self.flags,
            hotloaded: self.flags.contains(MountedFlags::HOTLOADED)
                && weapon.flags.contains(super::WeaponFlags::HOTLOADABLE),
            shots_remaining: self.ammo.as_ref().map(|bin| bin.shots_remaining),
        })
    }
}

/// Immutable view of a weapon captured once at the start of an attack.
///
/// Every stage of one resolution reads mode and munition from here, never
/// from the live [`Mounted`].
#[derive(Clone, Copy, Debug)]
pub struct WeaponSnapshot<'c> {
    pub weapon: &'c WeaponType,
    pub ammo: Option<&'c AmmoType>,
    pub location: Location,
    pub arc: Arc,
    pub mode: WeaponMode,
    pub flags: MountedFlags,
    pub hotloaded: bool,
    pub shots_remaining: Option<u32>,
}

impl WeaponSnapshot<'_> {
    pub fn munition(&self) -> Munition {
        self.ammo.map_or(Munition::Standard, |ammo| ammo.munition)
    }

    pub fn family(&self) -> WeaponFamily {
        self.weapon.family
    }

    /// Shots the weapon fires this attack.
    pub fn shots(&self) -> u32 {
        self.mode.shots()
    }

    pub fn is_caseless(&self) -> bool {
        self.ammo
            .is_some_and(|ammo| ammo.flags.contains(super::AmmoFlags::CASELESS))
    }
}
