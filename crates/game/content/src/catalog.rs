//! In-memory [`combat_core::CatalogOracle`] backed by hash maps.

use std::collections::HashMap;

use combat_core::{AmmoType, AmmoTypeId, CatalogOracle, WeaponType, WeaponTypeId};

/// Weapon and ammunition statistics keyed by catalog id.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    weapons: HashMap<WeaponTypeId, WeaponType>,
    ammo: HashMap<AmmoTypeId, AmmoType>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from lists; later entries replace earlier ones with the same id.
    pub fn from_parts(
        weapons: impl IntoIterator<Item = WeaponType>,
        ammo: impl IntoIterator<Item = AmmoType>,
    ) -> Self {
        let mut catalog = Self::new();
        for weapon in weapons {
            catalog.insert_weapon(weapon);
        }
        for ammo in ammo {
            catalog.insert_ammo(ammo);
        }
        catalog
    }

    /// Returns the entry previously stored under the same id.
    pub fn insert_weapon(&mut self, weapon: WeaponType) -> Option<WeaponType> {
        self.weapons.insert(weapon.id.clone(), weapon)
    }

    pub fn insert_ammo(&mut self, ammo: AmmoType) -> Option<AmmoType> {
        self.ammo.insert(ammo.id.clone(), ammo)
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn ammo_count(&self) -> usize {
        self.ammo.len()
    }

    /// Ammunition that `weapon` can load, sorted by id.
    pub fn ammo_for(&self, weapon: &WeaponType) -> Vec<&AmmoType> {
        let mut fitting: Vec<_> = self.ammo.values().filter(|a| a.fits(weapon)).collect();
        fitting.sort_by(|a, b| a.id.cmp(&b.id));
        fitting
    }
}

impl CatalogOracle for StaticCatalog {
    fn weapon(&self, id: &WeaponTypeId) -> Option<&WeaponType> {
        self.weapons.get(id)
    }

    fn ammo(&self, id: &AmmoTypeId) -> Option<&AmmoType> {
        self.ammo.get(id)
    }
}
