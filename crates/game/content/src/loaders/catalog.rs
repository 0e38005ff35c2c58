//! Weapon and ammunition catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{AmmoType, WeaponType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::StaticCatalog;
use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub weapons: Vec<WeaponType>,
    #[serde(default)]
    pub ammo: Vec<AmmoType>,
}

impl CatalogFile {
    /// Reject duplicate ids and ammunition no listed weapon can load.
    pub fn validate(&self) -> LoadResult<()> {
        let mut seen = HashSet::new();
        for weapon in &self.weapons {
            if !seen.insert(weapon.id.as_str()) {
                anyhow::bail!("Duplicate weapon id '{}'", weapon.id);
            }
            if weapon.rack_size == 0 {
                anyhow::bail!("Weapon '{}' has a rack size of 0", weapon.id);
            }
        }

        let mut seen = HashSet::new();
        for ammo in &self.ammo {
            if !seen.insert(ammo.id.as_str()) {
                anyhow::bail!("Duplicate ammo id '{}'", ammo.id);
            }
            if !self.weapons.iter().any(|w| ammo.fits(w)) {
                anyhow::bail!("Ammo '{}' fits no weapon in the catalog", ammo.id);
            }
        }
        Ok(())
    }
}

/// Loader for the equipment catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse and validate a catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<StaticCatalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        file.validate()?;

        debug!(
            weapons = file.weapons.len(),
            ammo = file.ammo.len(),
            "catalog loaded"
        );
        Ok(StaticCatalog::from_parts(file.weapons, file.ammo))
    }

    /// Load a catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a [`CatalogFile`]
    pub fn load(path: &Path) -> LoadResult<StaticCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}
