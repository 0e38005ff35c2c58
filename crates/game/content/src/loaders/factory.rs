//! Content factory for building oracles from a data directory.

use std::path::PathBuf;

use combat_core::RulesConfig;

use crate::StaticCatalog;
use crate::loaders::{CatalogLoader, LoadResult, RulesLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// └── weapons.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load ruleset toggles from `rules.toml`, or defaults when it is absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(RulesConfig::default());
        }
        RulesLoader::load(&path)
    }

    /// Load the equipment catalog from `weapons.ron`.
    pub fn load_catalog(&self) -> LoadResult<StaticCatalog> {
        let path = self.data_dir.join("weapons.ron");
        CatalogLoader::load(&path)
    }
}
