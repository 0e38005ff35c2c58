//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into a `combat-core` type: the
//! equipment catalog into a [`StaticCatalog`](crate::StaticCatalog) and the
//! ruleset toggles into a [`combat_core::RulesConfig`].

pub mod catalog;
pub mod factory;
pub mod rules;

pub use catalog::{CatalogFile, CatalogLoader};
pub use factory::ContentFactory;
pub use rules::RulesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
