//! Data-driven combat content and loaders.
//!
//! This crate houses the static equipment catalog and provides loaders for
//! RON/TOML data files:
//! - Weapon and ammunition catalog (data-driven via RON)
//! - Ruleset toggles (data-driven via TOML)
//!
//! Content is consumed by the resolution engine through its oracle traits and
//! never appears in unit state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::StaticCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFile, CatalogLoader, ContentFactory, LoadResult, RulesLoader};
