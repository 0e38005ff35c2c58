//! Ruleset toggle loader.

use std::path::Path;

use combat_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
///
/// Keys left out of the file keep their [`RulesConfig::default`] values.
pub struct RulesLoader;

impl RulesLoader {
    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let rules: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        if rules.extreme_range_multiplier == 0 {
            anyhow::bail!("extreme_range_multiplier must be at least 1");
        }
        Ok(rules)
    }

    /// Load ruleset toggles from a TOML file.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}
