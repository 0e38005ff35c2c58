//! Collaborator interfaces.
//!
//! Oracles expose the read-only facts the engine consumes: board geometry,
//! the static equipment catalog, active electronic-warfare emitters and unit
//! capabilities. Sinks receive the mutating calls issued as the final effect
//! of a resolution. [`CombatEnv`] bundles the oracles so every resolver takes
//! one argument instead of five.
mod board;
mod catalog;
mod error;
mod mounted;
mod sink;
mod unit;

pub use board::{BoardOracle, BuildingId, Terrain};
pub use catalog::{
    AmmoFlags, AmmoType, AmmoTypeId, CatalogOracle, Munition, WeaponFamily, WeaponFlags,
    WeaponType, WeaponTypeId,
};
pub use error::OracleError;
pub use mounted::{AmmoBin, Mounted, MountedFlags, WeaponMode, WeaponSnapshot};
pub use sink::{Absorber, DamageSink, Occupancy, TerrainTarget};
pub use unit::{
    Actuator, Combatant, Location, MoveKind, Movement, StealthProfile, TargetClass, TeamId, UnitId,
};

use crate::config::RulesConfig;
use crate::ecm::EmitterOracle;

/// Aggregates the read-only oracles consulted during resolution.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    board: Option<&'a dyn BoardOracle>,
    catalog: Option<&'a dyn CatalogOracle>,
    emitters: Option<&'a dyn EmitterOracle>,
    occupancy: Option<&'a dyn Occupancy>,
    rules: Option<&'a RulesConfig>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        board: Option<&'a dyn BoardOracle>,
        catalog: Option<&'a dyn CatalogOracle>,
        emitters: Option<&'a dyn EmitterOracle>,
        rules: Option<&'a RulesConfig>,
    ) -> Self {
        Self {
            board,
            catalog,
            emitters,
            occupancy: None,
            rules,
        }
    }

    pub fn with_all(
        board: &'a dyn BoardOracle,
        catalog: &'a dyn CatalogOracle,
        emitters: &'a dyn EmitterOracle,
        rules: &'a RulesConfig,
    ) -> Self {
        Self::new(Some(board), Some(catalog), Some(emitters), Some(rules))
    }

    pub fn empty() -> Self {
        Self {
            board: None,
            catalog: None,
            emitters: None,
            occupancy: None,
            rules: None,
        }
    }

    /// Attach unit occupancy, needed by attacks that displace their target.
    #[must_use]
    pub fn with_occupancy(mut self, occupancy: &'a dyn Occupancy) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    /// # Errors
    ///
    /// Returns `OracleError::BoardNotAvailable` if no board oracle was provided.
    pub fn board(&self) -> Result<&'a dyn BoardOracle, OracleError> {
        self.board.ok_or(OracleError::BoardNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog was provided.
    pub fn catalog(&self) -> Result<&'a dyn CatalogOracle, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::EmittersNotAvailable` if no emitter oracle was provided.
    pub fn emitters(&self) -> Result<&'a dyn EmitterOracle, OracleError> {
        self.emitters.ok_or(OracleError::EmittersNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::OccupancyNotAvailable` if no occupancy was attached.
    pub fn occupancy(&self) -> Result<&'a dyn Occupancy, OracleError> {
        self.occupancy.ok_or(OracleError::OccupancyNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RulesNotAvailable` if no rules were provided.
    pub fn rules(&self) -> Result<&'a RulesConfig, OracleError> {
        self.rules.ok_or(OracleError::RulesNotAvailable)
    }
}
