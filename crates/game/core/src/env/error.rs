//! Oracle access errors.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::hex::Hex;

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal since resolution cannot proceed without the
/// board, catalog, emitters or rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("BoardOracle not available")]
    BoardNotAvailable,

    #[error("CatalogOracle not available")]
    CatalogNotAvailable,

    #[error("EmitterOracle not available")]
    EmittersNotAvailable,

    #[error("Occupancy oracle not available")]
    OccupancyNotAvailable,

    #[error("RulesConfig not available")]
    RulesNotAvailable,

    /// A hex named by the request lies outside the board.
    #[error("hex {hex} is off the board")]
    HexOffBoard {
        hex: Hex,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            BoardNotAvailable
            | CatalogNotAvailable
            | EmittersNotAvailable
            | OccupancyNotAvailable
            | RulesNotAvailable => ErrorSeverity::Fatal,

            HexOffBoard { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            OracleError::HexOffBoard { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            BoardNotAvailable => "ORACLE_BOARD_NOT_AVAILABLE",
            CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            EmittersNotAvailable => "ORACLE_EMITTERS_NOT_AVAILABLE",
            OccupancyNotAvailable => "ORACLE_OCCUPANCY_NOT_AVAILABLE",
            RulesNotAvailable => "ORACLE_RULES_NOT_AVAILABLE",
            HexOffBoard { .. } => "ORACLE_HEX_OFF_BOARD",
        }
    }
}
