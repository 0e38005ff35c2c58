//! Data-invariant violations raised during resolution.

use crate::env::{AmmoTypeId, Munition, OracleError, WeaponMode, WeaponTypeId};
use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Errors that indicate missing or inconsistent catalog data.
///
/// Rule-legality failures are never errors; they come back as an impossible
/// target number. Everything here means a table entry is missing and the
/// attack would otherwise produce silently wrong damage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("no cluster table row for a salvo of {0}")]
    MissingClusterRow(u32),

    #[error("weapon type {0} is not in the catalog")]
    UnknownWeapon(WeaponTypeId),

    #[error("ammunition type {0} is not in the catalog")]
    UnknownAmmo(AmmoTypeId),

    #[error("ammunition {ammo} does not fit weapon {weapon}")]
    AmmoMismatch {
        weapon: WeaponTypeId,
        ammo: AmmoTypeId,
    },

    #[error("weapon {weapon} has no handler for {munition} munitions")]
    UnsupportedMunition {
        weapon: WeaponTypeId,
        munition: Munition,
    },

    #[error("weapon {weapon} cannot fire in mode {mode:?}")]
    InvalidMode {
        weapon: WeaponTypeId,
        mode: WeaponMode,
    },
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ResolveError::Oracle(inner) => inner.severity(),
            _ => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            ResolveError::Oracle(inner) => inner.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        use ResolveError::*;
        match self {
            Oracle(inner) => inner.error_code(),
            MissingClusterRow(_) => "RESOLVE_MISSING_CLUSTER_ROW",
            UnknownWeapon(_) => "RESOLVE_UNKNOWN_WEAPON",
            UnknownAmmo(_) => "RESOLVE_UNKNOWN_AMMO",
            AmmoMismatch { .. } => "RESOLVE_AMMO_MISMATCH",
            UnsupportedMunition { .. } => "RESOLVE_UNSUPPORTED_MUNITION",
            InvalidMode { .. } => "RESOLVE_INVALID_MODE",
        }
    }
}
