//! Common error infrastructure for combat-core.
//!
//! This module provides shared types and traits used across all error types in
//! the crate. Domain errors ([`crate::env::OracleError`],
//! [`crate::resolve::ResolveError`]) live next to the code that raises them.
//!
//! Rule-legality failures (no line of sight, out of range, wrong arc) are not
//! errors at all: they surface as [`crate::Resolution::Impossible`]. Errors are
//! reserved for missing collaborators and catalog data that cannot be right.

use crate::env::UnitId;
use crate::hex::Hex;

/// How bad an error is, for callers deciding whether to retry or report.
///
/// - **Recoverable**: the same request may succeed with different inputs
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: catalog or table data inconsistent with the rules
/// - **Fatal**: a required collaborator is missing entirely
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    /// Indicates a missing table entry or catalog bug; must be investigated.
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Lowercase label for logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Bad data or a missing collaborator rather than a bad request.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Where an error happened: the attacking unit and the hex involved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub attacker: Option<UnitId>,

    pub hex: Option<Hex>,

    /// What the engine was doing.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attacker: None,
            hex: None,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_attacker(mut self, attacker: UnitId) -> Self {
        self.attacker = Some(attacker);
        self
    }

    #[must_use]
    pub const fn with_hex(mut self, hex: Hex) -> Self {
        self.hex = Some(hex);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Shared surface of the crate's error enums.
///
/// Enums derive `thiserror::Error` and carry an [`ErrorContext`] only on
/// variants raised from a specific attack.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable identifier such as `ORACLE_BOARD_NOT_AVAILABLE`. Falls back to
    /// the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
