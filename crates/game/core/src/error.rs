//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (placement, commands, initialization) live next to
//! the code that produces them. This module holds the shared classification
//! used by the runtime to decide how loudly to report a failure.
//!
//! Expected game-flow outcomes (a miss, a target already down) are never
//! errors; they are reported through the command's success value.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The command can be retried with different input (blocked cell, out of range).
    Recoverable,

    /// Invalid input for the current battle phase or unit (wrong turn, unknown unit).
    Validation,

    /// Unexpected state inconsistency, e.g. occupancy out of sync with unit positions.
    Internal,

    /// The battle cannot be built or continued (no grid attached).
    Fatal,
}

impl ErrorSeverity {
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

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant, suitable for
    /// metrics and assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
