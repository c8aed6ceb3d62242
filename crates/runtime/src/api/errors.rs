//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the battle engine so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::{CommandError, ErrorSeverity, GameError, InitError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a grid to be configured before building")]
    MissingGrid,

    #[error("runtime requires a roster to be configured before building")]
    MissingRoster,

    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl RuntimeError {
    /// The engine error behind this failure, if any.
    pub fn command_error(&self) -> Option<&CommandError> {
        match self {
            RuntimeError::Command(error) => Some(error),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Command(error) => error.severity(),
            RuntimeError::Init(error) => error.severity(),
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Internal,
            RuntimeError::MissingGrid | RuntimeError::MissingRoster => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Command(error) => error.error_code(),
            RuntimeError::Init(error) => error.error_code(),
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::MissingGrid => "RUNTIME_MISSING_GRID",
            RuntimeError::MissingRoster => "RUNTIME_MISSING_ROSTER",
        }
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::UnitId;

    use super::*;

    #[test]
    fn command_errors_keep_their_classification() {
        let error = RuntimeError::from(CommandError::UnitDown(UnitId(3)));
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert_eq!(error.error_code(), "COMMAND_UNIT_DOWN");
        assert_eq!(error.command_error(), Some(&CommandError::UnitDown(UnitId(3))));
    }

    #[test]
    fn plumbing_failures_are_internal() {
        assert!(RuntimeError::CommandChannelClosed.severity().is_internal());
        assert_eq!(RuntimeError::MissingRoster.severity(), ErrorSeverity::Fatal);
    }
}
