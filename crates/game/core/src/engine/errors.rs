//! Error types for battle construction and commands.

use super::BattleState;
use crate::env::SpellId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PlacementError, Position, UnitId};
use crate::stats::PoolKind;

/// Command names used in phase errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    Initialize,
    Deploy,
    StartBattle,
    EndTurn,
    Move,
    UndoMove,
    Attack,
    CastSpell,
}

/// Fatal configuration errors raised while building a [`super::Battle`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitError {
    #[error("no grid attached to the battle")]
    MissingGrid,

    #[error("grid has no cells ({width}x{height})")]
    EmptyGrid { width: u32, height: u32 },
}

impl GameError for InitError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingGrid => "INIT_MISSING_GRID",
            Self::EmptyGrid { .. } => "INIT_EMPTY_GRID",
        }
    }
}

/// Errors surfaced by battle commands.
///
/// A failed command never mutates state. Expected outcomes such as a miss
/// or a target that is already down are reported through the success value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("{command} is not allowed during {state}")]
    InvalidPhase {
        command: CommandKind,
        state: BattleState,
    },

    #[error("roster is empty")]
    EmptyRoster,

    #[error("unit {0} appears twice in the roster")]
    DuplicateUnit(UnitId),

    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("unit {0} is down")]
    UnitDown(UnitId),

    #[error("it is not {unit}'s turn (active: {active:?})")]
    NotYourTurn {
        unit: UnitId,
        active: Option<UnitId>,
    },

    #[error("unit {0} cannot be deployed by the player")]
    NotDeployable(UnitId),

    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),

    #[error("{destination} is not reachable by {unit}")]
    Unreachable { unit: UnitId, destination: Position },

    #[error("{unit} needs {needed} {pool} but has {available}")]
    InsufficientResources {
        unit: UnitId,
        pool: PoolKind,
        needed: u32,
        available: u32,
    },

    #[error("{target} is out of range for {unit}")]
    OutOfRange { unit: UnitId, target: Position },

    #[error("{unit} has no line of sight to {target}")]
    NoLineOfSight { unit: UnitId, target: Position },

    #[error("{target} is not a valid target for {unit}")]
    InvalidTarget { unit: UnitId, target: UnitId },

    #[error("nothing at {position} to target")]
    NoTargetAt { position: Position },

    #[error("{unit} does not know {spell}")]
    UnknownSpell { unit: UnitId, spell: SpellId },

    #[error("{spell} is on cooldown for {remaining} more turns")]
    SpellOnCooldown { spell: SpellId, remaining: u32 },

    #[error("{0} has no move to undo")]
    NothingToUndo(UnitId),

    #[error("{0} already acted this turn; moves can no longer be undone")]
    UndoLocked(UnitId),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidPhase { .. }
            | Self::EmptyRoster
            | Self::DuplicateUnit(_)
            | Self::UnknownUnit(_)
            | Self::UnitDown(_)
            | Self::NotYourTurn { .. }
            | Self::NotDeployable(_)
            | Self::UnknownSpell { .. } => ErrorSeverity::Validation,

            Self::Placement(error) => error.severity(),

            Self::Unreachable { .. }
            | Self::InsufficientResources { .. }
            | Self::OutOfRange { .. }
            | Self::NoLineOfSight { .. }
            | Self::InvalidTarget { .. }
            | Self::NoTargetAt { .. }
            | Self::SpellOnCooldown { .. }
            | Self::NothingToUndo(_)
            | Self::UndoLocked(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPhase { .. } => "COMMAND_INVALID_PHASE",
            Self::EmptyRoster => "COMMAND_EMPTY_ROSTER",
            Self::DuplicateUnit(_) => "COMMAND_DUPLICATE_UNIT",
            Self::UnknownUnit(_) => "COMMAND_UNKNOWN_UNIT",
            Self::UnitDown(_) => "COMMAND_UNIT_DOWN",
            Self::NotYourTurn { .. } => "COMMAND_NOT_YOUR_TURN",
            Self::NotDeployable(_) => "COMMAND_NOT_DEPLOYABLE",
            Self::Placement(error) => error.error_code(),
            Self::Unreachable { .. } => "COMMAND_UNREACHABLE",
            Self::InsufficientResources { .. } => "COMMAND_INSUFFICIENT_RESOURCES",
            Self::OutOfRange { .. } => "COMMAND_OUT_OF_RANGE",
            Self::NoLineOfSight { .. } => "COMMAND_NO_LINE_OF_SIGHT",
            Self::InvalidTarget { .. } => "COMMAND_INVALID_TARGET",
            Self::NoTargetAt { .. } => "COMMAND_NO_TARGET_AT",
            Self::UnknownSpell { .. } => "COMMAND_UNKNOWN_SPELL",
            Self::SpellOnCooldown { .. } => "COMMAND_SPELL_ON_COOLDOWN",
            Self::NothingToUndo(_) => "COMMAND_NOTHING_TO_UNDO",
            Self::UndoLocked(_) => "COMMAND_UNDO_LOCKED",
        }
    }
}
