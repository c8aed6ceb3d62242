use serde::{Deserialize, Serialize};

use tactics_core::{Position, UnitId};

/// Results of read-only reach queries, published for presentation layers
/// that highlight cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingEvent {
    /// Cells a unit can move to, start cell included.
    RangeComputed { unit: UnitId, cells: Vec<Position> },
    /// Hostile units a unit can attack right now.
    TargetsComputed { unit: UnitId, targets: Vec<UnitId> },
}

impl TargetingEvent {
    pub fn unit(&self) -> UnitId {
        match self {
            TargetingEvent::RangeComputed { unit, .. } | TargetingEvent::TargetsComputed { unit, .. } => *unit,
        }
    }
}

/// Notices from the worker about how it is driving the battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// A full cycle of AI turns left every unit unchanged, so the worker
    /// stopped playing AI turns. Ending the turn through the handle resumes.
    AiStalled { turn: u32, active: Option<UnitId> },
}
