//! Controllers that issue battle commands on a unit's behalf.

pub mod ai;

pub use ai::{AiContext, AiDecision, AiTurn, Suspend, TurnPhase};
