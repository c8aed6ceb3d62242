//! Priority-driven AI for enemy (or autonomous) units.
//!
//! A turn is split in two layers:
//!
//! 1. **Decision**: a behavior tree ([`policy`]) evaluated over an
//!    [`AiContext`] picks exactly one [`AiDecision`]: cast, attack, move,
//!    or end the turn.
//! 2. **Sequencing**: [`AiTurn`] is an explicit phase machine that executes
//!    decisions against the battle and yields a [`Suspend`] whenever the
//!    caller has to wait (pacing delay, movement animation).
//!
//! Decisions never hold a borrow of the battle across a suspension point.

pub mod context;
pub mod nodes;
pub mod policy;
pub mod turn;

pub use context::{AiContext, AiDecision};
pub use policy::{decide, policy};
pub use turn::{AiTurn, Suspend, TurnPhase};
