//! Async orchestration for a `tactics-core` battle.
//!
//! A single worker task owns the [`tactics_core::Battle`].
//! Clients talk to it through [`BattleHandle`], which sends commands over a
//! channel and awaits replies; events come back on per-topic broadcast
//! channels. AI-controlled turns run on the same task with pacing delays and
//! animated movement as explicit suspension points, so turns never overlap.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`providers`] holds the AI policy and turn procedure
//! - [`config`] loads runtime settings from the environment
pub mod api;
pub mod config;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    BattleHandle, InstantAnimator, MovementAnimator, PacedAnimator, Result, RuntimeError,
};
pub use config::{PacingConfig, RuntimeConfig};
pub use events::{ControlEvent, Event, EventBus, TargetingEvent, Topic};
pub use providers::{AiContext, AiDecision, AiTurn, Suspend, TurnPhase};
pub use runtime::{Runtime, RuntimeBuilder};
