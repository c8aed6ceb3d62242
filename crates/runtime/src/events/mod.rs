//! Topic-based event bus for battle events.
//!
//! The worker drains [`tactics_core::BattleEvent`]s after every command and
//! publishes each one on the topic matching its category. Targeting queries
//! issued through the handle publish on [`Topic::Targeting`]; worker notices
//! ([`ControlEvent`]) go out on [`Topic::Battle`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ControlEvent, TargetingEvent};
