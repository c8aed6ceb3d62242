//! Background tasks owned by the runtime.

mod battle;

pub use battle::{BattleWorker, Command};
