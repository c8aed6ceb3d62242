//! Lightweight behavior tree library for turn-based decision making.
//!
//! - **No delta time**: every tick completes immediately
//! - **No Running state**: nodes succeed or fail; long-running work (movement
//!   animation, pacing) is driven by the caller after a decision is made
//! - **Borrowing contexts**: nodes are boxed as [`Node<'n, C>`] so a tree can
//!   run over a context that borrows live state
//! - **Zero dependencies**
//!
//! # Architecture
//!
//! - [`Behavior`]: core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Leaf nodes: [`Condition`], [`Action`]
//! - [`builder`]: boxed shorthands (`selector`, `guarded`, ...)

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod leaf;
pub mod status;

pub use behavior::{Behavior, Node};
pub use composite::{Selector, Sequence};
pub use leaf::{Action, Condition};
pub use status::Status;
