//! Closure-backed leaf nodes.
//!
//! Most leaves are small enough that a dedicated struct per node is noise.
//! [`Condition`] wraps a predicate over the context; [`Action`] wraps a
//! closure that may write a decision into it.

use crate::{Behavior, Status};

/// Succeeds when the predicate holds. Never mutates the context.
pub struct Condition<F> {
    label: &'static str,
    predicate: F,
}

impl<F> Condition<F> {
    pub fn new(label: &'static str, predicate: F) -> Self {
        Self { label, predicate }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn tick(&self, ctx: &mut C) -> Status {
        (self.predicate)(ctx).into()
    }

    fn label(&self) -> &'static str {
        self.label
    }
}

/// Runs a closure against the context and reports its status.
pub struct Action<F> {
    label: &'static str,
    run: F,
}

impl<F> Action<F> {
    pub fn new(label: &'static str, run: F) -> Self {
        Self { label, run }
    }
}

impl<C, F> Behavior<C> for Action<F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    fn tick(&self, ctx: &mut C) -> Status {
        (self.run)(ctx)
    }

    fn label(&self) -> &'static str {
        self.label
    }
}
