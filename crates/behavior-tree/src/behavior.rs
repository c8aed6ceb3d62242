//! Core behavior trait.
//!
//! [`Behavior`] is generic over a context type `C` (the blackboard). Nodes
//! read the world through the context and write their decision back into it.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluates this node against `ctx`.
    fn tick(&self, ctx: &mut C) -> Status;

    /// Label used when tracing which branch decided.
    fn label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Boxed node borrowing for `'n`.
///
/// The explicit lifetime lets trees hold nodes over a context that itself
/// borrows (for example `Ctx<'a>` referencing live game state) without
/// forcing `'static`.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

impl<C> Behavior<C> for Node<'_, C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }
}
