//! Shorthand constructors returning boxed nodes.
//!
//! `selector(vec![guarded("in range", ready, attack), fallback])` reads
//! closer to the policy it encodes than nested `Box::new` calls.

use crate::{Action, Behavior, Condition, Node, Selector, Sequence, Status};

#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn condition<'n, C, F>(label: &'static str, predicate: F) -> Node<'n, C>
where
    C: 'n,
    F: Fn(&C) -> bool + Send + Sync + 'n,
{
    Box::new(Condition::new(label, predicate))
}

#[inline]
pub fn action<'n, C, F>(label: &'static str, run: F) -> Node<'n, C>
where
    C: 'n,
    F: Fn(&mut C) -> Status + Send + Sync + 'n,
{
    Box::new(Action::new(label, run))
}

/// A sequence of one guard followed by one node.
#[inline]
pub fn guarded<'n, C, F>(label: &'static str, guard: F, then: Node<'n, C>) -> Node<'n, C>
where
    C: 'n,
    F: Fn(&C) -> bool + Send + Sync + 'n,
{
    sequence(vec![condition(label, guard), then])
}

/// Boxes any node.
#[inline]
pub fn node<'n, C, B>(behavior: B) -> Node<'n, C>
where
    B: Behavior<C> + 'n,
{
    Box::new(behavior)
}
