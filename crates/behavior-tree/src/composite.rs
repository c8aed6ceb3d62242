//! Composite behavior nodes.
//!
//! [`Sequence`] (AND) and [`Selector`] (OR) run their children left to right
//! and short-circuit. A priority policy is a selector whose children are
//! guarded sequences: the first branch whose guard holds and whose action
//! succeeds wins.

use crate::{Behavior, Node, Status};

/// Runs children in order until one fails.
///
/// - A `Failure` child stops the sequence, which fails.
/// - When every child succeeds the sequence succeeds. An empty sequence
///   therefore succeeds.
pub struct Sequence<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Sequence<'n, C> {
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }

    fn label(&self) -> &'static str {
        "sequence"
    }
}

/// Runs children in order until one succeeds.
///
/// - A `Success` child stops the selector, which succeeds.
/// - When every child fails the selector fails. An empty selector therefore
///   fails.
pub struct Selector<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Selector<'n, C> {
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }

    fn label(&self) -> &'static str {
        "selector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: i32,
    }

    struct Increment;
    impl Behavior<Counter> for Increment {
        fn tick(&self, ctx: &mut Counter) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    struct Decrement;
    impl Behavior<Counter> for Decrement {
        fn tick(&self, ctx: &mut Counter) -> Status {
            ctx.value -= 1;
            Status::Success
        }
    }

    struct FailAlways;
    impl Behavior<Counter> for FailAlways {
        fn tick(&self, _ctx: &mut Counter) -> Status {
            Status::Failure
        }
    }

    #[test]
    fn sequence_runs_every_child_on_success() {
        let seq = Sequence::new(vec![Box::new(Increment), Box::new(Increment)]);

        let mut ctx = Counter { value: 0 };
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(FailAlways),
            Box::new(Increment),
        ]);

        let mut ctx = Counter { value: 0 };
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn selector_stops_at_first_success() {
        let sel = Selector::new(vec![
            Box::new(FailAlways),
            Box::new(Increment),
            Box::new(Decrement),
        ]);

        let mut ctx = Counter { value: 0 };
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn empty_composites_follow_identity_rules() {
        let mut ctx = Counter { value: 0 };
        assert_eq!(Sequence::<Counter>::new(Vec::new()).tick(&mut ctx), Status::Success);
        assert_eq!(Selector::<Counter>::new(Vec::new()).tick(&mut ctx), Status::Failure);
    }
}
