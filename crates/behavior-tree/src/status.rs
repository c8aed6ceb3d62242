//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// Every tick completes synchronously: conditions answer immediately and
/// actions either record a decision or decline. Waiting (for animations,
/// pacing) belongs to whoever executes the decision, not to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The condition held, or the action recorded a decision.
    Success,

    /// The condition did not hold, or the action had nothing to do.
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
