//! The tri-state result every node returns.

use core::fmt;

/// Outcome of ticking a node once.
///
/// `Running` is an ordinary value, not a suspension: the node returns
/// immediately and the composites above it record where to resume on the
/// next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node finished and achieved its goal.
    Success,
    /// The node finished without achieving its goal.
    Failure,
    /// The node has not finished yet; tick it again next time.
    Running,
}

impl Status {
    /// Map a boolean predicate result onto `Success` / `Failure`.
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Success } else { Self::Failure }
    }

    /// Whether this is [`Status::Success`].
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether this is [`Status::Failure`].
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Whether this is [`Status::Running`].
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Running => "running",
        })
    }
}
