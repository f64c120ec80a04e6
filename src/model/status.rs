//! Status: where a deadline stands in its lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A deadline status.
///
/// The allowed moves between statuses live in [`crate::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Waiting to be started.
    Pending,

    /// Applied for an advance copy; waiting on the publisher.
    Applied,

    /// Actively being read.
    Reading,

    /// Set aside for now.
    Paused,

    /// Finished reading, reviews still to post.
    ToReview,

    /// Read to the end.
    Complete,

    /// Stopped before the end.
    DidNotFinish,

    /// The advance copy request was turned down.
    Rejected,

    /// The reader withdrew before starting.
    Withdrew,
}

impl Status {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 9] = [
        Self::Pending,
        Self::Applied,
        Self::Reading,
        Self::Paused,
        Self::ToReview,
        Self::Complete,
        Self::DidNotFinish,
        Self::Rejected,
        Self::Withdrew,
    ];

    /// Terminal statuses have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Complete | Self::DidNotFinish | Self::Rejected | Self::Withdrew
        )
    }

    /// Statuses a new deadline may start in.
    pub fn is_initial(self) -> bool {
        matches!(self, Self::Pending | Self::Applied | Self::Reading)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Applied => "applied",
            Self::Reading => "reading",
            Self::Paused => "paused",
            Self::ToReview => "to_review",
            Self::Complete => "complete",
            Self::DidNotFinish => "did_not_finish",
            Self::Rejected => "rejected",
            Self::Withdrew => "withdrew",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
