//! The status transition table and the guard that classifies moves.
//!
//! The table says which moves exist at all. The guard says how a legal
//! move has to happen: right away, after a yes/no question, or through the
//! external completion flow. The guard never performs side effects.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::completion::{self, Resolution};
use crate::error::{Error, Result};
use crate::model::{ReviewPlatform, Status};

/// Statuses reachable in one step from `from`.
pub fn allowed_targets(from: Status) -> &'static [Status] {
    use Status::{
        Applied, Complete, DidNotFinish, Paused, Pending, Reading, Rejected, ToReview, Withdrew,
    };

    match from {
        Pending => &[Reading, Applied, Rejected, Withdrew],
        Applied => &[Pending, Reading],
        Reading => &[Paused, ToReview, Complete, DidNotFinish],
        Paused => &[Reading, Complete, DidNotFinish],
        ToReview => &[Complete, DidNotFinish],
        Complete | DidNotFinish | Rejected | Withdrew => &[],
    }
}

/// Fails with [`Error::IllegalTransition`] unless `to` is in the table for `from`.
pub fn check(from: Status, to: Status) -> Result<()> {
    if allowed_targets(from).contains(&to) {
        Ok(())
    } else {
        warn!("rejected status change {from} -> {to}");
        Err(Error::IllegalTransition { from, to })
    }
}

/// How a legal status change has to be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Decision {
    /// Write `write` now.
    ///
    /// Usually the requested target. When finalizing out of `to_review`
    /// the completion resolver picks between `complete` and `did_not_finish`.
    Instant { write: Status },

    /// Ask the reader first; see [`crate::flow::answer`].
    Confirm(Confirmation),

    /// Hand off to the external completion flow before anything is written.
    Detour(Detour),
}

/// A yes/no question that must be answered before the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "question", rename_all = "camelCase")]
pub enum Confirmation {
    /// Moving to `to_review` short of the last page: "did you actually finish?"
    UnfinishedReview { progress: u32, total: u32 },

    /// Finalizing with reviews still unposted.
    UnpostedReviews {
        platforms: Vec<String>,
        progress: u32,
        total: u32,
    },
}

/// A hand-off to the completion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detour {
    /// Status the deadline is leaving.
    pub from: Status,

    /// What the reader asked for: `complete` or `did_not_finish`.
    pub requested: Status,

    pub fully_complete: bool,
}

/// Classifies a requested status change.
///
/// Pure: the same inputs always give the same decision. `platforms` only
/// matters when `current` is `to_review`.
pub fn classify(
    current: Status,
    target: Status,
    progress: u32,
    total: u32,
    platforms: &[ReviewPlatform],
) -> Result<Decision> {
    use Status::{Complete, DidNotFinish, Paused, Reading, ToReview};

    check(current, target)?;

    let decision = match (current, target) {
        (Reading, ToReview) => {
            if completion::is_fully_complete(progress, total)? {
                Decision::Instant { write: ToReview }
            } else {
                Decision::Confirm(Confirmation::UnfinishedReview { progress, total })
            }
        }
        (Reading | Paused, Complete | DidNotFinish) => Decision::Detour(Detour {
            from: current,
            requested: target,
            fully_complete: completion::is_fully_complete(progress, total)?,
        }),
        (ToReview, _) => {
            match completion::resolve_from_review(progress, total, platforms, false)? {
                Resolution::Finalize(status) => Decision::Instant { write: status },
                Resolution::NeedsConfirmation { unposted } => {
                    Decision::Confirm(Confirmation::UnpostedReviews {
                        platforms: unposted,
                        progress,
                        total,
                    })
                }
            }
        }
        _ => Decision::Instant { write: target },
    };

    debug!("{current} -> {target}: {decision:?}");
    Ok(decision)
}
