//! Carrying out status changes through injected collaborators.
//!
//! The guard in [`crate::transition`] decides; this module turns decisions
//! and the reader's answers into a [`Plan`] of steps, then runs the plan
//! against a caller-supplied [`DeadlineMutations`] implementation.
//!
//! Callers serialize status changes per deadline. Nothing here detects two
//! plans in flight for the same deadline, and nothing is retried.

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion::{self, Resolution};
use crate::error::{Error, Result};
use crate::model::{Deadline, ReviewData, Status};
use crate::transition::{self, Confirmation, Decision, Detour};

/// Writes that change a deadline. Supplied by the caller.
///
/// `Ok` is the success callback, `Err` the error callback.
pub trait DeadlineMutations {
    type Error: std::error::Error + 'static;

    fn update_progress(
        &mut self,
        deadline_id: Uuid,
        current_progress: u32,
    ) -> core::result::Result<(), Self::Error>;

    fn transition_status(
        &mut self,
        deadline_id: Uuid,
        status: Status,
    ) -> core::result::Result<(), Self::Error>;
}

/// Where review platforms come from. Supplied by the caller.
pub trait ReviewSource {
    fn reviews(&self, deadline_id: Uuid) -> ReviewData;
}

impl ReviewSource for ReviewData {
    fn reviews(&self, _deadline_id: Uuid) -> ReviewData {
        self.clone()
    }
}

/// Errors from [`request`].
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error("reviews for deadline {0} are still loading")]
    ReviewsLoading(Uuid),
}

/// A mutation failed part-way through a plan. Later steps did not run.
#[derive(Debug, thiserror::Error)]
#[error("step {step} of the plan failed: {source}")]
pub struct StepFailed<E: std::error::Error + 'static> {
    /// Zero-based index of the failed step.
    pub step: usize,

    #[source]
    pub source: E,
}

/// One side effect in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    UpdateProgress { to: u32 },
    WriteStatus { status: Status },
    EnterCompletionFlow { detour: Detour },
}

/// Ordered side effects for one status change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    /// The plan for a decision that needs no answer.
    ///
    /// `None` for [`Decision::Confirm`]; use [`answer`] instead.
    pub fn from_decision(decision: &Decision) -> Option<Self> {
        let step = match decision {
            Decision::Instant { write } => Step::WriteStatus { status: *write },
            Decision::Detour(detour) => Step::EnterCompletionFlow { detour: *detour },
            Decision::Confirm(_) => return None,
        };
        Some(Self { steps: vec![step] })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// How the external completion flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DetourOutcome {
    /// Write the terminal status now.
    Finalize { final_progress: Option<u32> },

    /// Park the book in `to_review` until reviews are posted.
    AwaitReviews { final_progress: Option<u32> },
}

/// What running a plan achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Executed {
    /// Every step ran. `written` is the last status written, if any.
    Done { written: Option<Status> },

    /// The plan handed off to the completion flow; come back through
    /// [`finish_detour`].
    Detoured(Detour),
}

/// Classifies a status change for a deadline's current state.
///
/// Reviews are only fetched when the deadline sits in `to_review`.
pub fn request(
    deadline: &Deadline,
    target: Status,
    reviews: &impl ReviewSource,
) -> core::result::Result<Decision, RequestError> {
    let current = deadline.current_status();
    let platforms = if current == Status::ToReview {
        let data = reviews.reviews(deadline.id);
        if data.is_loading {
            return Err(RequestError::ReviewsLoading(deadline.id));
        }
        data.platforms
    } else {
        Vec::new()
    };

    Ok(transition::classify(
        current,
        target,
        deadline.current_progress(),
        deadline.total_quantity,
        &platforms,
    )?)
}

/// Turns the reader's yes/no into a plan.
///
/// - "Did you finish?" yes: set progress to the total, then move to `to_review`.
/// - "Did you finish?" no: go through the completion flow toward `did_not_finish`.
/// - "Finalize with unposted reviews?" yes: resolve again as acknowledged and
///   write the terminal status.
/// - "Finalize with unposted reviews?" no: nothing happens.
pub fn answer(confirmation: &Confirmation, yes: bool) -> Result<Plan> {
    let steps = match (confirmation, yes) {
        (Confirmation::UnfinishedReview { total, .. }, true) => vec![
            Step::UpdateProgress { to: *total },
            Step::WriteStatus {
                status: Status::ToReview,
            },
        ],
        (Confirmation::UnfinishedReview { progress, total }, false) => {
            vec![Step::EnterCompletionFlow {
                detour: Detour {
                    from: Status::Reading,
                    requested: Status::DidNotFinish,
                    fully_complete: completion::is_fully_complete(*progress, *total)?,
                },
            }]
        }
        (Confirmation::UnpostedReviews { progress, total, .. }, true) => {
            // Acknowledged, so the platforms no longer hold anything back.
            match completion::resolve_from_review(*progress, *total, &[], true)? {
                Resolution::Finalize(status) => vec![Step::WriteStatus { status }],
                Resolution::NeedsConfirmation { unposted } => {
                    return Err(Error::InvalidArgument(format!(
                        "reviews still unconfirmed after acknowledgement: {}",
                        unposted.join(", ")
                    )));
                }
            }
        }
        (Confirmation::UnpostedReviews { .. }, false) => Vec::new(),
    };
    Ok(Plan { steps })
}

/// The plan once the completion flow returns.
///
/// `progress` is the deadline's progress when the flow started. A
/// `final_progress` reported by the flow is written first and decides
/// complete versus did-not-finish.
pub fn finish_detour(
    detour: &Detour,
    outcome: DetourOutcome,
    progress: u32,
    total: u32,
) -> Result<Plan> {
    let (final_progress, await_reviews) = match outcome {
        DetourOutcome::Finalize { final_progress } => (final_progress, false),
        DetourOutcome::AwaitReviews { final_progress } => (final_progress, true),
    };

    let mut steps = Vec::new();
    let progress = match final_progress {
        Some(p) if p != progress => {
            steps.push(Step::UpdateProgress { to: p });
            p
        }
        _ => progress,
    };

    let status = if await_reviews {
        transition::check(detour.from, Status::ToReview)?;
        Status::ToReview
    } else {
        completion::resolve_direct(progress, total)?
    };
    steps.push(Step::WriteStatus { status });

    Ok(Plan { steps })
}

/// Runs a plan's steps in order.
///
/// Stops at the first failed mutation; no status is recorded past it.
/// Stops at a completion-flow step and reports the detour.
pub fn execute<M: DeadlineMutations>(
    mutations: &mut M,
    deadline_id: Uuid,
    plan: &Plan,
) -> core::result::Result<Executed, StepFailed<M::Error>> {
    let mut written = None;
    for (step, action) in plan.steps.iter().enumerate() {
        debug!("deadline {deadline_id} step {step}: {action:?}");
        let result = match *action {
            Step::UpdateProgress { to } => mutations.update_progress(deadline_id, to),
            Step::WriteStatus { status } => mutations
                .transition_status(deadline_id, status)
                .map(|()| written = Some(status)),
            Step::EnterCompletionFlow { detour } => return Ok(Executed::Detoured(detour)),
        };
        if let Err(source) = result {
            warn!("deadline {deadline_id} step {step} failed: {source}");
            return Err(StepFailed { step, source });
        }
    }
    Ok(Executed::Done { written })
}

/// In-memory collaborator: records straight into the deadline's histories.
impl DeadlineMutations for Deadline {
    type Error = Error;

    fn update_progress(&mut self, deadline_id: Uuid, current_progress: u32) -> Result<()> {
        self.ensure_id(deadline_id)?;
        self.record_progress(current_progress, Timestamp::now())
    }

    fn transition_status(&mut self, deadline_id: Uuid, status: Status) -> Result<()> {
        self.ensure_id(deadline_id)?;
        self.record_status(status, Timestamp::now())
    }
}

impl Deadline {
    fn ensure_id(&self, deadline_id: Uuid) -> Result<()> {
        if self.id == deadline_id {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "expected deadline {}, got {deadline_id}",
                self.id
            )))
        }
    }
}
