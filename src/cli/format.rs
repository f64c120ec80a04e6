//! Output formatting for CLI display.

use tome::duration::HoursMinutes;
use tome::flow::Step;
use tome::model::{Format, Status};
use tome::pace::{PaceStatus, Urgency};
use tome::transition::{Confirmation, Decision};

/// A quantity in the book's own unit.
pub(super) fn format_quantity(format: Format, quantity: u32) -> String {
    match format {
        Format::Physical | Format::EBook => format!("{quantity} pages"),
        Format::Audio => HoursMinutes {
            hours: u64::from(quantity / 60),
            minutes: u64::from(quantity % 60),
        }
        .to_string(),
    }
}

/// Human-readable description of a guard decision.
pub(super) fn format_decision(current: Status, target: Status, decision: &Decision) -> String {
    match decision {
        Decision::Instant { write } if *write == target => format!("{current} → {write}"),
        Decision::Instant { write } => {
            format!("{current} → {write} (requested {target})")
        }
        Decision::Confirm(Confirmation::UnfinishedReview { progress, total }) => format!(
            "Only {progress} of {total} read. Did you finish the book? (--yes / --no)"
        ),
        Decision::Confirm(Confirmation::UnpostedReviews { platforms, .. }) => format!(
            "Reviews not posted on {}. Finalize anyway? (--yes / --no)",
            platforms.join(", ")
        ),
        Decision::Detour(detour) => format!(
            "{current} → {}: run `tome finish` to complete the flow",
            detour.requested
        ),
    }
}

/// Human-readable description of a plan step.
pub(super) fn format_step(step: &Step) -> String {
    match step {
        Step::UpdateProgress { to } => format!("progress set to {to}"),
        Step::WriteStatus { status } => format!("status set to {status}"),
        Step::EnterCompletionFlow { detour } => {
            format!("completion flow toward {}", detour.requested)
        }
    }
}

pub(super) fn format_pace_status(status: PaceStatus) -> &'static str {
    match status {
        PaceStatus::Done => "done",
        PaceStatus::Overdue => "overdue",
        PaceStatus::OnTrack => "on track",
        PaceStatus::Tight => "tight",
        PaceStatus::Behind => "behind",
    }
}

pub(super) fn format_urgency(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Overdue => "overdue",
        Urgency::Urgent => "urgent",
        Urgency::Relaxed => "relaxed",
    }
}
