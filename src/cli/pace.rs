//! Pace command: how much is left and how fast it has to go.

use std::path::Path;

use jiff::{Timestamp, civil::Date};
use tome::config::Config;
use tome::pace::{self, PaceInput, PaceStatus, Urgency};

use super::document;
use super::format::{format_pace_status, format_quantity, format_urgency};

pub(super) fn cmd_pace(config: &Config, file: &Path, today: Date) -> Result<(), String> {
    let deadline = document::load(file)?;
    let status = deadline.current_status();

    println!("{}  [{status}]", deadline.title);
    println!(
        "Progress: {} of {} ({}%)",
        format_quantity(deadline.format, deadline.current_progress()),
        format_quantity(deadline.format, deadline.total_quantity),
        deadline.percent_complete()
    );

    if deadline.is_finalized() {
        return Ok(());
    }

    let estimate = pace::estimate(&PaceInput::for_deadline(&deadline), today)
        .map_err(|e| format!("failed to compute pace: {e}"))?;
    let days = pace::days_until(today, deadline.deadline_date)
        .map_err(|e| format!("failed to compute days remaining: {e}"))?;
    let user = pace::user_pace(&deadline.progress, Timestamp::now(), config.pace_window_days)
        .map_err(|e| format!("failed to compute reading pace: {e}"))?;

    let urgency = Urgency::from_days(days, config.urgent_days);
    println!(
        "Due: {} ({days} day(s), {})",
        deadline.deadline_date,
        format_urgency(urgency)
    );

    if let Some(estimate) = &estimate {
        println!("Needed: {estimate}");
    }
    if let Some(user) = user {
        println!(
            "Your pace: {user:.1} {}/day over {} day(s)",
            deadline.format.unit(),
            config.pace_window_days
        );
    }

    let assessment = PaceStatus::assess(estimate.as_ref(), user, config.tight_ratio);
    println!("Status: {}", format_pace_status(assessment));
    Ok(())
}
