//! Deadline documents: reading, writing, creating, logging progress.

use std::fs;
use std::path::Path;

use jiff::{Timestamp, civil::Date};
use tome::model::{Deadline, Flexibility, Format, NewDeadline, Status};

/// Parsed `tome new` arguments.
pub(super) struct NewRequest {
    pub title: String,
    pub author: Option<String>,
    pub format: Format,
    pub total: u32,
    pub minutes: Option<u32>,
    pub due: Date,
    pub flexibility: Flexibility,
    pub status: Status,
    pub start_at: u32,
}

pub(super) fn load(path: &Path) -> Result<Deadline, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid deadline in {}: {e}", path.display()))
}

/// Write the document to `out`, or print it.
pub(super) fn emit(deadline: &Deadline, out: Option<&Path>) -> Result<(), String> {
    let json = serde_json::to_string_pretty(deadline)
        .map_err(|e| format!("failed to serialize deadline: {e}"))?;

    match out {
        Some(path) => {
            fs::write(path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Saved \"{}\" → {}", deadline.title, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Combine a quantity with optional audio minutes into the stored unit.
///
/// With `minutes`, an audio `value` is whole hours. Without, it is already
/// in the stored unit: pages, or minutes for audio.
pub(super) fn quantity(format: Format, value: u32, minutes: Option<u32>) -> Result<u32, String> {
    let Some(minutes) = minutes else {
        return Ok(value);
    };
    if format != Format::Audio {
        return Err("--minutes only applies to audiobooks".to_string());
    }
    if minutes >= 60 {
        return Err(format!("minutes must be below 60, got {minutes}"));
    }
    value
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .ok_or_else(|| format!("{value}h {minutes}m is too long to track"))
}

pub(super) fn cmd_new(request: NewRequest, out: Option<&Path>) -> Result<(), String> {
    let total = quantity(request.format, request.total, request.minutes)?;

    let deadline = Deadline::new(NewDeadline {
        title: request.title,
        author: request.author,
        format: request.format,
        total_quantity: total,
        deadline_date: request.due,
        flexibility: request.flexibility,
        initial_status: request.status,
        starting_progress: request.start_at,
    })
    .map_err(|e| format!("failed to create deadline: {e}"))?;

    emit(&deadline, out)
}

pub(super) fn cmd_progress(
    file: &Path,
    value: u32,
    minutes: Option<u32>,
    out: Option<&Path>,
) -> Result<(), String> {
    let mut deadline = load(file)?;
    let progress = quantity(deadline.format, value, minutes)?;

    deadline
        .record_progress(progress, Timestamp::now())
        .map_err(|e| format!("failed to log progress: {e}"))?;

    eprintln!(
        "Progress: {} ({}%)",
        super::format::format_quantity(deadline.format, progress),
        deadline.percent_complete()
    );
    emit(&deadline, out)
}
