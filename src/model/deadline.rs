//! Deadline: a tracked book with a target finish date.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Flexibility, Format, ProgressEntry, Status, StatusEntry, latest};
use crate::error::{Error, Result};
use crate::transition;

/// A user's tracked book.
///
/// Created through [`Deadline::new`], changed only through [`Deadline::update`]
/// and the history-recording methods. Once the current status is terminal
/// the deadline is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub format: Format,

    /// Pages, or minutes for audio.
    pub total_quantity: u32,

    pub deadline_date: Date,
    pub flexibility: Flexibility,
    pub created_at: Timestamp,

    /// Progress history. Read through [`Deadline::current_progress`].
    #[serde(default)]
    pub progress: Vec<ProgressEntry>,

    /// Status history. Read through [`Deadline::current_status`].
    #[serde(default)]
    pub status: Vec<StatusEntry>,
}

/// Everything needed to create a deadline.
#[derive(Debug, Clone)]
pub struct NewDeadline {
    pub title: String,
    pub author: Option<String>,
    pub format: Format,
    pub total_quantity: u32,
    pub deadline_date: Date,
    pub flexibility: Flexibility,

    /// `pending`, `applied`, or `reading`.
    pub initial_status: Status,

    /// Where the reader already is when tracking starts.
    pub starting_progress: u32,
}

/// Editable fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct DeadlineUpdate {
    pub title: Option<String>,
    pub author: Option<Option<String>>,
    pub format: Option<Format>,
    pub total_quantity: Option<u32>,
    pub deadline_date: Option<Date>,
    pub flexibility: Option<Flexibility>,
}

impl Deadline {
    /// Creates a deadline, seeding its status and progress histories.
    pub fn new(new: NewDeadline) -> Result<Self> {
        require_positive_total(new.total_quantity)?;
        if !new.initial_status.is_initial() {
            return Err(Error::InvalidArgument(format!(
                "a deadline cannot start as {}",
                new.initial_status
            )));
        }
        if new.title.trim().is_empty() {
            return Err(Error::InvalidArgument("title cannot be empty".into()));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: new.title,
            author: new.author,
            format: new.format,
            total_quantity: new.total_quantity,
            deadline_date: new.deadline_date,
            flexibility: new.flexibility,
            created_at: now,
            progress: vec![ProgressEntry {
                current_progress: new.starting_progress,
                created_at: now,
            }],
            status: vec![StatusEntry {
                status: new.initial_status,
                created_at: now,
            }],
        })
    }

    /// Applies an explicit edit. Rejected once the deadline is finalized.
    pub fn update(&mut self, update: DeadlineUpdate) -> Result<()> {
        self.ensure_open()?;
        if let Some(total) = update.total_quantity {
            require_positive_total(total)?;
        }
        if update.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::InvalidArgument("title cannot be empty".into()));
        }

        if let Some(total) = update.total_quantity {
            self.total_quantity = total;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(format) = update.format {
            self.format = format;
        }
        if let Some(date) = update.deadline_date {
            self.deadline_date = date;
        }
        if let Some(flexibility) = update.flexibility {
            self.flexibility = flexibility;
        }
        Ok(())
    }

    /// Progress from the latest entry, or 0 with no history.
    pub fn current_progress(&self) -> u32 {
        latest(&self.progress, |e| e.created_at).map_or(0, |e| e.current_progress)
    }

    /// Status from the latest entry, or `pending` with no history.
    pub fn current_status(&self) -> Status {
        latest(&self.status, |e| e.created_at).map_or(Status::Pending, |e| e.status)
    }

    /// Whether the deadline reached a terminal status.
    pub fn is_finalized(&self) -> bool {
        self.current_status().is_terminal()
    }

    /// Whole percent read, capped at 100.
    pub fn percent_complete(&self) -> u32 {
        if self.total_quantity == 0 {
            return 0;
        }
        let percent = u64::from(self.current_progress()) * 100 / u64::from(self.total_quantity);
        u32::try_from(percent.min(100)).unwrap_or(100)
    }

    /// Appends a progress entry.
    ///
    /// The entry is stamped no earlier than the latest one, so it always
    /// becomes the current progress.
    pub fn record_progress(&mut self, current_progress: u32, at: Timestamp) -> Result<()> {
        self.ensure_open()?;
        let newest = latest(&self.progress, |e| e.created_at).map(|e| e.created_at);
        let created_at = not_before(at, newest);
        self.progress.push(ProgressEntry {
            current_progress,
            created_at,
        });
        Ok(())
    }

    /// Appends a status entry, provided the move is in the transition table.
    ///
    /// Stamped like [`Deadline::record_progress`].
    pub fn record_status(&mut self, status: Status, at: Timestamp) -> Result<()> {
        self.ensure_open()?;
        transition::check(self.current_status(), status)?;
        let newest = latest(&self.status, |e| e.created_at).map(|e| e.created_at);
        let created_at = not_before(at, newest);
        self.status.push(StatusEntry { status, created_at });
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_finalized() {
            return Err(Error::Finalized(self.id));
        }
        Ok(())
    }
}

/// `at`, or the newest existing stamp if that is later. A tie still makes
/// the appended entry current.
fn not_before(at: Timestamp, newest: Option<Timestamp>) -> Timestamp {
    newest.map_or(at, |newest| at.max(newest))
}

pub(crate) fn require_positive_total(total: u32) -> Result<()> {
    if total == 0 {
        return Err(Error::InvalidConfiguration(
            "total quantity must be positive".into(),
        ));
    }
    Ok(())
}
