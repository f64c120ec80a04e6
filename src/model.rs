//! Core data model for Tome.
//!
//! These types describe a tracked book and its history:
//! deadlines, progress entries, status entries, and review platforms.

mod deadline;
mod history;
mod review;
mod status;

use serde::{Deserialize, Serialize};

pub use deadline::{Deadline, DeadlineUpdate, NewDeadline};
pub use history::{ProgressEntry, StatusEntry, latest};
pub use review::{ReviewData, ReviewPlatform};
pub(crate) use review::unposted_names;
pub use status::Status;

/// How the book is consumed. Decides the unit of `total_quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// Paper book, measured in pages.
    #[serde(rename = "physical")]
    Physical,

    /// E-book, measured in pages.
    #[serde(rename = "eBook")]
    EBook,

    /// Audiobook, measured in minutes.
    #[serde(rename = "audio")]
    Audio,
}

impl Format {
    /// Unit label for a quantity of this format.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Physical | Self::EBook => "pages",
            Self::Audio => "minutes",
        }
    }
}

/// Whether the finish date can slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Flexibility {
    #[default]
    Flexible,
    Strict,
}
