//! Errors raised by the deadline core.
//!
//! Every variant is local and synchronous: it points at a caller bug or
//! malformed data, never at a transient failure. Nothing here is retried.

use uuid::Uuid;

use crate::model::Status;

/// Errors that can occur while computing pace or deciding status changes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed numeric input (negative, non-finite, out of range).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The deadline cannot be reasoned about, e.g. a non-positive total.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The status change is not in the transition table.
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition { from: Status, to: Status },

    /// The deadline reached a terminal status and is read-only.
    #[error("deadline {0} is finalized")]
    Finalized(Uuid),

    #[error("date error: {0}")]
    Date(#[from] jiff::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
