//! Tome: the decision core of a reading-deadline tracker.
//!
//! A reader tracks books against finish dates. This crate answers the
//! questions a presentation layer asks along the way:
//!
//! - how much has to be read per day to finish on time ([`pace`]),
//! - whether a status change is legal and how it must happen ([`transition`]),
//! - whether a finished book is `complete` or `did_not_finish` ([`completion`]),
//! - which side effects to run, in which order ([`flow`]).
//!
//! All decisions are pure functions of plain data. Writes go through
//! collaborators the caller injects.

pub mod completion;
pub mod config;
pub mod duration;
pub mod error;
pub mod flow;
pub mod model;
pub mod pace;
pub mod transition;

pub use error::{Error, Result};
