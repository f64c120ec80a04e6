//! Converting between total minutes and an hours + minutes pair.
//!
//! Audiobooks are stored as a single minute count; people read and type
//! them as "10h 30m".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A duration split for display and form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursMinutes {
    pub hours: u64,

    /// Always below 60.
    pub minutes: u64,
}

impl HoursMinutes {
    /// Splits a fractional minute count, rounding up to the next whole minute.
    pub fn from_minutes_ceil(total_minutes: f64) -> Result<Self> {
        if !total_minutes.is_finite() || total_minutes < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "minutes must be a non-negative number, got {total_minutes}"
            )));
        }
        // Finite, non-negative and far below u64::MAX for any real book.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = total_minutes.ceil() as u64;
        Ok(split(whole))
    }

    /// The combined minute count.
    pub fn total_minutes(self) -> u64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (0, m) => write!(f, "{m}m"),
            (h, 0) => write!(f, "{h}h"),
            (h, m) => write!(f, "{h}h {m}m"),
        }
    }
}

/// Splits a total minute count into hours and leftover minutes.
pub fn to_hours_and_minutes(total_minutes: i64) -> Result<HoursMinutes> {
    let total = u64::try_from(total_minutes).map_err(|_| {
        Error::InvalidArgument(format!(
            "total minutes cannot be negative, got {total_minutes}"
        ))
    })?;
    Ok(split(total))
}

/// Combines hours and minutes into a total minute count.
///
/// Fractional hours are accepted and produce fractional minutes
/// (`1.5` hours is 90 minutes).
pub fn to_total_minutes(hours: f64, minutes: f64) -> Result<f64> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "hours must be a non-negative number, got {hours}"
        )));
    }
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "minutes must be a non-negative number, got {minutes}"
        )));
    }
    if minutes >= 60.0 {
        return Err(Error::InvalidArgument(format!(
            "minutes must be below 60, got {minutes}"
        )));
    }
    Ok(hours * 60.0 + minutes)
}

fn split(total: u64) -> HoursMinutes {
    HoursMinutes {
        hours: total / 60,
        minutes: total % 60,
    }
}
