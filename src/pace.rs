//! Pace: how much a reader has to get through each day to finish on time.
//!
//! The required pace comes from what is left and how many days remain.
//! The reader's own pace comes from their recent progress history.
//! Comparing the two gives a [`PaceStatus`].

use std::fmt;

use jiff::{SignedDuration, Timestamp, civil::Date};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::duration::{self, HoursMinutes};
use crate::error::{Error, Result};
use crate::model::{Deadline, Format, ProgressEntry};

/// Everything the calculator reads.
///
/// For audio, `total_quantity` and `current_progress` are hours when the
/// matching `*_minutes` field is present, and plain minutes otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PaceInput {
    pub format: Format,
    pub total_quantity: f64,
    pub total_minutes: Option<f64>,
    pub current_progress: f64,
    pub current_minutes: Option<f64>,
    pub deadline_date: Option<Date>,
}

impl PaceInput {
    /// Builds the input from a deadline's latest progress.
    pub fn for_deadline(deadline: &Deadline) -> Self {
        Self {
            format: deadline.format,
            total_quantity: f64::from(deadline.total_quantity),
            total_minutes: None,
            current_progress: f64::from(deadline.current_progress()),
            current_minutes: None,
            deadline_date: Some(deadline.deadline_date),
        }
    }

    fn combined_total(&self) -> Result<f64> {
        combine(self.format, self.total_quantity, self.total_minutes)
    }

    fn combined_current(&self) -> Result<f64> {
        if self.current_progress < 0.0 || !self.current_progress.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "current progress must be a non-negative number, got {}",
                self.current_progress
            )));
        }
        combine(self.format, self.current_progress, self.current_minutes)
    }
}

fn combine(format: Format, quantity: f64, minutes: Option<f64>) -> Result<f64> {
    match (format, minutes) {
        (Format::Audio, Some(minutes)) => duration::to_total_minutes(quantity, minutes),
        _ => Ok(quantity),
    }
}

/// The required daily rate, in the book's own unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "camelCase")]
pub enum DailyRate {
    /// Pages per day.
    Pages { per_day: f64 },

    /// Minutes of listening per day.
    Listening { per_day: f64 },
}

impl DailyRate {
    pub fn per_day(self) -> f64 {
        match self {
            Self::Pages { per_day } | Self::Listening { per_day } => per_day,
        }
    }
}

impl fmt::Display for DailyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Pages { per_day } => write!(f, "{} pages/day", per_day.ceil()),
            Self::Listening { per_day } => match HoursMinutes::from_minutes_ceil(per_day) {
                Ok(hm) => write!(f, "{hm}/day"),
                Err(_) => f.write_str("?/day"),
            },
        }
    }
}

/// A pace estimate for one deadline.
///
/// Overdue estimates carry no rate; check `is_overdue` rather than the
/// display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaceEstimate {
    pub format: Format,

    /// Pages, or minutes for audio.
    pub remaining: f64,

    pub days_remaining: i64,
    pub is_overdue: bool,
    pub rate: Option<DailyRate>,
}

impl fmt::Display for PaceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rate {
            Some(rate) if !self.is_overdue => rate.fmt(f),
            _ => f.write_str("Deadline passed"),
        }
    }
}

/// Whole calendar days from `today` until `date`. Negative once past.
pub fn days_until(today: Date, date: Date) -> Result<i64> {
    let span = today.until(date)?;
    Ok(i64::from(span.get_days()))
}

/// Computes the pace needed to finish by the deadline.
///
/// Returns `Ok(None)` when nothing remains or there is no deadline date.
pub fn estimate(input: &PaceInput, today: Date) -> Result<Option<PaceEstimate>> {
    let total = input.combined_total()?;
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "total quantity must be a positive number to compute pace, got {total}"
        )));
    }
    let current = input.combined_current()?;

    let remaining = total - current;
    let Some(deadline_date) = input.deadline_date else {
        return Ok(None);
    };
    if remaining <= 0.0 {
        return Ok(None);
    }

    let days_remaining = days_until(today, deadline_date)?;
    if days_remaining <= 0 {
        debug!("deadline {deadline_date} passed {} day(s) ago", -days_remaining);
        return Ok(Some(PaceEstimate {
            format: input.format,
            remaining,
            days_remaining,
            is_overdue: true,
            rate: None,
        }));
    }

    let per_day = remaining / days_remaining as f64;
    let rate = match input.format {
        Format::Physical | Format::EBook => DailyRate::Pages { per_day },
        Format::Audio => DailyRate::Listening { per_day },
    };
    debug!("{remaining} {} over {days_remaining} day(s): {rate}", input.format.unit());

    Ok(Some(PaceEstimate {
        format: input.format,
        remaining,
        days_remaining,
        is_overdue: false,
        rate: Some(rate),
    }))
}

/// The reader's recent daily progress.
///
/// Sums the forward steps between consecutive entries (by creation time)
/// that landed in the last `window_days` days, spread across the window.
/// The first entry ever recorded is a starting point, not progress.
pub fn user_pace(
    history: &[ProgressEntry],
    now: Timestamp,
    window_days: u32,
) -> Result<Option<f64>> {
    if history.len() < 2 || window_days == 0 {
        return Ok(None);
    }

    let window_start = now.checked_sub(SignedDuration::from_hours(24 * i64::from(window_days)))?;

    let mut sorted: Vec<&ProgressEntry> = history.iter().collect();
    sorted.sort_by_key(|e| e.created_at);

    let read: u64 = sorted
        .windows(2)
        .filter(|pair| pair[1].created_at >= window_start && pair[1].created_at <= now)
        .map(|pair| {
            u64::from(
                pair[1]
                    .current_progress
                    .saturating_sub(pair[0].current_progress),
            )
        })
        .sum();

    Ok(Some(read as f64 / f64::from(window_days)))
}

/// How the reader's pace compares with the pace the deadline needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaceStatus {
    /// Nothing left to read.
    Done,

    /// The deadline date has passed with reading left.
    Overdue,

    /// Reading at or above the required pace.
    OnTrack,

    /// Slightly under the required pace.
    Tight,

    /// Well under the required pace, or no recent reading at all.
    Behind,
}

impl PaceStatus {
    /// Compares a user pace against an estimate.
    ///
    /// `estimate` is `None` when nothing remains. `tight_ratio` is the share
    /// of the required pace that still counts as tight rather than behind.
    pub fn assess(
        estimate: Option<&PaceEstimate>,
        user_pace: Option<f64>,
        tight_ratio: f64,
    ) -> Self {
        let Some(estimate) = estimate else {
            return Self::Done;
        };
        let Some(rate) = estimate.rate.filter(|_| !estimate.is_overdue) else {
            return Self::Overdue;
        };
        let required = rate.per_day();
        match user_pace {
            Some(user) if user >= required => Self::OnTrack,
            Some(user) if user >= required * tight_ratio => Self::Tight,
            _ => Self::Behind,
        }
    }
}

/// How close the deadline date is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Urgency {
    Overdue,
    Urgent,
    Relaxed,
}

impl Urgency {
    pub fn from_days(days_remaining: i64, urgent_days: u32) -> Self {
        if days_remaining <= 0 {
            Self::Overdue
        } else if days_remaining <= i64::from(urgent_days) {
            Self::Urgent
        } else {
            Self::Relaxed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    fn pages(total: f64, current: f64, due: Option<Date>) -> PaceInput {
        PaceInput {
            format: Format::Physical,
            total_quantity: total,
            total_minutes: None,
            current_progress: current,
            current_minutes: None,
            deadline_date: due,
        }
    }

    fn entry(progress: u32, secs: i64) -> ProgressEntry {
        ProgressEntry {
            current_progress: progress,
            created_at: Timestamp::new(secs, 0).unwrap(),
        }
    }

    const DAY: i64 = 86_400;

    #[test]
    fn pages_per_day() {
        let today = date(2026, 10, 17);
        let input = pages(300.0, 100.0, Some(date(2026, 10, 27)));
        let est = estimate(&input, today).unwrap().unwrap();

        assert!(!est.is_overdue);
        assert_eq!(est.days_remaining, 10);
        assert!((est.remaining - 200.0).abs() < f64::EPSILON);
        assert_eq!(est.rate, Some(DailyRate::Pages { per_day: 20.0 }));
        assert_eq!(est.to_string(), "20 pages/day");
    }

    #[test]
    fn page_rate_rounds_up_for_display() {
        let today = date(2026, 10, 17);
        let input = pages(100.0, 0.0, Some(date(2026, 10, 20)));
        let est = estimate(&input, today).unwrap().unwrap();
        assert_eq!(est.to_string(), "34 pages/day");
    }

    #[test]
    fn audio_pace_in_hours_and_minutes() {
        let today = date(2026, 10, 17);
        let input = PaceInput {
            format: Format::Audio,
            total_quantity: 10.0,
            total_minutes: Some(30.0),
            current_progress: 5.0,
            current_minutes: Some(45.0),
            deadline_date: Some(date(2026, 10, 20)),
        };
        let est = estimate(&input, today).unwrap().unwrap();

        assert!((est.remaining - 285.0).abs() < f64::EPSILON);
        assert_eq!(est.rate, Some(DailyRate::Listening { per_day: 95.0 }));
        assert_eq!(est.to_string(), "1h 35m/day");
    }

    #[test]
    fn past_deadline_is_overdue() {
        let today = date(2026, 10, 17);
        let input = pages(300.0, 100.0, Some(date(2026, 10, 10)));
        let est = estimate(&input, today).unwrap().unwrap();

        assert!(est.is_overdue);
        assert_eq!(est.rate, None);
        assert_eq!(est.days_remaining, -7);
        assert_eq!(est.to_string(), "Deadline passed");
    }

    #[test]
    fn due_today_counts_as_overdue() {
        let today = date(2026, 10, 17);
        let input = pages(300.0, 100.0, Some(today));
        let est = estimate(&input, today).unwrap().unwrap();
        assert!(est.is_overdue);
    }

    #[test]
    fn nothing_remaining_gives_no_estimate() {
        let today = date(2026, 10, 17);
        assert_eq!(estimate(&pages(300.0, 300.0, Some(today)), today).unwrap(), None);
        assert_eq!(estimate(&pages(300.0, 320.0, Some(today)), today).unwrap(), None);
    }

    #[test]
    fn missing_deadline_gives_no_estimate() {
        let today = date(2026, 10, 17);
        assert_eq!(estimate(&pages(300.0, 0.0, None), today).unwrap(), None);
    }

    #[test]
    fn zero_total_is_invalid_configuration() {
        let today = date(2026, 10, 17);
        let err = estimate(&pages(0.0, 0.0, Some(today)), today).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn non_finite_total_is_invalid_configuration() {
        let today = date(2026, 10, 17);
        let due = Some(date(2026, 10, 27));
        for total in [f64::NAN, f64::INFINITY] {
            let err = estimate(&pages(total, 0.0, due), today).unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration(_)), "{total}");
        }

        let audio = PaceInput {
            format: Format::Audio,
            total_quantity: f64::NAN,
            total_minutes: Some(30.0),
            current_progress: 0.0,
            current_minutes: None,
            deadline_date: due,
        };
        assert!(estimate(&audio, today).is_err());
    }

    #[test]
    fn negative_progress_is_invalid_argument() {
        let today = date(2026, 10, 17);
        let err = estimate(&pages(300.0, -5.0, Some(today)), today).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn audio_minutes_out_of_range() {
        let today = date(2026, 10, 17);
        let input = PaceInput {
            format: Format::Audio,
            total_quantity: 10.0,
            total_minutes: Some(75.0),
            current_progress: 0.0,
            current_minutes: None,
            deadline_date: Some(today),
        };
        let err = estimate(&input, today).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn user_pace_counts_forward_steps_in_window() {
        let now = 100 * DAY;
        let history = vec![
            // Before the window: starting point only.
            entry(0, now - 30 * DAY),
            entry(40, now - 10 * DAY),
            entry(100, now - 5 * DAY),
            entry(140, now - DAY),
        ];
        let pace = user_pace(&history, Timestamp::new(now, 0).unwrap(), 14)
            .unwrap()
            .unwrap();
        assert!((pace - 10.0).abs() < 1e-9);
    }

    #[test]
    fn user_pace_sorts_by_time_and_skips_regressions() {
        let now = 100 * DAY;
        let history = vec![
            entry(90, now - DAY),
            entry(50, now - 3 * DAY),
            entry(70, now - 2 * DAY),
            entry(60, now - DAY / 2),
        ];
        // 50 -> 70 -> 90 -> 60: forward steps of 20 + 20.
        let pace = user_pace(&history, Timestamp::new(now, 0).unwrap(), 4)
            .unwrap()
            .unwrap();
        assert!((pace - 10.0).abs() < 1e-9);
    }

    #[test]
    fn user_pace_needs_two_entries() {
        let now = Timestamp::new(100 * DAY, 0).unwrap();
        assert_eq!(user_pace(&[entry(10, 99 * DAY)], now, 7).unwrap(), None);
    }

    #[test]
    fn pace_status_thresholds() {
        let today = date(2026, 10, 17);
        let est = estimate(&pages(300.0, 100.0, Some(date(2026, 10, 27))), today)
            .unwrap()
            .unwrap();

        assert_eq!(PaceStatus::assess(Some(&est), Some(25.0), 0.8), PaceStatus::OnTrack);
        assert_eq!(PaceStatus::assess(Some(&est), Some(17.0), 0.8), PaceStatus::Tight);
        assert_eq!(PaceStatus::assess(Some(&est), Some(5.0), 0.8), PaceStatus::Behind);
        assert_eq!(PaceStatus::assess(Some(&est), None, 0.8), PaceStatus::Behind);
        assert_eq!(PaceStatus::assess(None, None, 0.8), PaceStatus::Done);
    }

    #[test]
    fn pace_status_overdue() {
        let today = date(2026, 10, 17);
        let est = estimate(&pages(300.0, 100.0, Some(date(2026, 10, 1))), today)
            .unwrap()
            .unwrap();
        assert_eq!(PaceStatus::assess(Some(&est), Some(100.0), 0.8), PaceStatus::Overdue);
    }

    #[test]
    fn urgency_levels() {
        assert_eq!(Urgency::from_days(-2, 7), Urgency::Overdue);
        assert_eq!(Urgency::from_days(0, 7), Urgency::Overdue);
        assert_eq!(Urgency::from_days(7, 7), Urgency::Urgent);
        assert_eq!(Urgency::from_days(8, 7), Urgency::Relaxed);
    }
}
