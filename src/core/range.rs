//! Day-granular inclusive date ranges and their validation rules.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

const LAST_MILLI_OF_DAY: i64 = 86_399_999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("End date cannot be before start date")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("Please choose a start date first")]
    StartRequired,
}

/// What happens to an already chosen end date when a new start is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Keep,
    ClearEnd,
}

/// Inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        let end = validate_range(Some(start), end)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 00:00:00.000 on the first day.
    pub fn start_of_day(&self) -> NaiveDateTime {
        start_of_day(self.start)
    }

    /// 23:59:59.999 on the last day.
    pub fn end_of_day(&self) -> NaiveDateTime {
        end_of_day(self.end)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start_of_day() <= instant && instant <= self.end_of_day()
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::milliseconds(LAST_MILLI_OF_DAY)
}

/// Builds the "last N days" window ending on the calendar day of `reference_now`.
///
/// The window is inclusive, so `days_back = 7` starts six days earlier.
/// Zero is treated as one (today only). Windows reaching past the earliest
/// representable date start at [`NaiveDate::MIN`]. The wall clock is never
/// read here; callers pass `now` explicitly.
pub fn build_preset_range(days_back: u32, reference_now: NaiveDateTime) -> DateRange {
    let end = reference_now.date();
    let start = end
        .checked_sub_days(Days::new(u64::from(days_back.max(1) - 1)))
        .unwrap_or(NaiveDate::MIN);
    DateRange { start, end }
}

/// Accepts `candidate_end` unless it falls before `candidate_start`.
pub fn validate_range(
    candidate_start: Option<NaiveDate>,
    candidate_end: NaiveDate,
) -> Result<NaiveDate, RangeError> {
    match candidate_start {
        Some(start) if candidate_end < start => Err(RangeError::EndBeforeStart {
            start,
            end: candidate_end,
        }),
        _ => Ok(candidate_end),
    }
}

/// Decides whether an existing end date survives a newly picked start.
pub fn validate_start(
    candidate_start: NaiveDate,
    existing_end: Option<NaiveDate>,
) -> StartOutcome {
    match existing_end {
        Some(end) if end < candidate_start => StartOutcome::ClearEnd,
        _ => StartOutcome::Keep,
    }
}
