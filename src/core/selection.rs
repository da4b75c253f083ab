//! Interactive custom date-range selection.
//!
//! Holds the picker state that would otherwise live in ambient UI flags.
//! The selection never stores a range whose end precedes its start.
use crate::core::range::{
    DateRange, RangeError, StartOutcome, build_preset_range, validate_range, validate_start,
};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    AwaitingStart,
    AwaitingEnd { start: NaiveDate },
    RangeComplete(DateRange),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSelection {
    state: SelectionState,
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Opens the custom-range control. Re-opening restarts the selection.
    pub fn open_custom(&mut self) {
        debug!(from = ?self.state, "Opening custom range selection");
        self.state = SelectionState::AwaitingStart;
    }

    /// Confirms a start date.
    ///
    /// On a completed range the existing end is kept if it still lies on or
    /// after the new start, otherwise it is cleared and an end is awaited.
    pub fn confirm_start(&mut self, start: NaiveDate) -> StartOutcome {
        let existing_end = match self.state {
            SelectionState::RangeComplete(range) => Some(range.end()),
            _ => None,
        };

        let outcome = validate_start(start, existing_end);
        self.state = match (outcome, existing_end) {
            (StartOutcome::Keep, Some(end)) => match DateRange::new(start, end) {
                Ok(range) => SelectionState::RangeComplete(range),
                Err(_) => SelectionState::AwaitingEnd { start },
            },
            _ => SelectionState::AwaitingEnd { start },
        };

        if outcome == StartOutcome::ClearEnd {
            debug!(%start, "New start is after the chosen end, end cleared");
        }
        outcome
    }

    /// Confirms an end date.
    ///
    /// A candidate before the start is discarded and the state is left as it
    /// was, so the caller can show the error as a notice and re-prompt.
    pub fn confirm_end(&mut self, end: NaiveDate) -> Result<DateRange, RangeError> {
        let start = self.start().ok_or(RangeError::StartRequired)?;

        match validate_range(Some(start), end) {
            Ok(end) => {
                let range = DateRange::new(start, end)?;
                self.state = SelectionState::RangeComplete(range);
                Ok(range)
            }
            Err(e) => {
                warn!(%start, %end, "Rejected end date: {e}");
                Err(e)
            }
        }
    }

    /// Applies a "last N days" preset, replacing any selection in progress.
    pub fn apply_preset(&mut self, days_back: u32, reference_now: NaiveDateTime) -> DateRange {
        let range = build_preset_range(days_back, reference_now);
        self.state = SelectionState::RangeComplete(range);
        range
    }

    /// Cancels or clears the selection.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// The confirmed start date, if any.
    pub fn start(&self) -> Option<NaiveDate> {
        match self.state {
            SelectionState::AwaitingEnd { start } => Some(start),
            SelectionState::RangeComplete(range) => Some(range.start()),
            _ => None,
        }
    }

    /// The range to feed into a `FilterSpec`, once complete.
    pub fn date_range(&self) -> Option<DateRange> {
        match self.state {
            SelectionState::RangeComplete(range) => Some(range),
            _ => None,
        }
    }

    /// Short label for the filter pill.
    pub fn label(&self) -> Option<String> {
        match self.state {
            SelectionState::RangeComplete(range) => Some(range.to_string()),
            SelectionState::AwaitingEnd { start } => {
                Some(format!("From {}", start.format("%Y-%m-%d")))
            }
            _ => None,
        }
    }
}
