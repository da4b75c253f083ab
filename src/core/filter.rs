//! Client-side filtering of the payments list.
//!
//! The filter is a pure function of the records and a [`FilterSpec`]: it keeps
//! the input order and never touches the records themselves. Predicates are
//! evaluated per record and short-circuit on the first failure:
//!
//! 1. tournament name, unless the filter is [`TournamentFilter::All`]
//! 2. date range, if one is set
//!
//! Timestamps carrying an offset are compared as instants, shifted into the
//! zone the range's days are expressed in (the local zone by default).
//!
//! Records whose timestamp cannot be parsed pass the date predicate. They are
//! reported in [`FilterOutcome::unparsed`] so the caller can surface them.
use crate::core::range::DateRange;
use crate::core::transaction::TransactionRecord;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{debug, warn};

/// Dropdown value meaning "no tournament restriction".
pub const ALL_TOURNAMENTS: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TournamentFilter {
    #[default]
    All,
    Named(String),
}

impl TournamentFilter {
    /// Exact, case-sensitive match. Unassigned records only pass `All`.
    pub fn matches(&self, tournament_name: Option<&str>) -> bool {
        match self {
            TournamentFilter::All => true,
            TournamentFilter::Named(name) => tournament_name == Some(name.as_str()),
        }
    }
}

impl From<&str> for TournamentFilter {
    fn from(value: &str) -> Self {
        if value == ALL_TOURNAMENTS {
            TournamentFilter::All
        } else {
            TournamentFilter::Named(value.to_string())
        }
    }
}

impl From<String> for TournamentFilter {
    fn from(value: String) -> Self {
        if value == ALL_TOURNAMENTS {
            TournamentFilter::All
        } else {
            TournamentFilter::Named(value)
        }
    }
}

impl From<TournamentFilter> for String {
    fn from(value: TournamentFilter) -> Self {
        value.to_string()
    }
}

impl Display for TournamentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentFilter::All => write!(f, "{ALL_TOURNAMENTS}"),
            TournamentFilter::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Predicates a view wants applied. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub tournament_filter: TournamentFilter,
    pub date_range: Option<DateRange>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tournament(mut self, filter: impl Into<TournamentFilter>) -> Self {
        self.tournament_filter = filter.into();
        self
    }

    pub fn with_date_range(mut self, range: Option<DateRange>) -> Self {
        self.date_range = range;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
    pub records: Vec<&'a TransactionRecord>,
    /// Kept only because their timestamp could not be parsed.
    pub unparsed: usize,
}

enum Verdict {
    Excluded,
    Included,
    IncludedUnparsed,
}

fn evaluate<Tz: TimeZone>(record: &TransactionRecord, spec: &FilterSpec, zone: &Tz) -> Verdict {
    if !spec.tournament_filter.matches(record.tournament_name()) {
        return Verdict::Excluded;
    }

    let Some(range) = &spec.date_range else {
        return Verdict::Included;
    };

    match record.timestamp_in(zone) {
        None => {
            warn!(
                id = %record.id(),
                occurred_at = record.occurred_at(),
                "Unparseable transaction date, keeping record"
            );
            Verdict::IncludedUnparsed
        }
        Some(instant) if range.contains(instant) => Verdict::Included,
        Some(_) => Verdict::Excluded,
    }
}

pub fn filter_with_outcome<'a>(
    records: &'a [TransactionRecord],
    spec: &FilterSpec,
) -> FilterOutcome<'a> {
    filter_with_outcome_in(records, spec, &Local)
}

/// Like [`filter_with_outcome`], with the range's days taken in `zone`.
pub fn filter_with_outcome_in<'a, Tz: TimeZone>(
    records: &'a [TransactionRecord],
    spec: &FilterSpec,
    zone: &Tz,
) -> FilterOutcome<'a> {
    let mut outcome = FilterOutcome {
        records: Vec::with_capacity(records.len()),
        unparsed: 0,
    };

    for record in records {
        match evaluate(record, spec, zone) {
            Verdict::Excluded => {}
            Verdict::Included => outcome.records.push(record),
            Verdict::IncludedUnparsed => {
                outcome.unparsed += 1;
                outcome.records.push(record);
            }
        }
    }

    debug!(
        total = records.len(),
        kept = outcome.records.len(),
        unparsed = outcome.unparsed,
        tournament = %spec.tournament_filter,
        "Filtered transactions"
    );
    outcome
}

pub fn filter_refs<'a>(
    records: &'a [TransactionRecord],
    spec: &FilterSpec,
) -> Vec<&'a TransactionRecord> {
    filter_with_outcome(records, spec).records
}

/// Returns the visible subset of `records`, in input order.
pub fn filter(records: &[TransactionRecord], spec: &FilterSpec) -> Vec<TransactionRecord> {
    filter_refs(records, spec).into_iter().cloned().collect()
}
