//! Transaction records shown in the payments view

use anyhow::anyhow;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Identifier of a transaction, numeric or free-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Paid,
    Pending,
    Other(String),
}

/// Display tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Positive,
    Warning,
    Neutral,
}

impl TransactionStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            TransactionStatus::Paid => StatusTone::Positive,
            TransactionStatus::Pending => StatusTone::Warning,
            TransactionStatus::Other(_) => StatusTone::Neutral,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Paid" => TransactionStatus::Paid,
            "Pending" => TransactionStatus::Pending,
            _ => TransactionStatus::Other(value),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        value.to_string()
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Paid => write!(f, "Paid"),
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Payments tab a transaction is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionKind {
    #[default]
    Income,
    Refunds,
    Payouts,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionKind::Income => "Income",
                TransactionKind::Refunds => "Refunds",
                TransactionKind::Payouts => "Payouts",
            }
        )
    }
}

impl FromStr for TransactionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "refunds" | "refund" => Ok(TransactionKind::Refunds),
            "payouts" | "payout" => Ok(TransactionKind::Payouts),
            _ => Err(anyhow!("Invalid payments tab: {}", s)),
        }
    }
}

/// Direction of money, derived from the sign of the amount label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Inflow,
    Outflow,
}

/// A single payment line. Immutable once built; the filter only selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    id: RecordId,
    amount_label: String,
    description: String,
    occurred_at: String,
    status: TransactionStatus,
    tournament_name: Option<String>,
    #[serde(default)]
    kind: TransactionKind,
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<RecordId>,
        amount_label: &str,
        description: &str,
        occurred_at: &str,
        status: TransactionStatus,
        tournament_name: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            amount_label: amount_label.to_string(),
            description: description.to_string(),
            occurred_at: occurred_at.to_string(),
            status,
            tournament_name: tournament_name.map(str::to_string),
            kind: TransactionKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn amount_label(&self) -> &str {
        &self.amount_label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn occurred_at(&self) -> &str {
        &self.occurred_at
    }

    pub fn status(&self) -> &TransactionStatus {
        &self.status
    }

    /// `None` when the transaction is not assigned to a tournament.
    pub fn tournament_name(&self) -> Option<&str> {
        self.tournament_name.as_deref()
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn flow(&self) -> Flow {
        if self.amount_label.trim_start().starts_with('-') {
            Flow::Outflow
        } else {
            Flow::Inflow
        }
    }

    /// When the transaction happened, as wall-clock time in the local zone.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.occurred_at)
    }

    pub fn timestamp_in<Tz: TimeZone>(&self, zone: &Tz) -> Option<NaiveDateTime> {
        parse_timestamp_in(&self.occurred_at, zone)
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%b %d, %Y, %I:%M %p",
];

/// Parses the timestamp formats seen in transaction feeds into local wall-clock time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    parse_timestamp_in(value, &Local)
}

/// Parses a timestamp into wall-clock time in `zone`.
///
/// RFC 3339 values name an instant and are shifted into `zone`. Values
/// without an offset are already wall-clock time and are kept as written.
/// A bare date means midnight.
pub fn parse_timestamp_in<Tz: TimeZone>(value: &str, zone: &Tz) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(zone).naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
