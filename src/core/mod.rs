//! Core business logic abstractions

pub mod config;
pub mod filter;
pub mod form;
pub mod log;
pub mod range;
pub mod selection;
pub mod source;
pub mod tournament;
pub mod transaction;

// Re-export main types for cleaner imports
pub use filter::{FilterOutcome, FilterSpec, TournamentFilter};
pub use range::{DateRange, RangeError, StartOutcome};
pub use selection::{RangeSelection, SelectionState};
pub use source::DataSource;
pub use transaction::{TransactionKind, TransactionRecord, TransactionStatus};
