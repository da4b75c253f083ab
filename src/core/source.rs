//! Data loading abstractions

use crate::core::tournament::{EventStage, ScheduledEvent, Tournament, TournamentCategory};
use crate::core::transaction::TransactionRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Supplies records to the views. Loading may be slow; filtering happens
/// afterwards on the returned data.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>>;

    /// Tournaments belonging to `category`.
    async fn fetch_tournaments(&self, category: TournamentCategory) -> Result<Vec<Tournament>>;

    async fn fetch_events(&self, stage: EventStage) -> Result<Vec<ScheduledEvent>>;
}
