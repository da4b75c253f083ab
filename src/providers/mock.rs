use crate::core::config::LoaderConfig;
use crate::core::source::DataSource;
use crate::core::tournament::{
    EventStage, ScheduledEvent, Tournament, TournamentCategory, filter_by_category,
    filter_by_stage,
};
use crate::core::transaction::{TransactionKind, TransactionRecord, TransactionStatus};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// In-memory data with an artificial delay before each load.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    delays: LoaderConfig,
}

impl MockDataSource {
    pub fn new(delays: LoaderConfig) -> Self {
        Self { delays }
    }

    /// No delays at all, for tests.
    pub fn instant() -> Self {
        Self::new(LoaderConfig {
            transaction_delay_ms: 0,
            tournament_delay_ms: 0,
            event_delay_ms: 0,
        })
    }
}

async fn simulate_latency(what: &str, delay_ms: u64) {
    if delay_ms > 0 {
        debug!(what, delay_ms, "Simulating load delay");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

pub fn sample_transactions() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::new(
            1,
            "+$50.00",
            "Ticket Sale: John D.",
            "Oct 26, 2023, 3:45 PM",
            TransactionStatus::Paid,
            Some("Summer Smash Fest 2024"),
        ),
        TransactionRecord::new(
            2,
            "+$120.00",
            "Ticket Sale: Ultimate Melee Weekly",
            "Oct 25, 2023, 11:10 AM",
            TransactionStatus::Paid,
            Some("Apex Arena Championship"),
        ),
        TransactionRecord::new(
            3,
            "+$25.00",
            "Ticket Sale: Jane S.",
            "Oct 24, 2023, 9:02 PM",
            TransactionStatus::Pending,
            Some("Summer Smash Fest 2024"),
        ),
        TransactionRecord::new(
            4,
            "-$25.00",
            "Refund: Jane S.",
            "Oct 27, 2023, 10:15 AM",
            TransactionStatus::Other("Refunded".to_string()),
            Some("Summer Smash Fest 2024"),
        )
        .with_kind(TransactionKind::Refunds),
        TransactionRecord::new(
            5,
            "-$145.00",
            "Payout to bank account",
            "2023-10-28T09:00:00",
            TransactionStatus::Pending,
            None,
        )
        .with_kind(TransactionKind::Payouts),
    ]
}

pub fn sample_tournaments() -> Vec<Tournament> {
    vec![
        Tournament {
            id: 1,
            title: "Summer Smash Fest 2024".to_string(),
            date_label: "Aug 15 - Aug 18, 2024".to_string(),
            status: "Live".to_string(),
            category: TournamentCategory::Running,
        },
        Tournament {
            id: 2,
            title: "Apex Arena Championship".to_string(),
            date_label: "Sep 01 - Sep 03, 2024".to_string(),
            status: "Scheduled".to_string(),
            category: TournamentCategory::Upcoming,
        },
        Tournament {
            id: 3,
            title: "Valorant Vanguard League".to_string(),
            date_label: "Jun 10 - Jun 15, 2024".to_string(),
            status: "Completed".to_string(),
            category: TournamentCategory::Past,
        },
    ]
}

const SAMPLE_EVENTS: [(u32, &str, &str, &str, EventStage); 6] = [
    (1, "Men's Singles", "Nov 12 - Nov 15, 2025", "Pending", EventStage::Create),
    (2, "Women's Doubles", "Nov 14 - Nov 17, 2025", "Pending", EventStage::Create),
    (3, "Under 19 Singles", "Nov 10 - Nov 12, 2025", "Configuring", EventStage::Configure),
    (4, "Junior Championship", "Nov 18 - Nov 20, 2025", "Scheduled", EventStage::Schedule),
    (5, "Men's Division Finals", "Nov 21 - Nov 22, 2025", "Live", EventStage::Live),
    (6, "Veterans League", "Nov 01 - Nov 03, 2025", "Completed", EventStage::Complete),
];

pub fn sample_events() -> Vec<ScheduledEvent> {
    SAMPLE_EVENTS
        .iter()
        .map(|&(id, name, date_label, status, stage)| ScheduledEvent {
            id,
            name: name.to_string(),
            date_label: date_label.to_string(),
            status: status.to_string(),
            stage,
        })
        .collect()
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>> {
        simulate_latency("transactions", self.delays.transaction_delay_ms).await;
        Ok(sample_transactions())
    }

    async fn fetch_tournaments(&self, category: TournamentCategory) -> Result<Vec<Tournament>> {
        simulate_latency("tournaments", self.delays.tournament_delay_ms).await;
        Ok(filter_by_category(&sample_tournaments(), category))
    }

    async fn fetch_events(&self, stage: EventStage) -> Result<Vec<ScheduledEvent>> {
        simulate_latency("events", self.delays.event_delay_ms).await;
        Ok(filter_by_stage(&sample_events(), stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_tournaments_by_category() {
        let source = MockDataSource::instant();
        let running = source
            .fetch_tournaments(TournamentCategory::Running)
            .await
            .unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].title, "Summer Smash Fest 2024");

        let past = source.fetch_tournaments(TournamentCategory::Past).await.unwrap();
        assert_eq!(past[0].status, "Completed");
    }

    #[tokio::test]
    async fn test_fetch_events_by_stage() {
        let source = MockDataSource::instant();
        let created = source.fetch_events(EventStage::Create).await.unwrap();
        assert_eq!(created.len(), 2);
        for stage in EventStage::ALL {
            assert!(!source.fetch_events(stage).await.unwrap().is_empty());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let source = MockDataSource::new(LoaderConfig::default());
        let started = tokio::time::Instant::now();
        let _ = source.fetch_tournaments(TournamentCategory::Upcoming).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_fetch_transactions() {
        let records = MockDataSource::instant().fetch_transactions().await.unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].amount_label(), "+$50.00");
        assert!(records.iter().any(|r| r.tournament_name().is_none()));
    }
}
