use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tourney::core::filter::{self, FilterSpec};
use tourney::core::source::DataSource;
use tourney::core::tournament::{EventStage, TournamentCategory};
use tourney::core::transaction::TransactionKind;
use tourney::core::{DateRange, RangeSelection};
use tourney::providers::MockDataSource;
use tourney::{AppCommand, PaymentsArgs};
use tracing::info;

// No artificial latency so the flows run quickly
const FAST_CONFIG: &str = r#"
tournaments:
  - "Summer Smash Fest 2024"
  - "Apex Arena Championship"
presets: [7, 30]
loader:
  transaction_delay_ms: 0
  tournament_delay_ms: 0
  event_delay_ms: 0
"#;

fn write_config(dir: &Path) -> String {
    let path = dir.join("config.yaml");
    fs::write(&path, FAST_CONFIG).expect("Failed to write config file");
    path.to_str().unwrap().to_string()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_payments_flow_with_custom_range() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = write_config(dir.path());

    let args = PaymentsArgs {
        tournament: Some("Summer Smash Fest 2024".to_string()),
        from: Some(date(2023, 10, 24)),
        to: Some(date(2023, 10, 26)),
        json: true,
        ..Default::default()
    };
    let result = tourney::run_command(AppCommand::Payments(args), Some(&config_path)).await;
    assert!(result.is_ok(), "Payments failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_payments_flow_with_rejected_end_date_still_lists() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = write_config(dir.path());

    let args = PaymentsArgs {
        tab: TransactionKind::Refunds,
        from: Some(date(2023, 10, 26)),
        to: Some(date(2023, 10, 1)),
        ..Default::default()
    };
    let result = tourney::run_command(AppCommand::Payments(args), Some(&config_path)).await;
    assert!(result.is_ok(), "Payments failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_payments_unknown_tournament_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = write_config(dir.path());

    let args = PaymentsArgs {
        tournament: Some("Mystery Invitational".to_string()),
        ..Default::default()
    };
    let result = tourney::run_command(AppCommand::Payments(args), Some(&config_path)).await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_tournament_and_event_listings() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = write_config(dir.path());

    for command in [
        AppCommand::Tournaments(None),
        AppCommand::Tournaments(Some(TournamentCategory::Past)),
        AppCommand::Events(None),
        AppCommand::Events(Some(EventStage::Live)),
    ] {
        info!(?command, "Running listing");
        let result = tourney::run_command(command, Some(&config_path)).await;
        assert!(result.is_ok(), "Listing failed with: {:?}", result.err());
    }
}

#[test_log::test(tokio::test)]
async fn test_validate_sample_drafts() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = write_config(dir.path());
    let docs = Path::new(env!("CARGO_MANIFEST_DIR")).join("docs");

    let tournament = tourney::run_command(
        AppCommand::ValidateTournament(docs.join("tournament_draft.yaml")),
        Some(&config_path),
    )
    .await;
    assert!(tournament.is_ok(), "Draft failed with: {:?}", tournament.err());

    let event = tourney::run_command(
        AppCommand::ValidateEvent(docs.join("event_draft.yaml")),
        Some(&config_path),
    )
    .await;
    assert!(event.is_ok(), "Draft failed with: {:?}", event.err());
}

#[test_log::test(tokio::test)]
async fn test_validate_incomplete_tournament_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = write_config(dir.path());
    let draft = dir.path().join("draft.yaml");
    fs::write(&draft, "tournament_name: \"Half Done Open\"\n").unwrap();

    let result =
        tourney::run_command(AppCommand::ValidateTournament(draft), Some(&config_path)).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Step 1 (Details)"));
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let result = tourney::run_command(
        AppCommand::Tournaments(None),
        Some("/definitely/not/a/config.yaml"),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_load_then_filter() {
    let source = MockDataSource::instant();
    let records = source.fetch_transactions().await.unwrap();

    let mut selection = RangeSelection::new();
    selection.open_custom();
    selection.confirm_start(date(2023, 10, 25));
    selection.confirm_end(date(2023, 10, 28)).unwrap();
    assert_eq!(
        selection.date_range(),
        Some(DateRange::new(date(2023, 10, 25), date(2023, 10, 28)).unwrap())
    );

    let spec = FilterSpec::new().with_date_range(selection.date_range());
    let kept = filter::filter(&records, &spec);
    let ids: Vec<String> = kept.iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, vec!["1", "2", "4", "5"]);

    // Narrowing to a tournament drops the unassigned payout
    let spec = spec.with_tournament("Summer Smash Fest 2024");
    let kept = filter::filter(&records, &spec);
    let ids: Vec<String> = kept.iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, vec!["1", "4"]);
}
