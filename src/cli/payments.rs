use super::ui;
use crate::core::config::AppConfig;
use crate::core::filter::{self, ALL_TOURNAMENTS, FilterSpec, TournamentFilter};
use crate::core::range::RangeError;
use crate::core::selection::RangeSelection;
use crate::core::source::DataSource;
use crate::core::transaction::{TransactionKind, TransactionRecord};
use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::Cell;
use serde::Serialize;
use tracing::debug;

/// Filter choices for the payments view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentsArgs {
    pub tab: TransactionKind,
    pub tournament: Option<String>,
    /// "Last N days" preset.
    pub last: Option<u32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub json: bool,
}

/// Filter derived from the arguments, plus a notice for a rejected end date.
#[derive(Debug)]
pub struct PaymentsView {
    pub spec: FilterSpec,
    pub selection: RangeSelection,
    pub notice: Option<RangeError>,
}

/// Replays the user's choices through the range selection, the same way the
/// dropdown and date pickers would.
pub fn build_view(
    args: &PaymentsArgs,
    config: &AppConfig,
    now: NaiveDateTime,
) -> Result<PaymentsView> {
    let tournament_filter = match args.tournament.as_deref() {
        None | Some(ALL_TOURNAMENTS) => TournamentFilter::All,
        Some(name) if config.tournaments.iter().any(|t| t == name) => {
            TournamentFilter::Named(name.to_string())
        }
        Some(name) => bail!(
            "Unknown tournament '{}'. Choose one of: {}, {}",
            name,
            ALL_TOURNAMENTS,
            config.tournaments.join(", ")
        ),
    };

    let mut selection = RangeSelection::new();
    let mut notice = None;

    if let Some(days) = args.last {
        if !config.presets.contains(&days) {
            bail!(
                "Unsupported preset of {} days. Available presets: {:?}",
                days,
                config.presets
            );
        }
        selection.apply_preset(days, now);
    } else if args.from.is_some() || args.to.is_some() {
        selection.open_custom();
        if let Some(start) = args.from {
            selection.confirm_start(start);
        }
        if let Some(end) = args.to
            && let Err(e) = selection.confirm_end(end)
        {
            notice = Some(e);
        }
    }

    let spec = FilterSpec::new()
        .with_tournament(tournament_filter)
        .with_date_range(selection.date_range());
    debug!(?spec, state = ?selection.state(), "Built payments filter");

    Ok(PaymentsView {
        spec,
        selection,
        notice,
    })
}

#[derive(Serialize)]
struct PaymentsReport<'a> {
    tab: String,
    filter: &'a FilterSpec,
    range_label: Option<String>,
    unparsed: usize,
    transactions: Vec<&'a TransactionRecord>,
}

pub fn render_table(records: &[&TransactionRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Amount"),
        ui::header_cell("Description"),
        ui::header_cell("Date"),
        ui::header_cell("Tournament"),
        ui::header_cell("Status"),
    ]);

    for record in records {
        table.add_row(vec![
            ui::amount_cell(record.amount_label(), record.flow()),
            Cell::new(record.description()),
            Cell::new(record.occurred_at()),
            Cell::new(record.tournament_name().unwrap_or("-")),
            ui::status_cell(record.status()),
        ]);
    }
    table.to_string()
}

pub async fn run(
    source: &dyn DataSource,
    config: &AppConfig,
    args: &PaymentsArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let view = build_view(args, config, now)?;

    if let Some(notice) = &view.notice {
        eprintln!("{}", ui::style_text(&notice.to_string(), ui::StyleType::Error));
    }

    let records =
        ui::with_spinner("Loading payments...", source.fetch_transactions()).await?;
    let tab_records: Vec<TransactionRecord> = records
        .into_iter()
        .filter(|r| r.kind() == args.tab)
        .collect();
    let outcome = filter::filter_with_outcome(&tab_records, &view.spec);

    if args.json {
        let report = PaymentsReport {
            tab: args.tab.to_string(),
            filter: &view.spec,
            range_label: view.selection.label(),
            unparsed: outcome.unparsed,
            transactions: outcome.records,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Payments: {}  Tournament: {}  Date Range: {}\n",
        ui::style_text(&args.tab.to_string(), ui::StyleType::Title),
        ui::style_text(&view.spec.tournament_filter.to_string(), ui::StyleType::Label),
        ui::style_text(
            view.selection.label().as_deref().unwrap_or("Any"),
            ui::StyleType::Label
        ),
    );

    if outcome.records.is_empty() {
        println!(
            "{}",
            ui::style_text(
                "No transactions match the current filters.",
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    println!("{}", render_table(&outcome.records));
    if outcome.unparsed > 0 {
        println!(
            "\n{}",
            ui::style_text(
                &format!(
                    "{} transaction(s) have an unreadable date and were kept \
                     regardless of the date range.",
                    outcome.unparsed
                ),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::SelectionState;
    use crate::providers::mock::sample_transactions;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(2023, 10, 26).and_hms_opt(18, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_have_no_predicates() {
        let view = build_view(&PaymentsArgs::default(), &AppConfig::default(), now()).unwrap();
        assert_eq!(view.spec, FilterSpec::new());
        assert!(view.notice.is_none());
        assert_eq!(view.selection.state(), SelectionState::Idle);
    }

    #[test]
    fn test_unknown_tournament_is_rejected() {
        let args = PaymentsArgs {
            tournament: Some("Nope Cup".to_string()),
            ..Default::default()
        };
        let err = build_view(&args, &AppConfig::default(), now()).unwrap_err();
        assert!(err.to_string().contains("Unknown tournament"));
    }

    #[test]
    fn test_preset_must_be_configured() {
        let args = PaymentsArgs {
            last: Some(14),
            ..Default::default()
        };
        assert!(build_view(&args, &AppConfig::default(), now()).is_err());

        let args = PaymentsArgs {
            last: Some(7),
            ..Default::default()
        };
        let view = build_view(&args, &AppConfig::default(), now()).unwrap();
        let range = view.spec.date_range.unwrap();
        assert_eq!(range.start(), date(2023, 10, 20));
        assert_eq!(range.end(), date(2023, 10, 26));
    }

    #[test]
    fn test_huge_configured_preset_is_clamped() {
        let config = AppConfig {
            presets: vec![200_000_000],
            ..Default::default()
        };
        let args = PaymentsArgs {
            last: Some(200_000_000),
            ..Default::default()
        };
        let view = build_view(&args, &config, now()).unwrap();
        let range = view.spec.date_range.unwrap();
        assert_eq!(range.start(), NaiveDate::MIN);
        assert_eq!(range.end(), date(2023, 10, 26));

        let records = sample_transactions();
        assert_eq!(filter::filter(&records, &view.spec).len(), records.len());
    }

    #[test]
    fn test_reversed_custom_range_keeps_start_only() {
        let args = PaymentsArgs {
            from: Some(date(2023, 10, 25)),
            to: Some(date(2023, 10, 20)),
            ..Default::default()
        };
        let view = build_view(&args, &AppConfig::default(), now()).unwrap();
        assert!(matches!(view.notice, Some(RangeError::EndBeforeStart { .. })));
        assert!(view.spec.date_range.is_none());
        assert_eq!(view.selection.label().as_deref(), Some("From 2023-10-25"));
    }

    #[test]
    fn test_end_without_start() {
        let args = PaymentsArgs {
            to: Some(date(2023, 10, 20)),
            ..Default::default()
        };
        let view = build_view(&args, &AppConfig::default(), now()).unwrap();
        assert_eq!(view.notice, Some(RangeError::StartRequired));
        assert!(view.spec.date_range.is_none());
    }

    #[test]
    fn test_custom_range_and_tournament_filter_records() {
        let args = PaymentsArgs {
            tournament: Some("Summer Smash Fest 2024".to_string()),
            from: Some(date(2023, 10, 25)),
            to: Some(date(2023, 10, 26)),
            ..Default::default()
        };
        let view = build_view(&args, &AppConfig::default(), now()).unwrap();
        let records = sample_transactions();
        let kept = filter::filter(&records, &view.spec);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].description(), "Ticket Sale: John D.");
    }

    #[test]
    fn test_render_table_contains_rows() {
        let records = sample_transactions();
        let refs: Vec<&TransactionRecord> = records.iter().collect();
        let rendered = render_table(&refs);
        assert!(rendered.contains("Ticket Sale: John D."));
        assert!(rendered.contains("Refunded"));
    }
}
