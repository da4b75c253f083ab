use super::ui;
use crate::core::source::DataSource;
use crate::core::tournament::{EventStage, ScheduledEvent};
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;

fn render_table(events: &[ScheduledEvent]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Event"),
        ui::header_cell("Dates"),
        ui::header_cell("Status"),
    ]);
    for event in events {
        table.add_row(vec![
            Cell::new(&event.name),
            Cell::new(&event.date_label),
            Cell::new(&event.status),
        ]);
    }
    table.to_string()
}

pub async fn run(source: &dyn DataSource, stage: Option<EventStage>) -> Result<()> {
    let stages = stage.map_or_else(|| EventStage::ALL.to_vec(), |s| vec![s]);

    let loads = stages
        .iter()
        .map(|stage| async move { (*stage, source.fetch_events(*stage).await) });
    let results = ui::with_spinner("Loading events...", join_all(loads)).await;

    for (stage, result) in results {
        let events = result?;
        println!("\n{}", ui::style_text(&stage.to_string(), ui::StyleType::Title));
        if events.is_empty() {
            println!("{}", ui::style_text("No events.", ui::StyleType::Subtle));
        } else {
            println!("{}", render_table(&events));
        }
    }
    Ok(())
}
