use super::ui;
use crate::core::source::DataSource;
use crate::core::tournament::{Tournament, TournamentCategory};
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;

pub fn render_table(tournaments: &[Tournament]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Title"),
        ui::header_cell("Dates"),
        ui::header_cell("Status"),
    ]);
    for t in tournaments {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(&t.date_label),
            Cell::new(&t.status),
        ]);
    }
    table.to_string()
}

/// Shows one category tab, or every tab when none is given.
pub async fn run(source: &dyn DataSource, tab: Option<TournamentCategory>) -> Result<()> {
    let categories: Vec<TournamentCategory> = match tab {
        Some(category) => vec![category],
        None => TournamentCategory::ALL.to_vec(),
    };

    let loads = categories.iter().map(|category| async move {
        (*category, source.fetch_tournaments(*category).await)
    });
    let results = ui::with_spinner("Loading tournaments...", join_all(loads)).await;

    let count = results.len();
    for (i, (category, result)) in results.into_iter().enumerate() {
        let tournaments = result?;
        println!(
            "{} {}",
            ui::style_text(&category.to_string(), ui::StyleType::Title),
            ui::style_text(&format!("({})", tournaments.len()), ui::StyleType::Subtle)
        );
        if tournaments.is_empty() {
            println!(
                "{}",
                ui::style_text("No tournaments in this tab.", ui::StyleType::Subtle)
            );
        } else {
            println!("{}", render_table(&tournaments));
        }
        if i + 1 < count {
            ui::print_separator();
        }
    }
    Ok(())
}
