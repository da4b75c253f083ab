use super::ui;
use crate::core::form::{
    Advance, EventForm, FormStep, TournamentField, TournamentForm, TournamentWizard,
    ValidationErrors, validate_event,
};
use anyhow::{Context, Result, bail};
use comfy_table::Cell;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// How far a tournament draft gets through the creation wizard.
#[derive(Debug)]
pub struct WizardReport {
    pub completed: Vec<FormStep>,
    pub blocked: Option<(FormStep, ValidationErrors<TournamentField>)>,
}

pub fn walk_wizard(form: TournamentForm) -> WizardReport {
    let mut wizard = TournamentWizard::new(form);
    let mut completed = Vec::new();
    loop {
        let step = wizard.step();
        match wizard.next() {
            Ok(Advance::Moved(_)) => completed.push(step),
            Ok(Advance::Submitted) => {
                completed.push(step);
                return WizardReport {
                    completed,
                    blocked: None,
                };
            }
            Err(errors) => {
                return WizardReport {
                    completed,
                    blocked: Some((step, errors)),
                };
            }
        }
    }
}

fn load_form<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse form file: {}", path.display()))
}

fn errors_table<F: Copy + PartialEq + Display>(errors: &ValidationErrors<F>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Problem")]);
    for (field, message) in errors.iter() {
        table.add_row(vec![Cell::new(field), Cell::new(message)]);
    }
    table.to_string()
}

pub fn run_tournament(path: &Path) -> Result<()> {
    let form: TournamentForm = load_form(path)?;
    let report = walk_wizard(form);

    for step in &report.completed {
        println!(
            "{} Step {} ({})",
            ui::style_text("✓", ui::StyleType::Success),
            step.number(),
            step
        );
    }

    match report.blocked {
        None => {
            println!(
                "\n{}",
                ui::style_text(
                    "Tournament created successfully!",
                    ui::StyleType::Success
                )
            );
            Ok(())
        }
        Some((step, errors)) => {
            println!(
                "{} Step {} ({})\n{}",
                ui::style_text("✗", ui::StyleType::Error),
                step.number(),
                step,
                errors_table(&errors)
            );
            bail!(
                "Step {} ({}) has {} invalid field(s)",
                step.number(),
                step,
                errors.len()
            )
        }
    }
}

pub fn run_event(path: &Path, current_year: i32) -> Result<()> {
    let form: EventForm = load_form(path)?;
    match validate_event(&form, current_year) {
        Ok(payload) => {
            println!("{}", ui::style_text("Event is valid", ui::StyleType::Success));
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Err(errors) => {
            println!("{}", errors_table(&errors));
            bail!("Event has {} invalid field(s)", errors.len())
        }
    }
}
