pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::tournament::{EventStage, TournamentCategory};
use anyhow::Result;
use chrono::{Datelike, Local};
use std::path::PathBuf;
use tracing::{debug, info};

pub use cli::payments::PaymentsArgs;

#[derive(Debug, Clone)]
pub enum AppCommand {
    Payments(PaymentsArgs),
    Tournaments(Option<TournamentCategory>),
    Events(Option<EventStage>),
    ValidateTournament(PathBuf),
    ValidateEvent(PathBuf),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Tourney starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = providers::MockDataSource::new(config.loader.clone());
    let now = Local::now().naive_local();

    match command {
        AppCommand::Payments(args) => cli::payments::run(&source, &config, &args, now).await,
        AppCommand::Tournaments(tab) => cli::tournaments::run(&source, tab).await,
        AppCommand::Events(stage) => cli::events::run(&source, stage).await,
        AppCommand::ValidateTournament(path) => cli::validate::run_tournament(&path),
        AppCommand::ValidateEvent(path) => cli::validate::run_event(&path, now.year()),
    }
}
