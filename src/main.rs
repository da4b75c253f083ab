use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tourney::core::log::init_logging;
use tourney::core::tournament::{EventStage, TournamentCategory};
use tourney::core::transaction::TransactionKind;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List payments filtered by tournament and date range
    Payments {
        /// Payments tab: income, refunds or payouts
        #[arg(long, default_value = "income")]
        tab: TransactionKind,

        /// Exact tournament name, or "All"
        #[arg(short, long)]
        tournament: Option<String>,

        /// Preset window of the last N days, including today
        #[arg(long, conflicts_with_all = ["from", "to"])]
        last: Option<u32>,

        /// Custom range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Custom range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List tournaments by category
    Tournaments {
        /// running, upcoming or past; all tabs when omitted
        #[arg(long)]
        tab: Option<TournamentCategory>,
    },
    /// List scheduled events by stage
    Events {
        /// create, configure, schedule, live or complete; all stages when omitted
        #[arg(long)]
        stage: Option<EventStage>,
    },
    /// Validate a form draft stored as YAML
    Validate {
        #[command(subcommand)]
        form: ValidateForm,
    },
}

#[derive(Subcommand)]
enum ValidateForm {
    /// Walk a tournament draft through the creation steps
    Tournament { path: PathBuf },
    /// Check an event draft
    Event { path: PathBuf },
}

impl From<Commands> for tourney::AppCommand {
    fn from(cmd: Commands) -> tourney::AppCommand {
        match cmd {
            Commands::Payments {
                tab,
                tournament,
                last,
                from,
                to,
                json,
            } => tourney::AppCommand::Payments(tourney::PaymentsArgs {
                tab,
                tournament,
                last,
                from,
                to,
                json,
            }),
            Commands::Tournaments { tab } => tourney::AppCommand::Tournaments(tab),
            Commands::Events { stage } => tourney::AppCommand::Events(stage),
            Commands::Validate { form } => match form {
                ValidateForm::Tournament { path } => tourney::AppCommand::ValidateTournament(path),
                ValidateForm::Event { path } => tourney::AppCommand::ValidateEvent(path),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tourney::cli::setup::setup(),
        Some(cmd) => tourney::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
