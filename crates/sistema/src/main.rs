//! sistema - daily discipline tracker
//!
//! Entry point wiring together:
//! - Configuration loading
//! - Store initialization
//! - Core engine
//! - Terminal front-end

mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sistema_config::load_config_or_default;
use sistema_core::{Frontend, SistemaEngine, render, rejection_feedback};
use sistema_store::{SqliteStore, StateStore};
use sistema_util::{Clock, DATABASE_FILENAME, SystemClock, default_config_path};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalFrontend;

/// sistema - daily missions, attributes and streaks
#[derive(Parser, Debug)]
#[command(name = "sistema")]
#[command(about = "Daily discipline tracker", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/sistema/config.toml)
    #[arg(short, long, env = "SISTEMA_CONFIG", default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set SISTEMA_DATA_DIR env var)
    #[arg(short, long, env = "SISTEMA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Action>,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Show missions, attributes and weekly progress
    Status,
    /// Mark a mission as completed
    Complete { mission: String },
    /// Mark a mission as failed
    Fail { mission: String },
}

fn run(args: Args) -> Result<ExitCode> {
    let policy = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    let data_dir = args.data_dir.unwrap_or(policy.app.data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = data_dir.join(DATABASE_FILENAME);
    let store: Arc<dyn StateStore> = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );
    info!(db_path = %db_path.display(), "Store initialized");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (mut engine, mut events) =
        SistemaEngine::open(store, clock, policy.rules).context("Failed to start engine")?;

    let action = match args.command.unwrap_or(Action::Status) {
        Action::Status => None,
        Action::Complete { mission } => Some((mission, true)),
        Action::Fail { mission } => Some((mission, false)),
    };

    let mut rejection = None;
    if let Some((mission, success)) = action {
        match engine.complete_mission(&mission, success) {
            Ok(report) => events.extend(report.events),
            Err(e) if e.is_rejection() => {
                warn!(mission = %mission, error = %e, "Action rejected");
                events.extend(engine.take_events());
                rejection = Some(rejection_feedback(&e));
            }
            Err(e) => return Err(e).context("Failed to record mission"),
        }
    }

    let mut frontend = TerminalFrontend::new(std::io::stdout().lock());
    render(&mut frontend, engine.state(), &events, engine.now());

    match rejection {
        Some((message, severity)) => {
            frontend.show_feedback(&message, severity);
            Ok(ExitCode::from(1))
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays the front-end
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "sistema starting");

    run(args)
}
