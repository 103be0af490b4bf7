//! Binary entry point that glues the SQLite-backed ticket desk to the TUI.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ticket_desk::logging::init_logging;
use ticket_desk::{run_app, App, Config, Desk};

#[derive(Parser, Debug)]
#[command(name = "ticket-desk", about = "Book, print and analyse travel tickets")]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for generated PDFs and CSV exports.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Load configuration, open the store, and run the Ratatui event loop until
/// the user exits.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    init_logging(&config)?;
    info!(database = %config.database_path().display(), "starting ticket desk");

    let desk = Desk::open(&config).context("failed to open the reservation database")?;
    let mut app = App::new(desk)?;
    let result = run_app(&mut app);

    app.into_desk()
        .close()
        .context("failed to close the reservation database")?;
    result
}
