//! Courier CLI - Command-line interface
//!
//! Runs the delivery API server or a headless seeded simulation.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use courier_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "courier")]
#[command(about = "Reliable vs unreliable message delivery simulator")]
struct Cli {
    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info, global = true)]
    log_level: CliLogLevel,

    /// Directory for the full debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())?;

    commands::handle_command(cli.command).await?;

    Ok(())
}
