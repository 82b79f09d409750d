//! CLI command implementations

use anyhow::Context;
use clap::Subcommand;
use courier_core::{ChannelKind, ChannelStats, CourierConfig};
use courier_sim::{DeterministicSimulation, SimulationReport};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the JSON API server
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short = 'p', long)]
        port: Option<u16>,
        /// Seed for reproducible delivery outcomes
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a seeded simulation to completion and print channel stats
    Simulate {
        /// Messages to submit on the reliable channel
        #[arg(short = 'r', long, default_value = "10")]
        reliable: usize,
        /// Messages to submit on the unreliable channel
        #[arg(short = 'u', long, default_value = "100")]
        unreliable: usize,
        /// Seed for reproducible delivery outcomes
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Override the unreliable channel's success probability
        #[arg(long)]
        success_probability: Option<f64>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the underlying error of the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Server { host, port, seed } => start_server(host, port, seed).await,
        Commands::Simulate {
            reliable,
            unreliable,
            seed,
            success_probability,
        } => run_simulation(reliable, unreliable, seed, success_probability),
    }
}

/// Start the API server, with CLI flags taking precedence over the environment
///
/// # Errors
/// - Configuration is invalid or the address cannot be bound
pub async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut config = CourierConfig::from_env();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if seed.is_some() {
        config.simulation.seed = seed;
    }

    courier_web::run_server(config)
        .await
        .map_err(|e| anyhow::anyhow!("server failed: {e}"))
}

/// Run a headless simulation on a virtual clock
///
/// # Errors
/// - Configuration is invalid (for example a probability outside 0.0 to 1.0)
pub fn run_simulation(
    reliable: usize,
    unreliable: usize,
    seed: u64,
    success_probability: Option<f64>,
) -> anyhow::Result<()> {
    let mut config = CourierConfig::from_env().with_seed(seed);
    if let Some(probability) = success_probability {
        config.unreliable.success_probability = probability;
    }

    let mut sim =
        DeterministicSimulation::new(&config).context("invalid simulation configuration")?;

    for i in 0..reliable {
        sim.submit_reliable(&format!("reliable message {}", i + 1));
    }
    for i in 0..unreliable {
        sim.submit_unreliable(&format!("unreliable message {}", i + 1));
    }

    let fired = sim.run_until_idle();
    tracing::debug!("Simulation fired {fired} completions");

    print_report(&sim.report());
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!("Simulation complete (seed {})", report.seed);
    println!("  Virtual time elapsed: {:?}", report.elapsed);
    println!();
    println!(
        "{:<12} {:>6} {:>10} {:>6} {:>12} {:>8}",
        "Channel", "Sent", "Delivered", "Lost", "Latency(ms)", "Rate(%)"
    );
    print_stats_row(ChannelKind::Reliable, &report.reliable);
    print_stats_row(ChannelKind::Unreliable, &report.unreliable);
}

fn print_stats_row(channel: ChannelKind, stats: &ChannelStats) {
    println!(
        "{:<12} {:>6} {:>10} {:>6} {:>12.1} {:>8}",
        channel.as_str(),
        stats.messages_sent,
        stats.messages_delivered,
        stats.messages_lost,
        stats.average_latency_ms,
        stats.delivery_rate
    );
}
