//! Skywarden CLI — the main entry point.
//!
//! Commands:
//! - `traveler` — Ask the traveler support agent about a flight
//! - `ops`      — Ask the operations agent for a regional view
//! - `copilot`  — Coordinated traveler + ops answer for one passenger
//! - `alerts`   — Run the anomaly rules directly (no model)
//! - `doctor`   — Diagnose credentials and snapshot webhooks

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "skywarden",
    about = "Skywarden — tool-using airspace copilot",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the traveler support agent about a specific flight
    Traveler {
        /// The passenger's question
        question: String,
    },

    /// Ask the operations agent for a regional situation report
    Ops {
        /// The operations question
        question: String,
    },

    /// Coordinated passenger answer: traveler + ops + synthesis
    Copilot {
        /// Flight callsign, e.g. PIA293
        #[arg(short, long)]
        callsign: String,

        /// The passenger's question
        question: String,
    },

    /// Run the anomaly rules over a region's current snapshot
    Alerts {
        /// Region identifier
        #[arg(short, long, default_value = "region1")]
        region: String,
    },

    /// Diagnose credentials and snapshot webhooks
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Traveler { question } => commands::traveler::run(&question).await?,
        Commands::Ops { question } => commands::ops::run(&question).await?,
        Commands::Copilot { callsign, question } => {
            commands::copilot::run(&callsign, &question).await?
        }
        Commands::Alerts { region } => commands::alerts::run(&region).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
