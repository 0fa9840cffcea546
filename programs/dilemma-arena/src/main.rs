//! Dilemma Arena - command-line runner
//!
//! Builds a simulation config, runs every epoch, and prints the survivors
//! per strategy.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dilemma_core::{SimConfig, Simulation, StatusReport};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "dilemma-arena",
    version,
    about = "Run a population-scale iterated Prisoner's Dilemma"
)]
struct Cli {
    /// JSON config file; fields left out take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of agents.
    #[arg(long)]
    population: Option<usize>,

    /// Override every agent's starting energy.
    #[arg(long, allow_hyphen_values = true)]
    energy: Option<i64>,

    /// Override the number of epochs.
    #[arg(long)]
    epochs: Option<u64>,

    /// Seed the random stream for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    info!(
        population = config.population_size,
        epochs = config.num_epochs,
        seed = ?config.seed,
        "Starting arena"
    );
    let mut simulation = Simulation::new(config).context("invalid simulation config")?;
    simulation.run_to_end();

    let report = StatusReport::from_population(simulation.population());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SimConfig::from_json(&raw)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(population) = cli.population {
        config.population_size = population;
    }
    if let Some(energy) = cli.energy {
        config.initial_energy = energy;
    }
    if let Some(epochs) = cli.epochs {
        config.num_epochs = epochs;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate().context("invalid simulation config")?;
    Ok(config)
}
