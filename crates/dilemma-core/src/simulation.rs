//! Epoch loop driving a whole run

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::pairing::{run_epoch, EpochSummary};
use crate::population::Population;
use crate::random::{seeded_rng, SimRng};

/// Totals over every epoch run so far
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub epochs_run: u64,
    pub idle_epochs: u64,
    pub matches_played: u64,
    pub eliminated: u64,
}

impl RunSummary {
    fn absorb(&mut self, epoch: &EpochSummary) {
        self.epochs_run += 1;
        if epoch.was_idle() {
            self.idle_epochs += 1;
        }
        self.matches_played += epoch.matches_played as u64;
        self.eliminated += epoch.eliminated as u64;
    }
}

/// A configured run: population, random stream and epoch counter
///
/// Strictly sequential. The generator is owned by the simulation so that
/// every draw happens in match order.
pub struct Simulation<R: Rng = SimRng> {
    config: SimConfig,
    population: Population,
    rng: R,
    summary: RunSummary,
}

impl Simulation<SimRng> {
    /// Validate `config` and build the population and the seeded generator
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = seeded_rng(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    /// Like [`Simulation::new`] but with an injected generator; `config.seed` is ignored
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let population =
            Population::from_ratios(config.population_size, config.initial_energy, &config.ratios)?;
        Ok(Self::from_parts(config, population, rng))
    }

    /// Run an explicitly built population for `config.num_epochs` epochs
    pub fn from_population(config: SimConfig, population: Population, rng: R) -> Self {
        Self::from_parts(config, population, rng)
    }

    fn from_parts(config: SimConfig, population: Population, rng: R) -> Self {
        Self {
            config,
            population,
            rng,
            summary: RunSummary::default(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Epochs completed so far
    pub fn epoch(&self) -> u64 {
        self.summary.epochs_run
    }

    pub fn is_finished(&self) -> bool {
        self.summary.epochs_run >= self.config.num_epochs
    }

    /// Run a single epoch, even past the configured count
    pub fn step(&mut self) -> EpochSummary {
        let epoch = run_epoch(&mut self.population, &mut self.rng);
        debug!(
            epoch = self.summary.epochs_run,
            alive = epoch.alive_at_start,
            matches = epoch.matches_played,
            skipped_initiators = epoch.skipped_initiators,
            skipped_opponents = epoch.skipped_opponents,
            eliminated = epoch.eliminated,
            "epoch complete"
        );
        self.summary.absorb(&epoch);
        epoch
    }

    /// Run the remaining configured epochs
    pub fn run_to_end(&mut self) -> &RunSummary {
        info!(
            agents = self.population.len(),
            alive = self.population.living_count(),
            epochs = self.config.num_epochs,
            "simulation starting"
        );
        while !self.is_finished() {
            self.step();
        }
        info!(
            epochs = self.summary.epochs_run,
            matches = self.summary.matches_played,
            alive = self.population.living_count(),
            "simulation finished"
        );
        &self.summary
    }

    pub fn into_population(self) -> Population {
        self.population
    }
}

/// Run a whole simulation and hand back the final population
pub fn run(config: SimConfig) -> Result<Population, ConfigError> {
    let mut simulation = Simulation::new(config)?;
    simulation.run_to_end();
    Ok(simulation.into_population())
}
