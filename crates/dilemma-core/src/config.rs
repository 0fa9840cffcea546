//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::population::strategy_counts;
use crate::strategy::Strategy;

/// Share of the population assigned to each strategy
///
/// Ratios need not sum to 1.0; any shortfall after flooring goes to
/// [`Strategy::Random`]. A ratio left out of a JSON document is zero; the
/// legacy default set only applies when `ratios` is omitted entirely.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyRatios {
    #[serde(default)]
    pub cooperation: f64,
    #[serde(default)]
    pub betrayal: f64,
    #[serde(default)]
    pub hit_back: f64,
    #[serde(default)]
    pub watcher: f64,
    #[serde(default)]
    pub random: f64,
}

impl StrategyRatios {
    pub fn new(cooperation: f64, betrayal: f64, hit_back: f64, watcher: f64, random: f64) -> Self {
        Self { cooperation, betrayal, hit_back, watcher, random }
    }

    /// Whole population on a single strategy
    pub fn only(strategy: Strategy) -> Self {
        let mut ratios = [0.0; 5];
        ratios[strategy.index()] = 1.0;
        Self::from_array(ratios)
    }

    pub fn get(&self, strategy: Strategy) -> f64 {
        self.to_array()[strategy.index()]
    }

    /// Ratios in [`Strategy::ALL`] order
    pub fn to_array(&self) -> [f64; 5] {
        [self.cooperation, self.betrayal, self.hit_back, self.watcher, self.random]
    }

    fn from_array(r: [f64; 5]) -> Self {
        Self::new(r[0], r[1], r[2], r[3], r[4])
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for strategy in Strategy::ALL {
            let value = self.get(strategy);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRatio { strategy, value });
            }
        }
        Ok(())
    }
}

impl Default for StrategyRatios {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.25, 0.25, 0.50)
    }
}

/// Everything needed to run one simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of agents created before epoch 0
    pub population_size: usize,
    /// Starting energy of every agent
    pub initial_energy: i64,
    /// Epochs to run
    pub num_epochs: u64,
    pub ratios: StrategyRatios,
    /// Optional RNG seed; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            initial_energy: 100,
            num_epochs: 1000,
            ratios: StrategyRatios::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        strategy_counts(self.population_size, &self.ratios).map(|_| ())
    }
}
