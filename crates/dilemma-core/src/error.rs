//! Errors raised while validating simulation input

use thiserror::Error;

use crate::strategy::Strategy;

/// Invalid input rejected before any epoch runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population size must be positive")]
    EmptyPopulation,

    #[error("ratio for {strategy} must be a finite non-negative number, got {value}")]
    InvalidRatio { strategy: Strategy, value: f64 },

    #[error("strategy ratios allocate {allocated} agents for a population of {population_size}")]
    RatioOverflow {
        allocated: usize,
        population_size: usize,
    },

    #[error("population size {size} exceeds the largest agent id")]
    PopulationTooLarge { size: usize },

    #[error("history window holds at most {capacity} moves, got {len}")]
    HistoryOverflow { len: usize, capacity: usize },

    #[error("agent at position {position} carries id {id}; ids must match positions")]
    MisplacedAgent { position: usize, id: u32 },

    #[error("move must be 0 (cooperate) or 1 (betray), got {0}")]
    InvalidMove(u8),

    #[error("invalid configuration document: {0}")]
    Parse(String),
}
