//! Aggregated view of the surviving population

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::population::Population;
use crate::strategy::Strategy;

/// Living agents of one strategy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStatus {
    pub strategy: Strategy,
    pub alive: usize,
    /// Energies of the living agents, in population order
    pub energies: Vec<i64>,
}

/// Survivor counts and energies per strategy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub total_alive: usize,
    /// One entry per strategy, in [`Strategy::ALL`] order
    pub strategies: Vec<StrategyStatus>,
}

impl StatusReport {
    pub fn from_population(population: &Population) -> Self {
        let mut strategies: Vec<StrategyStatus> = Strategy::ALL
            .into_iter()
            .map(|strategy| StrategyStatus { strategy, alive: 0, energies: Vec::new() })
            .collect();

        for agent in population.agents().iter().filter(|a| a.is_alive()) {
            let entry = &mut strategies[agent.strategy().index()];
            entry.alive += 1;
            entry.energies.push(agent.energy());
        }

        let total_alive = strategies.iter().map(|s| s.alive).sum();
        Self { total_alive, strategies }
    }

    pub fn for_strategy(&self, strategy: Strategy) -> &StrategyStatus {
        &self.strategies[strategy.index()]
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-------------------------------")?;
        writeln!(f, "Current status:")?;
        writeln!(f, "  Total Alive = {}", self.total_alive)?;
        writeln!(f)?;
        for status in self.strategies.iter().filter(|s| s.alive > 0) {
            let label = format!("{:<11}", status.strategy.name().to_uppercase());
            writeln!(f, "  {} ({})", label, status.alive)?;
            write!(f, "    Energies: ")?;
            for energy in &status.energies {
                write!(f, "{} ", energy)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "-------------------------------")
    }
}
