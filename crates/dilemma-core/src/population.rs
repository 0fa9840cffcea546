//! Agents and the population they live in

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::StrategyRatios;
use crate::error::ConfigError;
use crate::history::{MoveWindow, OpponentHistory};
use crate::strategy::{decide_move, Move, Strategy};

/// Stable agent identifier, equal to the agent's position in the population
pub type AgentId = u32;

/// One participant of the simulation
///
/// Agents are never removed. An agent with non-positive energy is
/// eliminated and simply stops being paired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    strategy: Strategy,
    energy: i64,
    last_move: Move,
    history: OpponentHistory,
}

impl Agent {
    pub fn new(id: AgentId, strategy: Strategy, energy: i64) -> Self {
        Self {
            id,
            strategy,
            energy,
            last_move: Move::Cooperate,
            history: OpponentHistory::new(),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn energy(&self) -> i64 {
        self.energy
    }

    /// Move this agent played in its most recent match
    pub fn last_move(&self) -> Move {
        self.last_move
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }

    pub fn history(&self) -> &OpponentHistory {
        &self.history
    }

    /// Moves `opponent` has played against this agent
    pub fn history_against(&self, opponent: AgentId) -> MoveWindow {
        self.history.against(opponent)
    }

    pub fn record_opponent_move(&mut self, opponent: AgentId, mv: Move) {
        self.history.record(opponent, mv);
    }

    /// Pick this agent's move against `opponent`
    pub fn decide<R: Rng + ?Sized>(&self, opponent: AgentId, rng: &mut R) -> Move {
        decide_move(self.strategy, &self.history.against(opponent), rng)
    }

    /// Energy is unbounded in the model; the `i64` range is the only limit
    /// and saturates rather than wrapping.
    pub(crate) fn add_energy(&mut self, delta: i64) {
        self.energy = self.energy.saturating_add(delta);
    }

    pub(crate) fn set_last_move(&mut self, mv: Move) {
        self.last_move = mv;
    }
}

/// Per-strategy agent counts for a population of `size`
///
/// Each count is `floor(size * ratio)`; whatever the floors leave over is
/// assigned to [`Strategy::Random`]. Counts are in [`Strategy::ALL`] order.
pub fn strategy_counts(size: usize, ratios: &StrategyRatios) -> Result<[usize; 5], ConfigError> {
    if size == 0 {
        return Err(ConfigError::EmptyPopulation);
    }
    if AgentId::try_from(size - 1).is_err() {
        return Err(ConfigError::PopulationTooLarge { size });
    }
    ratios.validate()?;

    // Huge ratios saturate the cast; the saturating sum still exceeds `size`
    let mut counts = ratios.to_array().map(|ratio| (size as f64 * ratio).floor() as usize);
    let allocated = counts.iter().fold(0usize, |acc, c| acc.saturating_add(*c));
    if allocated > size {
        return Err(ConfigError::RatioOverflow { allocated, population_size: size });
    }
    counts[Strategy::Random.index()] += size - allocated;
    Ok(counts)
}

/// The full set of agents, indexed by id
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PopulationRecord")]
pub struct Population {
    agents: Vec<Agent>,
}

/// Unchecked wire shape of [`Population`]
#[derive(Deserialize)]
struct PopulationRecord {
    agents: Vec<Agent>,
}

impl TryFrom<PopulationRecord> for Population {
    type Error = ConfigError;

    fn try_from(record: PopulationRecord) -> Result<Self, Self::Error> {
        Population::from_agents(record.agents)
    }
}

impl Population {
    /// Build `size` agents from strategy ratios
    ///
    /// Agents are laid out in strategy order (cooperation, betrayal,
    /// hit-back, watcher, random) with ids counting up from 0.
    pub fn from_ratios(
        size: usize,
        initial_energy: i64,
        ratios: &StrategyRatios,
    ) -> Result<Self, ConfigError> {
        let counts = strategy_counts(size, ratios)?;

        let mut agents = Vec::with_capacity(size);
        for (strategy, count) in Strategy::ALL.into_iter().zip(counts) {
            for _ in 0..count {
                let id = AgentId::try_from(agents.len())
                    .map_err(|_| ConfigError::PopulationTooLarge { size })?;
                agents.push(Agent::new(id, strategy, initial_energy));
            }
        }

        Ok(Self { agents })
    }

    /// Wrap explicitly built agents; each id must equal its position
    pub fn from_agents(agents: Vec<Agent>) -> Result<Self, ConfigError> {
        for (position, agent) in agents.iter().enumerate() {
            if agent.id as usize != position {
                return Err(ConfigError::MisplacedAgent { position, id: agent.id });
            }
        }
        Ok(Self { agents })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Indices of agents with positive energy, ascending
    pub fn living_indices(&self) -> Vec<usize> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Number of agents per strategy, living or not, in [`Strategy::ALL`] order
    pub fn count_by_strategy(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for agent in &self.agents {
            counts[agent.strategy.index()] += 1;
        }
        counts
    }

    /// Mutable access to two distinct agents at once
    pub(crate) fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Agent, &mut Agent) {
        assert_ne!(a, b, "an agent cannot be paired with itself");
        if a < b {
            let (left, right) = self.agents.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.agents.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }
}
