//! Per-epoch random pairing of living agents
//!
//! Every agent alive at the start of the epoch initiates at most one match,
//! in ascending position order. Opponents are drawn uniformly from the same
//! start-of-epoch snapshot, so an agent may be drawn as a responder any
//! number of times (including zero). Energy changes land immediately, which
//! makes later pairings depend on earlier results; the order must not change.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::game::play_match;
use crate::population::Population;
use crate::random::draw_other_index;

/// What happened during one epoch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochSummary {
    /// Living agents when the epoch began
    pub alive_at_start: usize,
    pub matches_played: usize,
    /// Turns lost because the initiator was eliminated earlier in the epoch
    pub skipped_initiators: usize,
    /// Turns lost because the drawn opponent was eliminated earlier in the epoch
    pub skipped_opponents: usize,
    /// Agents whose energy dropped to zero or below during the epoch
    pub eliminated: usize,
}

impl EpochSummary {
    /// True when fewer than two agents were alive, so nothing was played
    pub fn was_idle(&self) -> bool {
        self.alive_at_start < 2
    }
}

/// Run one epoch over the population
pub fn run_epoch<R: Rng + ?Sized>(population: &mut Population, rng: &mut R) -> EpochSummary {
    let alive = population.living_indices();
    let mut summary = EpochSummary {
        alive_at_start: alive.len(),
        ..EpochSummary::default()
    };

    if alive.len() < 2 {
        debug!(alive = alive.len(), "not enough living agents, epoch skipped");
        return summary;
    }

    for (position, &i) in alive.iter().enumerate() {
        if !population.agents()[i].is_alive() {
            summary.skipped_initiators += 1;
            continue;
        }

        let j = alive[draw_other_index(rng, alive.len(), position)];
        if !population.agents()[j].is_alive() {
            // No rematch: the turn is forfeited
            trace!(initiator = i, opponent = j, "drawn opponent already eliminated");
            summary.skipped_opponents += 1;
            continue;
        }

        play_match(population, i, j, rng);
        summary.matches_played += 1;
    }

    summary.eliminated = summary.alive_at_start - population.living_count();
    summary
}
