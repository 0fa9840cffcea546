//! Single match execution

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::payoff;
use crate::population::{AgentId, Population};
use crate::strategy::Move;

/// Result of one match between an initiator and its drawn opponent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub agent_a: AgentId,
    pub agent_b: AgentId,
    pub move_a: Move,
    pub move_b: Move,
    pub delta_a: i64,
    pub delta_b: i64,
    /// Energy after the payoff was applied
    pub energy_a: i64,
    pub energy_b: i64,
}

/// Play one round between agents at positions `a` and `b`
///
/// Both moves are decided before anything is updated, `a` first. Then the
/// payoff is applied, each agent records the other's move, and each agent's
/// `last_move` is set.
pub fn play_match<R: Rng + ?Sized>(
    population: &mut Population,
    a: usize,
    b: usize,
    rng: &mut R,
) -> MatchOutcome {
    let (agent_a, agent_b) = population.pair_mut(a, b);
    let (id_a, id_b) = (agent_a.id(), agent_b.id());

    let move_a = agent_a.decide(id_b, rng);
    let move_b = agent_b.decide(id_a, rng);

    let (delta_a, delta_b) = payoff(move_a, move_b);
    agent_a.add_energy(delta_a);
    agent_b.add_energy(delta_b);

    agent_a.record_opponent_move(id_b, move_b);
    agent_b.record_opponent_move(id_a, move_a);

    agent_a.set_last_move(move_a);
    agent_b.set_last_move(move_b);

    let outcome = MatchOutcome {
        agent_a: id_a,
        agent_b: id_b,
        move_a,
        move_b,
        delta_a,
        delta_b,
        energy_a: agent_a.energy(),
        energy_b: agent_b.energy(),
    };
    trace!(
        a = id_a,
        b = id_b,
        move_a = move_a.as_bit(),
        move_b = move_b.as_bit(),
        energy_a = outcome.energy_a,
        energy_b = outcome.energy_b,
        "match played"
    );
    outcome
}
