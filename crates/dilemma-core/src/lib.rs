//! Dilemma Core
//!
//! Population-scale iterated Prisoner's Dilemma. A fixed set of agents,
//! each following one of five strategies, pair off at random every epoch,
//! play a single round, and gain or lose energy by the payoff matrix.
//! This crate is compiled to:
//! - Native (for the arena runner)
//! - WASM (for running simulations in the browser)

mod config;
mod error;
mod game;
mod history;
mod pairing;
mod population;
mod random;
mod report;
mod simulation;
mod strategy;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{SimConfig, StrategyRatios};
pub use error::ConfigError;
pub use game::{play_match, MatchOutcome};
pub use history::{MoveWindow, OpponentHistory, HISTORY_WINDOW};
pub use pairing::{run_epoch, EpochSummary};
pub use population::{strategy_counts, Agent, AgentId, Population};
pub use random::{draw_other_index, seeded_rng, SimRng};
pub use report::{StatusReport, StrategyStatus};
pub use simulation::{run, RunSummary, Simulation};
pub use strategy::{decide_move, describe_strategy, Move, Strategy};

/// Every (move_a, move_b) pair with its energy deltas
pub const PAYOFF_MATRIX: [(Move, Move, i64, i64); 4] = [
    (Move::Cooperate, Move::Cooperate, 1, 1),
    (Move::Betray, Move::Betray, -1, -1),
    (Move::Cooperate, Move::Betray, -3, 3),
    (Move::Betray, Move::Cooperate, 3, -3),
];

/// Payoff matrix for the Prisoner's Dilemma
/// Returns the energy deltas (delta_a, delta_b)
pub fn payoff(a: Move, b: Move) -> (i64, i64) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (1, 1),
        (Move::Betray, Move::Betray) => (-1, -1),
        (Move::Cooperate, Move::Betray) => (-3, 3),
        (Move::Betray, Move::Cooperate) => (3, -3),
    }
}
