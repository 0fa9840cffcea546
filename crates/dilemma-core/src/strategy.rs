//! Strategy definitions and execution

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::history::MoveWindow;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[default]
    Cooperate,
    Betray,
}

impl Move {
    /// Numeric encoding: 0 = cooperate, 1 = betray
    pub fn as_bit(self) -> u8 {
        match self {
            Move::Cooperate => 0,
            Move::Betray => 1,
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = ConfigError;

    fn try_from(bit: u8) -> Result<Self, Self::Error> {
        match bit {
            0 => Ok(Move::Cooperate),
            1 => Ok(Move::Betray),
            other => Err(ConfigError::InvalidMove(other)),
        }
    }
}

/// Fixed decision rule an agent follows for its whole life
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strategy {
    /// Always cooperate, never betray.
    Cooperation,
    /// Always betray, never cooperate.
    Betrayal,
    /// Return the opponent's last move. Start with cooperate.
    HitBack,
    /// Betray only if the opponent betrayed more often than not in the window.
    Watcher,
    /// Coin flip each match.
    Random,
}

impl Strategy {
    /// All variants, in population construction order
    pub const ALL: [Strategy; 5] = [
        Strategy::Cooperation,
        Strategy::Betrayal,
        Strategy::HitBack,
        Strategy::Watcher,
        Strategy::Random,
    ];

    /// Position of this variant within [`Strategy::ALL`]
    pub fn index(self) -> usize {
        match self {
            Strategy::Cooperation => 0,
            Strategy::Betrayal => 1,
            Strategy::HitBack => 2,
            Strategy::Watcher => 3,
            Strategy::Random => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Cooperation => "cooperation",
            Strategy::Betrayal => "betrayal",
            Strategy::HitBack => "hitback",
            Strategy::Watcher => "watcher",
            Strategy::Random => "random",
        }
    }

    /// Parse a report name back into a strategy
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decide the next move against one opponent
///
/// # Arguments
/// * `strategy` - The deciding agent's strategy
/// * `opponent_history` - Moves the opponent played against this agent, oldest first
/// * `rng` - Shared random source, only drawn from by [`Strategy::Random`]
pub fn decide_move<R: Rng + ?Sized>(
    strategy: Strategy,
    opponent_history: &MoveWindow,
    rng: &mut R,
) -> Move {
    match strategy {
        Strategy::Cooperation => Move::Cooperate,
        Strategy::Betrayal => Move::Betray,
        Strategy::HitBack => execute_hit_back(opponent_history),
        Strategy::Watcher => execute_watcher(opponent_history),
        Strategy::Random => execute_random(rng),
    }
}

/// Hit-back: copy the opponent's most recent move, cooperate on first contact
fn execute_hit_back(opponent_history: &MoveWindow) -> Move {
    opponent_history.last().unwrap_or(Move::Cooperate)
}

/// Watcher: majority vote over the window, ties go to cooperate
fn execute_watcher(opponent_history: &MoveWindow) -> Move {
    let betrayals = opponent_history.count(Move::Betray);
    let cooperations = opponent_history.count(Move::Cooperate);

    if betrayals > cooperations {
        Move::Betray
    } else {
        Move::Cooperate
    }
}

fn execute_random<R: Rng + ?Sized>(rng: &mut R) -> Move {
    if rng.gen_range(0..=1u8) == 0 {
        Move::Cooperate
    } else {
        Move::Betray
    }
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Cooperation => "Never betrays. Always cooperates.",
        Strategy::Betrayal => "Never cooperates. Always betrays.",
        Strategy::HitBack => "Returns the opponent's last move. Starts by cooperating.",
        Strategy::Watcher => "Betrays if the opponent betrayed more than it cooperated in its last 5 moves.",
        Strategy::Random => "Randomly cooperates or betrays each match.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    fn window(bits: &[u8]) -> MoveWindow {
        let mut w = MoveWindow::new();
        for &b in bits {
            w.push(Move::try_from(b).unwrap());
        }
        w
    }

    #[test]
    fn test_always_cooperate() {
        let mut rng = seeded_rng(Some(7));
        for bits in [&[][..], &[1, 1, 1][..], &[0, 1][..]] {
            assert_eq!(decide_move(Strategy::Cooperation, &window(bits), &mut rng), Move::Cooperate);
        }
    }

    #[test]
    fn test_always_betray() {
        let mut rng = seeded_rng(Some(7));
        for bits in [&[][..], &[0, 0, 0][..], &[1, 0][..]] {
            assert_eq!(decide_move(Strategy::Betrayal, &window(bits), &mut rng), Move::Betray);
        }
    }

    #[test]
    fn test_hit_back_first_move() {
        let mut rng = seeded_rng(Some(7));
        assert_eq!(decide_move(Strategy::HitBack, &MoveWindow::new(), &mut rng), Move::Cooperate);
    }

    #[test]
    fn test_hit_back_copies_last() {
        let mut rng = seeded_rng(Some(7));
        assert_eq!(decide_move(Strategy::HitBack, &window(&[1]), &mut rng), Move::Betray);
        assert_eq!(decide_move(Strategy::HitBack, &window(&[1, 1, 0]), &mut rng), Move::Cooperate);
        assert_eq!(decide_move(Strategy::HitBack, &window(&[0, 0, 0, 0, 0, 1]), &mut rng), Move::Betray);
    }

    #[test]
    fn test_watcher_majority() {
        let mut rng = seeded_rng(Some(7));
        assert_eq!(decide_move(Strategy::Watcher, &window(&[1, 1, 1, 0, 0]), &mut rng), Move::Betray);
        assert_eq!(decide_move(Strategy::Watcher, &window(&[1, 1, 0, 0, 0]), &mut rng), Move::Cooperate);
        assert_eq!(decide_move(Strategy::Watcher, &MoveWindow::new(), &mut rng), Move::Cooperate);
    }

    #[test]
    fn test_watcher_tie_cooperates() {
        let mut rng = seeded_rng(Some(7));
        assert_eq!(decide_move(Strategy::Watcher, &window(&[1, 0]), &mut rng), Move::Cooperate);
        assert_eq!(decide_move(Strategy::Watcher, &window(&[0, 1, 1, 0]), &mut rng), Move::Cooperate);
    }

    #[test]
    fn test_watcher_only_sees_window() {
        // Three early betrayals fall out of the window behind five cooperations
        let mut rng = seeded_rng(Some(7));
        let w = window(&[1, 1, 1, 0, 0, 0, 0, 0]);
        assert_eq!(decide_move(Strategy::Watcher, &w, &mut rng), Move::Cooperate);
    }

    #[test]
    fn test_random_produces_both_moves() {
        let mut rng = seeded_rng(Some(42));
        let moves: Vec<Move> = (0..200)
            .map(|_| decide_move(Strategy::Random, &MoveWindow::new(), &mut rng))
            .collect();
        let betrayals = moves.iter().filter(|m| **m == Move::Betray).count();
        assert!(betrayals > 50 && betrayals < 150, "betrayals {} far from 100", betrayals);
    }

    #[test]
    fn test_random_is_deterministic_for_seed() {
        let mut rng1 = seeded_rng(Some(3));
        let mut rng2 = seeded_rng(Some(3));
        for _ in 0..50 {
            assert_eq!(
                decide_move(Strategy::Random, &MoveWindow::new(), &mut rng1),
                decide_move(Strategy::Random, &MoveWindow::new(), &mut rng2),
            );
        }
    }

    #[test]
    fn test_only_random_draws_from_rng() {
        let mut used = seeded_rng(Some(9));
        let mut untouched = seeded_rng(Some(9));
        for strategy in [Strategy::Cooperation, Strategy::Betrayal, Strategy::HitBack, Strategy::Watcher] {
            decide_move(strategy, &window(&[1, 0, 1]), &mut used);
        }
        assert_eq!(used.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_move_bits() {
        assert_eq!(Move::Cooperate.as_bit(), 0);
        assert_eq!(Move::Betray.as_bit(), 1);
        assert_eq!(Move::try_from(0).unwrap(), Move::Cooperate);
        assert_eq!(Move::try_from(1).unwrap(), Move::Betray);
        assert_eq!(Move::try_from(2), Err(ConfigError::InvalidMove(2)));
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for (i, s) in Strategy::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Strategy::from_name(s.name()), Some(*s));
        }
        assert_eq!(Strategy::from_name("HITBACK"), Some(Strategy::HitBack));
        assert_eq!(Strategy::from_name("pavlov"), None);
    }
}
