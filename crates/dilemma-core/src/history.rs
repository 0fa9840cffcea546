//! Bounded per-opponent move history
//!
//! Every agent keeps its own view of each opponent it has met: the last
//! [`HISTORY_WINDOW`] moves that opponent played against it, oldest first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::population::AgentId;
use crate::strategy::Move;

/// Number of opponent moves remembered per opponent
pub const HISTORY_WINDOW: usize = 5;

/// Fixed-capacity ring buffer of the most recent moves
///
/// Pushing into a full window overwrites the oldest move. Serialized as
/// the list of moves, oldest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Move>", into = "Vec<Move>")]
pub struct MoveWindow {
    slots: [Move; HISTORY_WINDOW],
    /// Slot holding the oldest move
    start: u8,
    len: u8,
}

impl MoveWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        let len = self.len as usize;
        if len < HISTORY_WINDOW {
            self.slots[(self.start as usize + len) % HISTORY_WINDOW] = mv;
            self.len += 1;
        } else {
            self.slots[self.start as usize] = mv;
            self.start = ((self.start as usize + 1) % HISTORY_WINDOW) as u8;
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently recorded move
    pub fn last(&self) -> Option<Move> {
        if self.is_empty() {
            return None;
        }
        let idx = (self.start as usize + self.len as usize - 1) % HISTORY_WINDOW;
        Some(self.slots[idx])
    }

    /// Moves in recorded order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        (0..self.len()).map(move |i| self.slots[(self.start as usize + i) % HISTORY_WINDOW])
    }

    pub fn count(&self, mv: Move) -> usize {
        self.iter().filter(|m| *m == mv).count()
    }

    pub fn to_vec(&self) -> Vec<Move> {
        self.iter().collect()
    }
}

impl TryFrom<Vec<Move>> for MoveWindow {
    type Error = ConfigError;

    fn try_from(moves: Vec<Move>) -> Result<Self, Self::Error> {
        if moves.len() > HISTORY_WINDOW {
            return Err(ConfigError::HistoryOverflow {
                len: moves.len(),
                capacity: HISTORY_WINDOW,
            });
        }
        let mut window = MoveWindow::new();
        for mv in moves {
            window.push(mv);
        }
        Ok(window)
    }
}

impl From<MoveWindow> for Vec<Move> {
    fn from(window: MoveWindow) -> Self {
        window.to_vec()
    }
}

/// One agent's memory of every opponent it has played
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentHistory {
    windows: BTreeMap<AgentId, MoveWindow>,
}

impl OpponentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the opponent's latest move, evicting the oldest beyond the window
    pub fn record(&mut self, opponent: AgentId, mv: Move) {
        self.windows.entry(opponent).or_default().push(mv);
    }

    /// Moves `opponent` has played against us; empty if we never met
    pub fn against(&self, opponent: AgentId) -> MoveWindow {
        self.windows.get(&opponent).copied().unwrap_or_default()
    }

    /// Number of distinct opponents met so far
    pub fn opponents_met(&self) -> usize {
        self.windows.len()
    }
}
