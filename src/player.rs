//! Player identifiers and turn order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier as stored in the occupancy grid.
///
/// Id 0 is reserved for empty cells, so valid players are 1..=255.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player(pub u8);

impl Player {
    /// Player 1, the first to move in the classic configurations.
    pub const ONE: Player = Player(1);
    /// Player 2.
    pub const TWO: Player = Player(2);

    /// Raw id written into occupancy cells.
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Check that this id can own cells (non-zero).
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Player following `current` in the fixed cyclic order of `players`.
///
/// Returns None if `current` is not in the list.
pub fn next_in_turn_order(players: &[Player], current: Player) -> Option<Player> {
    let idx = players.iter().position(|&p| p == current)?;
    Some(players[(idx + 1) % players.len()])
}
