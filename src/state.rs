//! Immutable board positions.
//!
//! # Layers
//!
//! ```text
//! occupancy            size × size, 0 = empty, else owning player id
//! diagonals[player]    empty cells touching the player's territory only
//!                      at a corner (plus the starting seed before the
//!                      player's first move); placements must cover one
//! edges[player]        empty cells sharing a flat edge with the player's
//!                      territory; placements must avoid all of them
//! ```
//!
//! A `BoardState` is never mutated once built. Per-player layers sit behind
//! `Arc` so a derived state shares every player's data it did not touch
//! with its parent.

use log::debug;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::action::PieceId;
use crate::catalog::PieceCatalog;
use crate::config::validate_setup;
use crate::error::Result;
use crate::mask::Mask;
use crate::player::{next_in_turn_order, Player};

/// Everything the engine tracks for one player.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct PlayerLayers {
    pub(crate) diagonals: Mask,
    pub(crate) edges: Mask,
    pub(crate) remaining: BTreeSet<PieceId>,
    pub(crate) first_move: bool,
    pub(crate) start: (usize, usize),
}

/// Starting corner for the player at `index` in turn order.
///
/// Order is top-left, bottom-right, top-right, bottom-left so that two
/// players start diagonally opposite. `size` must be non-zero; `reset`
/// validates it first.
pub(crate) fn starting_corner(size: usize, index: usize) -> (usize, usize) {
    let last = size - 1;
    match index % 4 {
        0 => (0, 0),
        1 => (last, last),
        2 => (0, last),
        _ => (last, 0),
    }
}

/// One game position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardState {
    pub(crate) size: usize,
    pub(crate) players: Arc<[Player]>,
    pub(crate) occupancy: Vec<u8>,
    pub(crate) layers: Vec<Arc<PlayerLayers>>,
}

impl BoardState {
    /// Fresh position: empty board, each player's diagonal layer seeded at
    /// their starting corner, full hands, first move pending for everyone.
    pub fn reset(size: usize, players: &[Player], catalog: &PieceCatalog) -> Result<BoardState> {
        validate_setup(size, players)?;

        let hand = catalog.ids();
        let layers = (0..players.len())
            .map(|idx| {
                let start = starting_corner(size, idx);
                let mut diagonals = Mask::new(size, size);
                diagonals.set(start.0, start.1, true);
                Arc::new(PlayerLayers {
                    diagonals,
                    edges: Mask::new(size, size),
                    remaining: hand.clone(),
                    first_move: true,
                    start,
                })
            })
            .collect();

        debug!(
            "reset {size}x{size} board for players {:?}, corners {:?}",
            players,
            (0..players.len()).map(|i| starting_corner(size, i)).collect::<Vec<_>>()
        );

        Ok(BoardState {
            size,
            players: players.into(),
            occupancy: vec![0; size * size],
            layers,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Players in turn order.
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn player_index(&self, player: Player) -> Option<usize> {
        self.players.iter().position(|&p| p == player)
    }

    /// Player after `player` in turn order.
    pub fn next_player(&self, player: Player) -> Option<Player> {
        next_in_turn_order(&self.players, player)
    }

    /// Raw occupancy grid, row-major.
    #[inline]
    pub fn occupancy(&self) -> &[u8] {
        &self.occupancy
    }

    #[inline]
    pub(crate) fn cell(&self, row: usize, col: usize) -> u8 {
        self.occupancy[row * self.size + col]
    }

    /// Owner of a cell; None if empty or off the board.
    pub fn owner(&self, row: usize, col: usize) -> Option<Player> {
        if row >= self.size || col >= self.size {
            return None;
        }
        match self.cell(row, col) {
            0 => None,
            id => Some(Player(id)),
        }
    }

    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cell(row, col) == 0
    }

    #[inline]
    pub(crate) fn layers(&self, idx: usize) -> &PlayerLayers {
        &self.layers[idx]
    }

    fn layers_of(&self, player: Player) -> Option<&PlayerLayers> {
        self.player_index(player).map(|idx| self.layers(idx))
    }

    /// Diagonal-available layer of a player.
    pub fn diagonal_layer(&self, player: Player) -> Option<&Mask> {
        self.layers_of(player).map(|l| &l.diagonals)
    }

    /// Edge-adjacency layer of a player.
    pub fn edge_layer(&self, player: Player) -> Option<&Mask> {
        self.layers_of(player).map(|l| &l.edges)
    }

    pub fn is_diagonal(&self, player: Player, row: usize, col: usize) -> bool {
        self.diagonal_layer(player).is_some_and(|m| m.get(row, col))
    }

    pub fn is_edge(&self, player: Player, row: usize, col: usize) -> bool {
        self.edge_layer(player).is_some_and(|m| m.get(row, col))
    }

    /// Cells a player's next piece may anchor on.
    pub fn diagonal_cells(&self, player: Player) -> Vec<(usize, usize)> {
        self.diagonal_layer(player)
            .map(|m| m.iter_set().collect())
            .unwrap_or_default()
    }

    /// Unplaced piece ids of a player.
    pub fn remaining(&self, player: Player) -> Option<&BTreeSet<PieceId>> {
        self.layers_of(player).map(|l| &l.remaining)
    }

    pub fn is_first_move(&self, player: Player) -> bool {
        self.layers_of(player).is_some_and(|l| l.first_move)
    }

    pub fn start_corner(&self, player: Player) -> Option<(usize, usize)> {
        self.layers_of(player).map(|l| l.start)
    }

    /// Cells owned by a player.
    pub fn cell_count(&self, player: Player) -> usize {
        self.occupancy.iter().filter(|&&c| c == player.id()).count()
    }

    /// Cell counts, index-aligned with `players()`.
    pub fn scores(&self) -> Vec<usize> {
        self.players.iter().map(|&p| self.cell_count(p)).collect()
    }

    /// True if both states hold the very same layer allocation for `player`,
    /// i.e. the transition between them did not touch that player's data.
    pub fn shares_layers_with(&self, other: &BoardState, player: Player) -> bool {
        match (self.player_index(player), other.player_index(player)) {
            (Some(a), Some(b)) => Arc::ptr_eq(&self.layers[a], &other.layers[b]),
            _ => false,
        }
    }
}

impl fmt::Display for BoardState {
    /// Occupancy grid, one row per line: `.` for empty, player id otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.cell(row, col) {
                    0 => '.',
                    id => std::char::from_digit(id as u32, 36).unwrap_or('#'),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
