//! State transitions, termination and rewards.
//!
//! # Layer update on placement
//!
//! ```text
//! 1. stamp the block into occupancy
//! 2. drop every player's diagonal/edge marks under the block
//! 3. first move: drop the mover's starting seed
//! 4. region = block bounding box grown by one cell, clipped to the board
//! 5. mover's edges in region:      clear occupied, add neighbor mask
//! 6. mover's diagonals in region:  clear occupied, clear edges,
//!                                  add diagonal mask except occupied/edges
//! 7. remove the piece from the mover's hand
//! ```
//!
//! Only the region around the new block can change, so nothing outside it
//! is revisited.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::action::Action;
use crate::catalog::PieceCatalog;
use crate::error::{BlokusError, Result};
use crate::movegen::has_legal_action_at;
use crate::player::Player;
use crate::rules::{resolve, Placement};
use crate::state::BoardState;

/// Outcome of a committed action.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub state: BoardState,
    /// Index-aligned with the player order; all zero until the game ends.
    pub rewards: Vec<i8>,
    pub done: bool,
    /// Next player in fixed cyclic order. They may have no move.
    pub next_player: Player,
    /// Reserved for drivers. The engine always leaves it empty.
    pub extension: Option<serde_json::Value>,
}

/// Apply a legal action, producing a new state.
///
/// The input state is untouched. Illegal actions are rejected with a
/// descriptive error and never partially applied.
pub fn step(
    state: &BoardState,
    catalog: &PieceCatalog,
    player: Player,
    action: &Action,
) -> Result<StepResult> {
    let placement = match resolve(state, catalog, player, action) {
        Ok(p) => p,
        Err(err) => {
            debug!("rejected action {action} for {player}: {err}");
            return Err(err);
        }
    };

    let next = place(state, player, &placement);
    let next_player = next
        .next_player(player)
        .ok_or(BlokusError::UnknownPlayer(player))?;

    let done = is_terminal(&next, catalog);
    let rewards = if done {
        final_rewards(&next.scores())
    } else {
        vec![0; next.players().len()]
    };

    trace!("{player} played {action}; next {next_player}, done={done}");

    Ok(StepResult {
        state: next,
        rewards,
        done,
        next_player,
        extension: None,
    })
}

/// True iff no configured player has a legal action.
pub fn is_terminal(state: &BoardState, catalog: &PieceCatalog) -> bool {
    (0..state.players().len()).all(|idx| !has_legal_action_at(state, catalog, idx))
}

/// Rewards from final cell counts, index-aligned with the player order.
///
/// Two players: the first player wins only with strictly more cells, so a
/// tie goes to the second player. Any other player count: a sole leader
/// gets +1, players tied for the lead get 0, everyone behind gets -1.
pub fn final_rewards(scores: &[usize]) -> Vec<i8> {
    if let [first, second] = scores {
        return if first > second { vec![1, -1] } else { vec![-1, 1] };
    }
    let best = scores.iter().copied().max().unwrap_or(0);
    let leaders = scores.iter().filter(|&&s| s == best).count();
    scores
        .iter()
        .map(|&s| match (s == best, leaders) {
            (false, _) => -1,
            (true, 1) => 1,
            (true, _) => 0,
        })
        .collect()
}

/// Scoring record for a finished game.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameOutcome {
    pub players: Vec<Player>,
    pub scores: Vec<usize>,
    pub rewards: Vec<i8>,
}

impl GameOutcome {
    pub fn of(state: &BoardState) -> GameOutcome {
        let scores = state.scores();
        GameOutcome {
            players: state.players().to_vec(),
            rewards: final_rewards(&scores),
            scores,
        }
    }

    /// Players with reward +1.
    pub fn winners(&self) -> Vec<Player> {
        self.players
            .iter()
            .zip(&self.rewards)
            .filter(|&(_, &r)| r == 1)
            .map(|(&p, _)| p)
            .collect()
    }
}

fn place(state: &BoardState, player: Player, placement: &Placement<'_>) -> BoardState {
    let Placement {
        index,
        piece,
        oriented,
        row,
        col,
    } = *placement;
    let mut next = state.clone();
    let size = next.size;
    let cells = oriented.block_cells();

    for &(dr, dc) in cells {
        next.occupancy[(row + dr) * size + col + dc] = player.id();
    }

    for layers in next.layers.iter_mut() {
        let touched = cells.iter().any(|&(dr, dc)| {
            layers.diagonals.get(row + dr, col + dc) || layers.edges.get(row + dr, col + dc)
        });
        if touched {
            let layers = Arc::make_mut(layers);
            for &(dr, dc) in cells {
                layers.diagonals.set(row + dr, col + dc, false);
                layers.edges.set(row + dr, col + dc, false);
            }
        }
    }

    // Padded masks put block (0, 0) at (1, 1), so board (r, c) maps to
    // padded (r + 1 - row, c + 1 - col).
    let top = row.saturating_sub(1);
    let left = col.saturating_sub(1);
    let bottom = (row + oriented.height() + 1).min(size);
    let right = (col + oriented.width() + 1).min(size);

    let occupancy = &next.occupancy;
    let mover = Arc::make_mut(&mut next.layers[index]);

    if mover.first_move {
        let (sr, sc) = mover.start;
        mover.diagonals.set(sr, sc, false);
        mover.first_move = false;
    }

    for r in top..bottom {
        for c in left..right {
            if occupancy[r * size + c] != 0 {
                mover.edges.set(r, c, false);
            } else if oriented.neighbors.get(r + 1 - row, c + 1 - col) {
                mover.edges.set(r, c, true);
            }
        }
    }

    for r in top..bottom {
        for c in left..right {
            if occupancy[r * size + c] != 0 || mover.edges.get(r, c) {
                mover.diagonals.set(r, c, false);
            } else if oriented.diagonals.get(r + 1 - row, c + 1 - col) {
                mover.diagonals.set(r, c, true);
            }
        }
    }

    mover.remaining.remove(&piece);
    next
}
