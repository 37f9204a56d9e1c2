//! Placement legality.
//!
//! A placement is legal iff every block cell is on the board, on an empty
//! cell, off the player's edge-adjacency layer, and at least one block cell
//! lies on the player's diagonal-available layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::{Action, PieceId};
use crate::catalog::PieceCatalog;
use crate::error::{BlokusError, Result};
use crate::piece::OrientedPiece;
use crate::player::Player;
use crate::state::BoardState;

/// Why a placement was refused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum IllegalMove {
    /// A block cell falls off the board.
    OutOfBounds,
    /// A block cell lands on an occupied cell.
    Overlap,
    /// A block cell shares a flat edge with the player's own territory.
    EdgeContact,
    /// No block cell touches the player's territory at a corner.
    NoCornerContact,
    /// The piece was already placed by this player.
    PieceUnavailable,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalMove::OutOfBounds => "piece extends off the board",
            IllegalMove::Overlap => "piece overlaps an occupied cell",
            IllegalMove::EdgeContact => "piece shares an edge with own territory",
            IllegalMove::NoCornerContact => "piece does not touch own territory at a corner",
            IllegalMove::PieceUnavailable => "piece already placed",
        };
        f.write_str(text)
    }
}

/// An action resolved against the catalog and known to be legal.
pub(crate) struct Placement<'a> {
    pub(crate) index: usize,
    pub(crate) piece: PieceId,
    pub(crate) oriented: &'a OrientedPiece,
    pub(crate) row: usize,
    pub(crate) col: usize,
}

/// Resolve and validate an action, describing the failure if it is not legal.
pub(crate) fn resolve<'a>(
    state: &BoardState,
    catalog: &'a PieceCatalog,
    player: Player,
    action: &Action,
) -> Result<Placement<'a>> {
    let index = state
        .player_index(player)
        .ok_or(BlokusError::UnknownPlayer(player))?;
    let piece = catalog
        .get(action.piece)
        .ok_or(BlokusError::UnknownPiece(action.piece))?;
    let orientation = action
        .orientation()
        .ok_or(BlokusError::InvalidRotation(action.rotation))?;
    let oriented = piece.oriented(orientation);

    let illegal = |reason| BlokusError::IllegalAction {
        player,
        action: *action,
        reason,
        board: state.to_string(),
    };

    if !state.layers(index).remaining.contains(&action.piece) {
        return Err(illegal(IllegalMove::PieceUnavailable));
    }
    check_placement(state, index, oriented, action.row, action.col).map_err(illegal)?;

    Ok(Placement {
        index,
        piece: action.piece,
        oriented,
        row: action.row as usize,
        col: action.col as usize,
    })
}

/// Validate an action for `player`.
pub fn check_action(
    state: &BoardState,
    catalog: &PieceCatalog,
    player: Player,
    action: &Action,
) -> Result<()> {
    resolve(state, catalog, player, action).map(|_| ())
}

/// True iff `action` is legal for `player` in `state`.
pub fn is_legal(
    state: &BoardState,
    catalog: &PieceCatalog,
    player: Player,
    action: &Action,
) -> bool {
    check_action(state, catalog, player, action).is_ok()
}

/// Geometric checks for an oriented block anchored at (row, col).
pub(crate) fn check_placement(
    state: &BoardState,
    index: usize,
    oriented: &OrientedPiece,
    row: i32,
    col: i32,
) -> std::result::Result<(), IllegalMove> {
    let size = state.size() as i64;
    let cells = oriented.block_cells();

    // Widened so anchors near the i32 limits cannot overflow.
    let off_board = cells.iter().any(|&(dr, dc)| {
        let r = i64::from(row) + dr as i64;
        let c = i64::from(col) + dc as i64;
        r < 0 || c < 0 || r >= size || c >= size
    });
    if off_board {
        return Err(IllegalMove::OutOfBounds);
    }

    let (row, col) = (row as usize, col as usize);
    let layers = state.layers(index);

    if cells.iter().any(|&(dr, dc)| state.cell(row + dr, col + dc) != 0) {
        return Err(IllegalMove::Overlap);
    }
    if cells.iter().any(|&(dr, dc)| layers.edges.get(row + dr, col + dc)) {
        return Err(IllegalMove::EdgeContact);
    }
    if cells.iter().any(|&(dr, dc)| layers.diagonals.get(row + dr, col + dc)) {
        Ok(())
    } else {
        Err(IllegalMove::NoCornerContact)
    }
}
