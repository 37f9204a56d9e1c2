//! Legal move generation.
//!
//! Only anchors that put one of the piece's corner cells on one of the
//! player's diagonal-available cells can be legal, so generation walks
//! remaining pieces × canonical orientations × diagonal cells × corner
//! cells and tests each candidate anchor.

use std::collections::HashSet;
use std::ops::ControlFlow;

use crate::action::Action;
use crate::catalog::PieceCatalog;
use crate::error::{BlokusError, Result};
use crate::player::Player;
use crate::rules::check_placement;
use crate::state::BoardState;

/// All legal actions for `player`, each reported once, in generation order.
///
/// An empty result means the player cannot move this turn; it does not by
/// itself end the game.
pub fn legal_actions(
    state: &BoardState,
    catalog: &PieceCatalog,
    player: Player,
) -> Result<Vec<Action>> {
    let index = state
        .player_index(player)
        .ok_or(BlokusError::UnknownPlayer(player))?;
    let mut seen = HashSet::new();
    let mut actions = Vec::new();
    let flow = visit_legal_actions(state, catalog, index, |action| {
        if seen.insert(action) {
            actions.push(action);
        }
        ControlFlow::Continue(())
    });
    debug_assert!(flow.is_continue());
    Ok(actions)
}

/// True if `player` has at least one legal action. Stops at the first one.
pub fn has_legal_action(
    state: &BoardState,
    catalog: &PieceCatalog,
    player: Player,
) -> Result<bool> {
    let index = state
        .player_index(player)
        .ok_or(BlokusError::UnknownPlayer(player))?;
    Ok(has_legal_action_at(state, catalog, index))
}

pub(crate) fn has_legal_action_at(
    state: &BoardState,
    catalog: &PieceCatalog,
    index: usize,
) -> bool {
    visit_legal_actions(state, catalog, index, |_| ControlFlow::Break(())).is_break()
}

/// Feed every legal candidate to `visit` until it breaks.
///
/// Candidates may repeat when several corner cells of the same oriented
/// piece line up with different diagonal cells at the same anchor.
fn visit_legal_actions<F>(
    state: &BoardState,
    catalog: &PieceCatalog,
    index: usize,
    mut visit: F,
) -> ControlFlow<()>
where
    F: FnMut(Action) -> ControlFlow<()>,
{
    let layers = state.layers(index);
    let diagonal_cells: Vec<(usize, usize)> = layers.diagonals.iter_set().collect();
    if diagonal_cells.is_empty() {
        return ControlFlow::Continue(());
    }
    let size = state.size() as i32;

    for &id in &layers.remaining {
        let Some(piece) = catalog.get(id) else {
            continue;
        };
        for &orientation in piece.orientations() {
            let oriented = piece.oriented(orientation);
            let height = oriented.height() as i32;
            let width = oriented.width() as i32;
            for &(dr, dc) in &diagonal_cells {
                for &(cr, cc) in oriented.corner_cells() {
                    let row = dr as i32 - cr as i32;
                    let col = dc as i32 - cc as i32;
                    if row < 0 || col < 0 || row + height > size || col + width > size {
                        continue;
                    }
                    if check_placement(state, index, oriented, row, col).is_ok() {
                        visit(Action::new(id, row, col, orientation.rotation, orientation.flip))?;
                    }
                }
            }
        }
    }
    ControlFlow::Continue(())
}
