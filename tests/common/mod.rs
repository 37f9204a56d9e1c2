//! Shared helpers for integration tests.
#![allow(dead_code)]

use blokus_core::{BoardState, Mask, Player};

const EDGE: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const CORNER: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn owned_by(state: &BoardState, player: Player, row: i32, col: i32) -> bool {
    let n = state.size() as i32;
    let on_board = row >= 0 && col >= 0 && row < n && col < n;
    on_board && state.owner(row as usize, col as usize) == Some(player)
}

/// Recompute a player's (diagonal, edge) layers from occupancy alone.
pub fn recompute_layers(state: &BoardState, player: Player) -> (Mask, Mask) {
    let n = state.size();
    let mut diagonals = Mask::new(n, n);
    let mut edges = Mask::new(n, n);

    if state.is_first_move(player) {
        let (r, c) = state.start_corner(player).expect("configured player");
        if state.is_empty_cell(r, c) {
            diagonals.set(r, c, true);
        }
        return (diagonals, edges);
    }

    for r in 0..n {
        for c in 0..n {
            if !state.is_empty_cell(r, c) {
                continue;
            }
            let (ri, ci) = (r as i32, c as i32);
            if EDGE.iter().any(|&(dr, dc)| owned_by(state, player, ri + dr, ci + dc)) {
                edges.set(r, c, true);
            } else if CORNER.iter().any(|&(dr, dc)| owned_by(state, player, ri + dr, ci + dc)) {
                diagonals.set(r, c, true);
            }
        }
    }
    (diagonals, edges)
}

/// Incrementally maintained layers must equal a full recompute, and every
/// mark must sit on an empty cell with diagonal and edge layers disjoint.
pub fn assert_layers_consistent(state: &BoardState) {
    for &p in state.players() {
        let diagonals = state.diagonal_layer(p).expect("configured player");
        let edges = state.edge_layer(p).expect("configured player");

        for (r, c) in diagonals.iter_set() {
            assert!(state.is_empty_cell(r, c), "{p} diagonal mark on occupied ({r}, {c})\n{state}");
            assert!(!edges.get(r, c), "{p} diagonal and edge overlap at ({r}, {c})\n{state}");
        }
        for (r, c) in edges.iter_set() {
            assert!(state.is_empty_cell(r, c), "{p} edge mark on occupied ({r}, {c})\n{state}");
        }

        let (expected_diagonals, expected_edges) = recompute_layers(state, p);
        assert_eq!(diagonals, &expected_diagonals, "{p} diagonal layer drifted\n{state}");
        assert_eq!(edges, &expected_edges, "{p} edge layer drifted\n{state}");
    }
}
