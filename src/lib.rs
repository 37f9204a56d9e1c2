//! Blokus-style tile placement rules engine.
//!
//! Answers three questions for a driver or search process: which actions a
//! player may take, what position an action leads to, and whether the game
//! is over. Positions are immutable values; every transition returns a new
//! one and leaves its parent intact.
//!
//! # Board layers
//!
//! ```text
//! occupancy            N × N grid, 0 = empty, else owning player id
//! diagonals[p]         empty cells touching p's territory only at a corner
//!                      (the starting corner before p's first move)
//! edges[p]             empty cells sharing a flat edge with p's territory
//!
//! legal(p, piece @ anchor) <=>
//!     all block cells on board and empty
//!     and no block cell in edges[p]
//!     and some block cell in diagonals[p]
//! ```
//!
//! # Piece frames
//!
//! ```text
//! block      h × w cells of the shape
//! corners    h × w, block cells that can touch a diagonal
//! neighbors  (h+2) × (w+2), block at offset (1, 1); cells edge-adjacent to it
//! diagonals  (h+2) × (w+2), block at offset (1, 1); cells corner-adjacent only
//! ```
//!
//! # Action encoding
//!
//! ```text
//! (piece id, anchor row, anchor col, rotation 0-3 counter-clockwise, flip)
//! the oriented block's top-left cell lands on (anchor row, anchor col)
//! ```

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod mask;
pub mod movegen;
pub mod piece;
pub mod player;
pub mod rules;
pub mod state;
pub mod transition;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::{Action, PieceId};
pub use catalog::PieceCatalog;
pub use config::GameConfig;
pub use error::{BlokusError, Result};
pub use game::Blokus;
pub use mask::Mask;
pub use movegen::{has_legal_action, legal_actions};
pub use piece::{Orientation, OrientedPiece, Piece, PieceRecord};
pub use player::Player;
pub use rules::{check_action, is_legal, IllegalMove};
pub use state::BoardState;
pub use transition::{final_rewards, is_terminal, step, GameOutcome, StepResult};
