//! Error types.
//!
//! Catalog and configuration problems surface when the engine is built.
//! Everything else is a caller contract violation reported by the operation
//! that detected it. Nothing here is retryable: the engine is deterministic.

use thiserror::Error;

use crate::action::{Action, PieceId};
use crate::piece::OffsetKind;
use crate::player::Player;
use crate::rules::IllegalMove;

pub type Result<T> = std::result::Result<T, BlokusError>;

#[derive(Debug, Error)]
pub enum BlokusError {
    // ========== Catalog ==========
    #[error("piece catalog is empty")]
    EmptyCatalog,

    #[error("piece {piece}: block has no filled cells")]
    EmptyBlock { piece: usize },

    #[error("piece {piece}: block rows have inconsistent lengths")]
    RaggedBlock { piece: usize },

    #[error("piece {piece}: no corner cells")]
    NoCorners { piece: usize },

    #[error("piece {piece}: corner ({row}, {col}) is not a filled block cell")]
    CornerOffBlock { piece: usize, row: i32, col: i32 },

    #[error("piece {piece}: {kind} offset ({row}, {col}) lies outside the padded frame")]
    OffsetOutsideFrame {
        piece: usize,
        kind: OffsetKind,
        row: i32,
        col: i32,
    },

    #[error("piece {piece}: {kind} offset ({row}, {col}) overlaps the block")]
    OffsetOnBlock {
        piece: usize,
        kind: OffsetKind,
        row: i32,
        col: i32,
    },

    #[error("piece {piece}: offset ({row}, {col}) is listed as both neighbor and diagonal")]
    OffsetConflict { piece: usize, row: i32, col: i32 },

    // ========== Configuration ==========
    #[error("board size {size} is outside the supported range {min}..={max}")]
    InvalidBoardSize { size: usize, min: usize, max: usize },

    #[error("no players configured")]
    NoPlayers,

    #[error("{count} players configured but the board only has {max} starting corners")]
    TooManyPlayers { count: usize, max: usize },

    #[error("player id 0 is reserved for empty cells")]
    InvalidPlayerId,

    #[error("player {0} is configured more than once")]
    DuplicatePlayer(Player),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ========== Caller errors ==========
    #[error("player {0} is not part of this game")]
    UnknownPlayer(Player),

    #[error("piece {0} is not in the catalog")]
    UnknownPiece(PieceId),

    #[error("rotation {0} is outside 0..=3")]
    InvalidRotation(u8),

    #[error("illegal action for {player}: {action} ({reason})\n{board}")]
    IllegalAction {
        player: Player,
        action: Action,
        reason: IllegalMove,
        board: String,
    },
}

impl BlokusError {
    /// Reason code when this is an illegal-action error.
    pub fn illegal_reason(&self) -> Option<IllegalMove> {
        match self {
            BlokusError::IllegalAction { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
