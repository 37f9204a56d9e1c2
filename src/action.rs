//! Action encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::piece::Orientation;

/// Catalog index of a piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub usize);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placement: which piece, where its oriented top-left bounding cell goes,
/// and how it is rotated/flipped.
///
/// The anchor is signed so that off-board requests can be reported as
/// illegal instead of wrapping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Action {
    pub piece: PieceId,
    pub row: i32,
    pub col: i32,
    /// Counter-clockwise quarter turns, 0..=3.
    pub rotation: u8,
    /// Mirror left-right after rotating.
    pub flip: bool,
}

impl Action {
    pub const fn new(piece: PieceId, row: i32, col: i32, rotation: u8, flip: bool) -> Action {
        Action {
            piece,
            row,
            col,
            rotation,
            flip,
        }
    }

    /// Orientation requested by this action, if the rotation is in range.
    #[inline]
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::new(self.rotation, self.flip)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "piece {} at ({}, {}) rot {}{}",
            self.piece,
            self.row,
            self.col,
            self.rotation,
            if self.flip { " flipped" } else { "" }
        )
    }
}
