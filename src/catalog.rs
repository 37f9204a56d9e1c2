//! Piece catalog.
//!
//! Loads raw records once, validates them, and precomputes every piece's
//! oriented variants and canonical orientation list. Malformed input fails
//! here, never mid-game.

use log::debug;
use std::collections::BTreeSet;

use crate::action::PieceId;
use crate::error::{BlokusError, Result};
use crate::piece::{Piece, PieceRecord};

/// The 21 classic Blokus polyominoes as (row, col) cells.
pub const STANDARD_SHAPES: [&[(usize, usize)]; 21] = [
    // 1
    &[(0, 0)],
    // 2
    &[(0, 0), (0, 1)],
    // 3: I, V
    &[(0, 0), (0, 1), (0, 2)],
    &[(0, 0), (1, 0), (1, 1)],
    // 4: I, O, T, L, S
    &[(0, 0), (0, 1), (0, 2), (0, 3)],
    &[(0, 0), (0, 1), (1, 0), (1, 1)],
    &[(0, 0), (0, 1), (0, 2), (1, 1)],
    &[(0, 0), (1, 0), (2, 0), (2, 1)],
    &[(0, 1), (0, 2), (1, 0), (1, 1)],
    // 5: I, L, Y, N, P, U, V, T, W, Z, F, X
    &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
    &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)],
    &[(0, 1), (1, 0), (1, 1), (2, 1), (3, 1)],
    &[(0, 1), (1, 1), (2, 0), (2, 1), (3, 0)],
    &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)],
    &[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)],
    &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)],
    &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1)],
    &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)],
    &[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)],
    &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)],
];

/// Immutable set of pieces, indexed by `PieceId`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PieceCatalog {
    pieces: Vec<Piece>,
}

impl PieceCatalog {
    /// Build a catalog from records. Piece ids are record positions.
    pub fn load(records: &[PieceRecord]) -> Result<PieceCatalog> {
        if records.is_empty() {
            return Err(BlokusError::EmptyCatalog);
        }
        let pieces = records
            .iter()
            .enumerate()
            .map(|(idx, rec)| Piece::from_record(PieceId(idx), rec))
            .collect::<Result<Vec<_>>>()?;
        let catalog = PieceCatalog { pieces };
        debug!(
            "loaded piece catalog: {} pieces, {} canonical orientations",
            catalog.len(),
            catalog.total_orientations()
        );
        Ok(catalog)
    }

    /// Build a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> Result<PieceCatalog> {
        let records: Vec<PieceRecord> = serde_json::from_str(json)?;
        Self::load(&records)
    }

    /// Records for the classic 21-piece set.
    pub fn standard_records() -> Vec<PieceRecord> {
        STANDARD_SHAPES
            .iter()
            .map(|cells| PieceRecord::from_cells(cells))
            .collect()
    }

    /// The classic 21-piece set.
    ///
    /// # Panics
    ///
    /// Never in practice: the shapes are the fixed `STANDARD_SHAPES` table and
    /// `from_cells` always yields records that pass validation for non-empty
    /// cell lists.
    pub fn standard() -> PieceCatalog {
        match Self::load(&Self::standard_records()) {
            Ok(catalog) => catalog,
            // STANDARD_SHAPES is constant and every entry is a non-empty polyomino.
            Err(e) => unreachable!("standard piece set is malformed: {e}"),
        }
    }

    /// Catalog restricted to the given standard shapes, re-indexed from 0.
    pub fn standard_subset(indices: &[usize]) -> Result<PieceCatalog> {
        let records: Vec<PieceRecord> = indices
            .iter()
            .map(|&i| {
                STANDARD_SHAPES
                    .get(i)
                    .map(|cells| PieceRecord::from_cells(cells))
                    .ok_or(BlokusError::UnknownPiece(PieceId(i)))
            })
            .collect::<Result<_>>()?;
        Self::load(&records)
    }

    #[inline]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Every piece id; the starting hand of each player.
    pub fn ids(&self) -> BTreeSet<PieceId> {
        (0..self.pieces.len()).map(PieceId).collect()
    }

    /// Sum of canonical orientations over all pieces.
    pub fn total_orientations(&self) -> usize {
        self.pieces.iter().map(|p| p.orientations().len()).sum()
    }

    /// Total cells covered by the whole set.
    pub fn total_cells(&self) -> usize {
        self.pieces.iter().map(|p| p.cell_count()).sum()
    }
}
