//! Piece shapes and orientations.
//!
//! # Coordinate frames
//!
//! ```text
//! block / corners:        (row, col) inside the block's bounding box
//! neighbors / diagonals:  (row, col) relative to the block's top-left,
//!                         allowed to reach one cell outside on every side
//! ```
//!
//! Materialized neighbor/diagonal masks are stored in a padded frame of
//! `(height + 2) × (width + 2)` where padded `(1, 1)` is block `(0, 0)`.
//! Rotating or flipping the padded masks together with the block keeps all
//! four in register.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::PieceId;
use crate::error::{BlokusError, Result};
use crate::mask::Mask;

/// One raw piece definition as handed to the catalog.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PieceRecord {
    /// Block cell matrix; non-zero means filled.
    pub block: Vec<Vec<u8>>,
    /// Cells used to align the piece against diagonal-available cells.
    pub corners: Vec<[i32; 2]>,
    /// Flat-edge-adjacent offsets.
    pub neighbors: Vec<[i32; 2]>,
    /// Diagonal-only offsets.
    pub diagonals: Vec<[i32; 2]>,
    /// Carried through untouched.
    #[serde(default)]
    pub meta: serde_json::Value,
}

impl PieceRecord {
    /// Derive a full record from the (row, col) cells of a polyomino.
    ///
    /// Cells are normalized to the bounding box. Neighbor offsets are the
    /// empty cells sharing an edge with the shape; diagonal offsets are the
    /// empty cells touching it only at a corner; corner cells are the
    /// block cells that touch at least one diagonal offset.
    pub fn from_cells(cells: &[(usize, usize)]) -> PieceRecord {
        let min_r = cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_c = cells.iter().map(|c| c.1).min().unwrap_or(0);
        let cells: Vec<(i32, i32)> = cells
            .iter()
            .map(|&(r, c)| ((r - min_r) as i32, (c - min_c) as i32))
            .collect();
        let height = cells.iter().map(|c| c.0).max().map_or(0, |m| m + 1);
        let width = cells.iter().map(|c| c.1).max().map_or(0, |m| m + 1);
        let filled = |r: i32, c: i32| cells.contains(&(r, c));

        let block: Vec<Vec<u8>> = (0..height)
            .map(|r| (0..width).map(|c| filled(r, c) as u8).collect())
            .collect();

        let mut neighbors = Vec::new();
        let mut diagonals = Vec::new();
        for r in -1..=height {
            for c in -1..=width {
                if filled(r, c) {
                    continue;
                }
                let edge = [(-1, 0), (1, 0), (0, -1), (0, 1)]
                    .iter()
                    .any(|&(dr, dc)| filled(r + dr, c + dc));
                let corner = [(-1, -1), (-1, 1), (1, -1), (1, 1)]
                    .iter()
                    .any(|&(dr, dc)| filled(r + dr, c + dc));
                if edge {
                    neighbors.push([r, c]);
                } else if corner {
                    diagonals.push([r, c]);
                }
            }
        }

        let mut corners: Vec<[i32; 2]> = cells
            .iter()
            .filter(|&&(r, c)| {
                [(-1, -1), (-1, 1), (1, -1), (1, 1)]
                    .iter()
                    .any(|&(dr, dc)| diagonals.contains(&[r + dr, c + dc]))
            })
            .map(|&(r, c)| [r, c])
            .collect();
        corners.sort_unstable();

        PieceRecord {
            block,
            corners,
            neighbors,
            diagonals,
            meta: serde_json::Value::Null,
        }
    }
}

/// Which offset list a record entry came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OffsetKind {
    Neighbor,
    Diagonal,
}

impl fmt::Display for OffsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetKind::Neighbor => f.write_str("neighbor"),
            OffsetKind::Diagonal => f.write_str("diagonal"),
        }
    }
}

/// A (rotation, flip) pair. Rotation is counter-clockwise quarter turns,
/// applied before the left-right mirror.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: u8,
    pub flip: bool,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        rotation: 0,
        flip: false,
    };

    /// Returns None if `rotation` is not in 0..=3.
    #[inline]
    pub fn new(rotation: u8, flip: bool) -> Option<Orientation> {
        (rotation < 4).then_some(Orientation { rotation, flip })
    }

    /// All 8 pairs: for each rotation, unflipped then flipped.
    pub fn all() -> impl Iterator<Item = Orientation> {
        (0..4u8).flat_map(|rotation| {
            [false, true]
                .into_iter()
                .map(move |flip| Orientation { rotation, flip })
        })
    }

    #[inline]
    fn index(self) -> usize {
        self.rotation as usize * 2 + self.flip as usize
    }

    /// Apply this orientation to a mask.
    pub fn apply(self, mask: &Mask) -> Mask {
        let rotated = mask.rotated(self.rotation);
        if self.flip {
            rotated.flipped()
        } else {
            rotated
        }
    }
}

/// A piece with one orientation applied to all four masks.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OrientedPiece {
    pub orientation: Orientation,
    pub block: Mask,
    pub corners: Mask,
    /// Padded frame.
    pub neighbors: Mask,
    /// Padded frame.
    pub diagonals: Mask,
    block_cells: Vec<(usize, usize)>,
    corner_cells: Vec<(usize, usize)>,
}

impl OrientedPiece {
    fn new(
        orientation: Orientation,
        block: Mask,
        corners: Mask,
        neighbors: Mask,
        diagonals: Mask,
    ) -> Self {
        let block_cells = block.iter_set().collect();
        let corner_cells = corners.iter_set().collect();
        OrientedPiece {
            orientation,
            block,
            corners,
            neighbors,
            diagonals,
            block_cells,
            corner_cells,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.block.rows()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.block.cols()
    }

    /// Filled cells relative to the anchor.
    #[inline]
    pub fn block_cells(&self) -> &[(usize, usize)] {
        &self.block_cells
    }

    /// Corner cells relative to the anchor.
    #[inline]
    pub fn corner_cells(&self) -> &[(usize, usize)] {
        &self.corner_cells
    }
}

/// A catalog piece: canonical masks, every oriented variant, and the
/// deduplicated list of orientations that give distinct shapes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    id: PieceId,
    block: Mask,
    corners: Mask,
    neighbors: Mask,
    diagonals: Mask,
    /// Indexed by `Orientation::index`.
    variants: Vec<OrientedPiece>,
    orientations: Vec<Orientation>,
}

impl Piece {
    /// Validate a record and derive masks plus canonical orientations.
    pub fn from_record(id: PieceId, record: &PieceRecord) -> Result<Piece> {
        let piece = id.0;

        if record.block.is_empty() || record.block.iter().any(|row| row.is_empty()) {
            return Err(BlokusError::EmptyBlock { piece });
        }
        let rows: Vec<Vec<bool>> = record
            .block
            .iter()
            .map(|row| row.iter().map(|&v| v != 0).collect())
            .collect();
        let block = Mask::from_rows(&rows).ok_or(BlokusError::RaggedBlock { piece })?;
        if block.is_blank() {
            return Err(BlokusError::EmptyBlock { piece });
        }

        if record.corners.is_empty() {
            return Err(BlokusError::NoCorners { piece });
        }
        let mut corners = Mask::new(block.rows(), block.cols());
        for &[row, col] in &record.corners {
            if !block.get_signed(row, col) {
                return Err(BlokusError::CornerOffBlock { piece, row, col });
            }
            corners.set(row as usize, col as usize, true);
        }

        let neighbors = padded_mask(piece, &block, &record.neighbors, OffsetKind::Neighbor)?;
        let diagonals = padded_mask(piece, &block, &record.diagonals, OffsetKind::Diagonal)?;
        if let Some((r, c)) = neighbors.iter_set().find(|&(r, c)| diagonals.get(r, c)) {
            return Err(BlokusError::OffsetConflict {
                piece,
                row: r as i32 - 1,
                col: c as i32 - 1,
            });
        }

        let variants: Vec<OrientedPiece> = Orientation::all()
            .map(|o| {
                OrientedPiece::new(
                    o,
                    o.apply(&block),
                    o.apply(&corners),
                    o.apply(&neighbors),
                    o.apply(&diagonals),
                )
            })
            .collect();

        let mut seen: Vec<&Mask> = Vec::with_capacity(8);
        let mut orientations = Vec::with_capacity(8);
        for o in Orientation::all() {
            let shape = &variants[o.index()].block;
            if !seen.contains(&shape) {
                seen.push(shape);
                orientations.push(o);
            }
        }

        Ok(Piece {
            id,
            block,
            corners,
            neighbors,
            diagonals,
            variants,
            orientations,
        })
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn block(&self) -> &Mask {
        &self.block
    }

    pub fn corners(&self) -> &Mask {
        &self.corners
    }

    pub fn neighbors(&self) -> &Mask {
        &self.neighbors
    }

    pub fn diagonals(&self) -> &Mask {
        &self.diagonals
    }

    /// Number of cells the piece covers.
    pub fn cell_count(&self) -> usize {
        self.block.count()
    }

    /// Orientations producing geometrically distinct shapes, in discovery order.
    #[inline]
    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }

    /// Materialize an orientation from the canonical masks.
    ///
    /// Build the orientation with `Orientation::new`, which rejects
    /// rotations outside 0..=3.
    pub fn orient(&self, orientation: Orientation) -> OrientedPiece {
        OrientedPiece::new(
            orientation,
            orientation.apply(&self.block),
            orientation.apply(&self.corners),
            orientation.apply(&self.neighbors),
            orientation.apply(&self.diagonals),
        )
    }

    /// Precomputed variant for an orientation.
    #[inline]
    pub fn oriented(&self, orientation: Orientation) -> &OrientedPiece {
        &self.variants[orientation.index()]
    }
}

fn padded_mask(piece: usize, block: &Mask, offsets: &[[i32; 2]], kind: OffsetKind) -> Result<Mask> {
    let height = block.rows() as i32;
    let width = block.cols() as i32;
    let mut mask = Mask::new(block.rows() + 2, block.cols() + 2);
    for &[row, col] in offsets {
        if row < -1 || row > height || col < -1 || col > width {
            return Err(BlokusError::OffsetOutsideFrame { piece, kind, row, col });
        }
        if block.get_signed(row, col) {
            return Err(BlokusError::OffsetOnBlock { piece, kind, row, col });
        }
        mask.set((row + 1) as usize, (col + 1) as usize, true);
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(cells: &[(usize, usize)]) -> Piece {
        Piece::from_record(PieceId(0), &PieceRecord::from_cells(cells)).unwrap()
    }

    // ========== Records ==========

    #[test]
    fn test_from_cells_monomino() {
        let rec = PieceRecord::from_cells(&[(0, 0)]);
        assert_eq!(rec.block, vec![vec![1]]);
        assert_eq!(rec.corners, vec![[0, 0]]);
        assert_eq!(rec.neighbors, vec![[-1, 0], [0, -1], [0, 1], [1, 0]]);
        assert_eq!(rec.diagonals, vec![[-1, -1], [-1, 1], [1, -1], [1, 1]]);
    }

    #[test]
    fn test_from_cells_normalizes_offset_input() {
        let a = PieceRecord::from_cells(&[(3, 4), (3, 5)]);
        let b = PieceRecord::from_cells(&[(0, 0), (0, 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_cells_i3_corners_are_ends() {
        let rec = PieceRecord::from_cells(&[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(rec.corners, vec![[0, 0], [0, 2]]);
        assert_eq!(rec.diagonals.len(), 4);
        assert_eq!(rec.neighbors.len(), 8);
    }

    #[test]
    fn test_record_json_meta_defaults_to_null() {
        let json = r#"{"block":[[1]],"corners":[[0,0]],"neighbors":[],"diagonals":[]}"#;
        let rec: PieceRecord = serde_json::from_str(json).unwrap();
        assert!(rec.meta.is_null());
    }

    // ========== Validation ==========

    #[test]
    fn test_reject_empty_block() {
        let mut rec = PieceRecord::from_cells(&[(0, 0)]);
        rec.block = vec![vec![0]];
        let err = Piece::from_record(PieceId(4), &rec).unwrap_err();
        assert!(matches!(err, BlokusError::EmptyBlock { piece: 4 }));
    }

    #[test]
    fn test_reject_ragged_block() {
        let mut rec = PieceRecord::from_cells(&[(0, 0), (1, 0)]);
        rec.block = vec![vec![1, 1], vec![1]];
        let err = Piece::from_record(PieceId(0), &rec).unwrap_err();
        assert!(matches!(err, BlokusError::RaggedBlock { .. }));
    }

    #[test]
    fn test_reject_missing_corners() {
        let mut rec = PieceRecord::from_cells(&[(0, 0)]);
        rec.corners.clear();
        let err = Piece::from_record(PieceId(0), &rec).unwrap_err();
        assert!(matches!(err, BlokusError::NoCorners { .. }));
    }

    #[test]
    fn test_reject_corner_on_empty_cell() {
        let mut rec = PieceRecord::from_cells(&[(0, 0), (1, 0), (1, 1)]);
        rec.corners.push([0, 1]);
        let err = Piece::from_record(PieceId(0), &rec).unwrap_err();
        assert!(matches!(err, BlokusError::CornerOffBlock { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_reject_offset_outside_frame() {
        let mut rec = PieceRecord::from_cells(&[(0, 0)]);
        rec.diagonals.push([2, 2]);
        let err = Piece::from_record(PieceId(0), &rec).unwrap_err();
        assert!(matches!(
            err,
            BlokusError::OffsetOutsideFrame { kind: OffsetKind::Diagonal, .. }
        ));
    }

    #[test]
    fn test_reject_offset_on_block() {
        let mut rec = PieceRecord::from_cells(&[(0, 0)]);
        rec.neighbors.push([0, 0]);
        let err = Piece::from_record(PieceId(0), &rec).unwrap_err();
        assert!(matches!(
            err,
            BlokusError::OffsetOnBlock { kind: OffsetKind::Neighbor, .. }
        ));
    }

    #[test]
    fn test_reject_offset_in_both_lists() {
        let mut rec = PieceRecord::from_cells(&[(0, 0)]);
        rec.neighbors.push([1, 1]);
        let err = Piece::from_record(PieceId(0), &rec).unwrap_err();
        assert!(matches!(err, BlokusError::OffsetConflict { row: 1, col: 1, .. }));
    }

    // ========== Orientations ==========

    #[test]
    fn test_orientation_new_range() {
        assert!(Orientation::new(3, true).is_some());
        assert!(Orientation::new(4, false).is_none());
        assert_eq!(Orientation::all().count(), 8);
    }

    #[test]
    fn test_symmetric_pieces_have_one_orientation() {
        assert_eq!(piece(&[(0, 0)]).orientations(), &[Orientation::IDENTITY]);
        assert_eq!(piece(&[(0, 0), (0, 1), (1, 0), (1, 1)]).orientations().len(), 1);
        assert_eq!(
            piece(&[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]).orientations().len(),
            1
        );
    }

    #[test]
    fn test_asymmetric_piece_has_eight_orientations() {
        // F pentomino
        let f = piece(&[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)]);
        assert_eq!(f.orientations().len(), 8);
    }

    #[test]
    fn test_line_has_two_orientations_in_discovery_order() {
        let line = piece(&[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(
            line.orientations(),
            &[
                Orientation { rotation: 0, flip: false },
                Orientation { rotation: 1, flip: false },
            ]
        );
    }

    #[test]
    fn test_canonical_orientations_are_distinct() {
        let l4 = piece(&[(0, 0), (1, 0), (2, 0), (2, 1)]);
        let shapes: Vec<&Mask> = l4.orientations().iter().map(|&o| &l4.oriented(o).block).collect();
        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_orient_matches_cached_variant() {
        let y = piece(&[(0, 1), (1, 0), (1, 1), (2, 1), (3, 1)]);
        for o in Orientation::all() {
            assert_eq!(&y.orient(o), y.oriented(o));
        }
    }

    #[test]
    fn test_orient_only_accepts_valid_rotations() {
        let y = piece(&[(0, 1), (1, 0), (1, 1), (2, 1), (3, 1)]);
        for rotation in 4..=u8::MAX {
            assert!(Orientation::new(rotation, false).map(|o| y.orient(o)).is_none());
        }
        let quarter = Orientation::new(1, true).map(|o| y.orient(o)).unwrap();
        assert_eq!(quarter.orientation, Orientation { rotation: 1, flip: true });
        assert_eq!((quarter.height(), quarter.width()), (2, 4));
    }

    #[test]
    fn test_orient_keeps_masks_in_register() {
        // Every oriented neighbor/diagonal cell must sit next to the oriented
        // block in the padded frame, and corners must stay on the block.
        let n = piece(&[(0, 1), (1, 1), (2, 0), (2, 1), (3, 0)]);
        for o in Orientation::all() {
            let v = n.oriented(o);
            assert_eq!(v.neighbors.rows(), v.height() + 2);
            assert_eq!(v.neighbors.cols(), v.width() + 2);
            for &(r, c) in v.corner_cells() {
                assert!(v.block.get(r, c));
            }
            let on_block = |r: usize, c: usize| r >= 1 && c >= 1 && v.block.get(r - 1, c - 1);
            for (r, c) in v.neighbors.iter_set() {
                assert!(!on_block(r, c));
                let touches = on_block(r.wrapping_sub(1), c)
                    || on_block(r + 1, c)
                    || on_block(r, c.wrapping_sub(1))
                    || on_block(r, c + 1);
                assert!(touches, "neighbor ({r}, {c}) detached for {o:?}");
            }
            for (r, c) in v.diagonals.iter_set() {
                assert!(!on_block(r, c));
                assert!(!v.neighbors.get(r, c));
            }
        }
    }
}
