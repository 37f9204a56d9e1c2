//! Dense 2D boolean masks.
//!
//! Used both for piece shapes (block, corner, neighbor and diagonal masks)
//! and for the per-player board layers. Cells are stored row-major.

/// A rectangular grid of booleans.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Mask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// Create an all-false mask.
    pub fn new(rows: usize, cols: usize) -> Mask {
        Mask {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Build a mask from nested rows.
    /// Returns None if the rows have different lengths.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Option<Mask> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Mask {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a cell. Out-of-range coordinates read as false.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Write a cell.
    ///
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.rows && col < self.cols, "mask index out of range");
        self.cells[row * self.cols + col] = value;
    }

    /// Read a cell addressed with signed coordinates.
    #[inline]
    pub fn get_signed(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && self.get(row as usize, col as usize)
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True if no cell is set.
    pub fn is_blank(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Iterate over the (row, col) of every set cell, row-major.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// Rotate 90° counter-clockwise.
    ///
    /// ```text
    ///   a b      b d
    ///   c d  ->  a c
    /// ```
    pub fn rot90(&self) -> Mask {
        let mut out = Mask::new(self.cols, self.rows);
        for r in 0..out.rows {
            for c in 0..out.cols {
                out.cells[r * out.cols + c] = self.get(c, self.cols - 1 - r);
            }
        }
        out
    }

    /// Rotate counter-clockwise by `quarter_turns` × 90°.
    pub fn rotated(&self, quarter_turns: u8) -> Mask {
        let mut out = self.clone();
        for _ in 0..(quarter_turns % 4) {
            out = out.rot90();
        }
        out
    }

    /// Mirror left-right.
    pub fn flipped(&self) -> Mask {
        let mut out = Mask::new(self.rows, self.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.cells[r * self.cols + c] = self.get(r, self.cols - 1 - c);
            }
        }
        out
    }
}
