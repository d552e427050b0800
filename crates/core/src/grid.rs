//! Grid module - bounded 2D board storage
//!
//! Every grid game stores its cells in a flat row-major vector for cache
//! locality. Coordinates are `(row, col)` with row 0 at the top; signed
//! lookups make neighbor probing off the edge a plain `None` instead of a
//! wrapping bug.

use serde::{Deserialize, Serialize};

/// Orthogonal neighbor offsets in fixed order: up, right, down, left.
pub const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// A fixed-size rectangle of small cell values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<T>,
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(height: usize, width: usize, fill: T) -> Self {
        Self {
            height,
            width,
            cells: vec![fill; height * width],
        }
    }

    /// Build from rows. Returns `None` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let cells = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Some(Self {
            height,
            width,
            cells,
        })
    }

    /// Calculate flat index from signed `(row, col)`
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<T> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set cell at `(row, col)`. Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, value: T) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Mutable access to a single in-bounds cell.
    pub fn get_mut(&mut self, row: i32, col: i32) -> Option<&mut T> {
        let i = self.index(row, col)?;
        Some(&mut self.cells[i])
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// One row as a slice; empty if out of bounds.
    pub fn row(&self, row: usize) -> &[T] {
        if row >= self.height {
            return &[];
        }
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / width, i % width, v))
    }

    /// Count cells matching a predicate.
    pub fn count(&self, mut pred: impl FnMut(T) -> bool) -> usize {
        self.cells.iter().filter(|&&v| pred(v)).count()
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        for cell in &mut self.cells {
            *cell = value;
        }
    }

    /// Let every non-empty cell fall to the bottom of its column, keeping
    /// relative order; the freed cells at the top become `empty`.
    ///
    /// Two-pointer pass per column, no allocation. Returns how many cells moved.
    pub fn settle_columns(&mut self, empty: T) -> usize {
        let mut moved = 0;
        for col in 0..self.width {
            let mut write = self.height;
            for read in (0..self.height).rev() {
                let v = self.cells[read * self.width + col];
                if v == empty {
                    continue;
                }
                write -= 1;
                if write != read {
                    self.cells[write * self.width + col] = v;
                    self.cells[read * self.width + col] = empty;
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Convert to nested rows (display, tests, JSON-friendly views).
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.height).map(|r| self.row(r).to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_calculation() {
        let grid = Grid::new(3, 4, 0u8);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 3), Some(3));
        assert_eq!(grid.index(1, 0), Some(4));
        assert_eq!(grid.index(2, 3), Some(11));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(0, 4), None);
        assert_eq!(grid.index(3, 0), None);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(7, 7, 0u8);
        assert!(grid.set(2, 5, 3));
        assert_eq!(grid.get(2, 5), Some(3));
        assert!(!grid.set(7, 0, 1));
        assert_eq!(grid.get(-1, 2), None);
        assert_eq!(grid.count(|v| v > 0), 1);
    }

    #[test]
    fn test_from_rows_roundtrip_and_ragged() {
        let rows = vec![vec![1u8, 2, 3], vec![0, 0, 1]];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.to_rows(), rows);

        assert!(Grid::from_rows(&[vec![1u8, 2], vec![3]]).is_none());
    }

    #[test]
    fn test_settle_columns_keeps_order() {
        let mut grid = Grid::from_rows(&[
            vec![1u8, 0],
            vec![0, 2],
            vec![3, 0],
            vec![0, 0],
        ])
        .unwrap();
        let moved = grid.settle_columns(0);
        assert_eq!(
            grid.to_rows(),
            vec![vec![0, 0], vec![0, 0], vec![1, 0], vec![3, 2]]
        );
        assert_eq!(moved, 3);
    }

    #[test]
    fn test_iter_reports_positions() {
        let grid = Grid::from_rows(&[vec![0u8, 1], vec![2, 0]]).unwrap();
        let lit: Vec<(usize, usize)> = grid
            .iter()
            .filter(|&(_, _, v)| v > 0)
            .map(|(r, c, _)| (r, c))
            .collect();
        assert_eq!(lit, vec![(0, 1), (1, 0)]);
    }
}
