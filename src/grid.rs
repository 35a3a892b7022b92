use crate::{LifeError, Result};

/// Finite field of cells addressed by a row-major linear index.
///
/// Besides the current generation it keeps a staging buffer of the same
/// length, so that a step can be computed without reading half-updated
/// state. The staging buffer takes no part in comparisons or `Debug` output.
#[derive(Clone)]
pub struct Grid {
    cells_curr: Vec<bool>,
    cells_next: Vec<bool>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Creates a grid of `rows * cols` dead cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let size = Self::checked_size(rows, cols)?;
        Ok(Self {
            cells_curr: vec![false; size],
            cells_next: vec![false; size],
            rows,
            cols,
        })
    }

    /// Creates a grid holding a copy of `cells` (row-major).
    pub fn from_cells(rows: usize, cols: usize, cells: &[bool]) -> Result<Self> {
        let size = Self::checked_size(rows, cols)?;
        if cells.len() != size {
            return Err(LifeError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            cells_curr: cells.to_vec(),
            cells_next: vec![false; size],
            rows,
            cols,
        })
    }

    fn checked_size(rows: usize, cols: usize) -> Result<usize> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }
        rows.checked_mul(cols)
            .ok_or(LifeError::InvalidDimension { rows, cols })
    }

    /// Discards every cell and replaces them with `rows * cols` dead ones.
    ///
    /// On error the grid is left untouched.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        *self = Self::new(rows, cols)?;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells in one row.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells_curr.len()
    }

    /// Always `false`: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells_curr.is_empty()
    }

    /// Current generation, row-major.
    pub fn cells(&self) -> &[bool] {
        &self.cells_curr
    }

    pub fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::CellOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// `(row, col)` of the cell at `index`.
    pub fn position_of(&self, index: usize) -> Result<(usize, usize)> {
        self.check_index(index)?;
        let row = index / self.cols;
        Ok((row, index - row * self.cols))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(LifeError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.cells_curr[index])
    }

    pub fn get_at(&self, row: usize, col: usize) -> Result<bool> {
        let index = self.index_of(row, col)?;
        Ok(self.cells_curr[index])
    }

    pub fn set(&mut self, index: usize, state: bool) -> Result<()> {
        self.check_index(index)?;
        self.cells_curr[index] = state;
        Ok(())
    }

    pub fn set_at(&mut self, row: usize, col: usize, state: bool) -> Result<()> {
        let index = self.index_of(row, col)?;
        self.cells_curr[index] = state;
        Ok(())
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let cell = &mut self.cells_curr[index];
        *cell = !*cell;
        Ok(*cell)
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells_curr.iter().filter(|&&alive| alive).count()
    }

    /// Current generation and the staging buffer for the next one.
    pub(crate) fn buffers_mut(&mut self) -> (&[bool], &mut [bool]) {
        (&self.cells_curr, &mut self.cells_next)
    }

    /// Makes the staged generation current.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.cells_next, &mut self.cells_curr);
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells_curr
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        (self.rows, self.cols) == (other.rows, other.cols) && self.cells_curr == other.cells_curr
    }
}

impl Eq for Grid {}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("cells", &self.cells_curr)
            .finish()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells_curr.chunks_exact(self.cols) {
            for &alive in row {
                write!(f, "{}", alive as u8)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
