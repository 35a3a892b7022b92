use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// Rows and columns must both be positive; also raised when a seed
    /// pattern does not have `rows * cols` cells.
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// Linear index outside `[0, rows * cols)`.
    #[error("cell index {index} is out of range for a grid of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },

    /// Same failure as [`LifeError::IndexOutOfRange`] for `(row, col)`
    /// addressing, keeping the coordinates that were asked for. Use
    /// [`LifeError::is_out_of_range`] to match both.
    #[error("cell ({row}, {col}) is out of range for a {rows}x{cols} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("a play session is already active")]
    AlreadyPlaying,

    #[error("play session was issued by another engine")]
    ForeignSession,
}

impl LifeError {
    /// `true` for an access outside the grid, whichever way it was addressed.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            LifeError::IndexOutOfRange { .. } | LifeError::CellOutOfRange { .. }
        )
    }
}
