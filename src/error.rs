use thiserror::Error;

/// Failures while building a session from screen dimensions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SetupError {
    #[error("screen dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("screen dimensions {width}x{height} are not multiples of the cell size {cell_size}")]
    NotCellMultiple {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("a {rows}x{cols} grid cannot hold the score band and the starting snake")]
    GridTooSmall { rows: usize, cols: usize },
    #[error("a {rows}x{cols} grid exceeds the limit of {max_cells} cells")]
    GridTooLarge {
        rows: usize,
        cols: usize,
        max_cells: usize,
    },
}

/// Bounds failures on direct grid access.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("cell index {index} is outside a grid of {len} cells")]
    OutOfBounds { index: usize, len: usize },
    #[error("cell {index} is occupied or reserved")]
    Unavailable { index: usize },
}

/// Food placement failures.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no space left for food after {attempts} attempts")]
    NoSpaceLeft { attempts: usize },
}
