//! Crate-wide error and result types

use thiserror::Error;

/// Failure modes of maze generation and geometry mapping.
///
/// All of these are fatal to the call that produced them: a partially
/// carved maze is not a valid maze, so nothing is retried or recovered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions must be at least 1x1, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cell ({row}, {column}) is outside the {rows}x{columns} matrix")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("scripted random source exhausted after {drawn} draws")]
    RandomSourceExhausted { drawn: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
