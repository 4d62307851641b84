//! Grid model: visited cells and the two passage matrices
//!
//! A `rows x columns` maze keeps three boolean matrices:
//! - `visited`: one entry per cell
//! - `horizontal`: `(rows-1) x columns`, entry `[r][c]` true means the
//!   passage between `(r,c)` and `(r+1,c)` is open
//! - `vertical`: `rows x (columns-1)`, entry `[r][c]` true means the
//!   passage between `(r,c)` and `(r,c+1)` is open
//!
//! All entries start false: nothing visited, every wall present. The only
//! mutation paths are `mark_visited` and `open_passage`, so the carve's
//! traversal discipline is enough to guarantee the spanning-tree invariant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// A cell index in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Direction of travel between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The order neighbor candidates are generated in before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, column) offset of one step in this direction
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Unit vector in world space (y grows downward, matching screen space)
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Cell state plus the two wall-opening matrices, row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    visited: Vec<bool>,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl Grid {
    /// Create an unvisited, fully walled grid.
    ///
    /// Either dimension of 1 is legal (the matching passage matrix is just
    /// empty); 0 in either axis is `InvalidDimensions`.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows < 1 || columns < 1 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            visited: vec![false; rows * columns],
            horizontal: vec![false; (rows - 1) * columns],
            vertical: vec![false; rows * (columns - 1)],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// The adjacent cell one step away, if it is inside the grid
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.offset();
        let row = cell.row.checked_add_signed(dr)?;
        let column = cell.column.checked_add_signed(dc)?;
        let next = Cell::new(row, column);
        self.contains(next).then_some(next)
    }

    fn cell_index(&self, cell: Cell) -> Result<usize> {
        if !self.contains(cell) {
            return Err(MazeError::OutOfBounds {
                row: cell.row,
                column: cell.column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(cell.row * self.columns + cell.column)
    }

    pub fn visited(&self, cell: Cell) -> Result<bool> {
        Ok(self.visited[self.cell_index(cell)?])
    }

    /// Mark a cell as reached by the carve
    pub fn mark_visited(&mut self, cell: Cell) -> Result<()> {
        let index = self.cell_index(cell)?;
        self.visited[index] = true;
        Ok(())
    }

    pub fn all_visited(&self) -> bool {
        self.visited.iter().all(|&visited| visited)
    }

    /// Is the passage between `(row, column)` and `(row+1, column)` open?
    pub fn horizontal_open(&self, row: usize, column: usize) -> Result<bool> {
        if row + 1 >= self.rows || column >= self.columns {
            return Err(MazeError::OutOfBounds {
                row,
                column,
                rows: self.rows.saturating_sub(1),
                columns: self.columns,
            });
        }
        Ok(self.horizontal[row * self.columns + column])
    }

    /// Is the passage between `(row, column)` and `(row, column+1)` open?
    pub fn vertical_open(&self, row: usize, column: usize) -> Result<bool> {
        if row >= self.rows || column + 1 >= self.columns {
            return Err(MazeError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns.saturating_sub(1),
            });
        }
        Ok(self.vertical[row * (self.columns - 1) + column])
    }

    /// Open the passage crossed when stepping from `from` to `to`.
    ///
    /// Up/down steps open the horizontal entry at the smaller row index;
    /// left/right steps open the vertical entry at the smaller column index.
    pub fn open_passage(&mut self, from: Cell, to: Cell, direction: Direction) -> Result<()> {
        self.cell_index(from)?;
        self.cell_index(to)?;
        match direction {
            Direction::Up | Direction::Down => {
                debug_assert_eq!(from.column, to.column);
                debug_assert_eq!(from.row.abs_diff(to.row), 1);
                let row = from.row.min(to.row);
                self.horizontal[row * self.columns + from.column] = true;
            }
            Direction::Left | Direction::Right => {
                debug_assert_eq!(from.row, to.row);
                debug_assert_eq!(from.column.abs_diff(to.column), 1);
                let column = from.column.min(to.column);
                self.vertical[from.row * (self.columns - 1) + column] = true;
            }
        }
        Ok(())
    }

    /// Is the passage from `cell` toward `direction` open? Steps that would
    /// leave the grid are closed by definition.
    pub fn passage_open(&self, cell: Cell, direction: Direction) -> Result<bool> {
        self.cell_index(cell)?;
        let Some(next) = self.neighbor(cell, direction) else {
            return Ok(false);
        };
        match direction {
            Direction::Up | Direction::Down => {
                self.horizontal_open(cell.row.min(next.row), cell.column)
            }
            Direction::Left | Direction::Right => {
                self.vertical_open(cell.row, cell.column.min(next.column))
            }
        }
    }

    /// Total passages opened so far. A finished carve holds exactly
    /// `rows * columns - 1`.
    pub fn open_passages(&self) -> usize {
        self.horizontal
            .iter()
            .chain(self.vertical.iter())
            .filter(|&&open| open)
            .count()
    }

    /// Rows of the visited matrix, for diagnostics and tests
    pub fn visited_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.visited.chunks(self.columns)
    }

    /// Rows of the horizontal passage matrix (empty iterator when `rows == 1`)
    pub fn horizontal_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.horizontal.chunks(self.columns)
    }

    /// Rows of the vertical passage matrix (empty iterator when `columns == 1`)
    pub fn vertical_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.vertical.chunks((self.columns - 1).max(1))
    }
}
