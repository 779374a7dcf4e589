use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::config::{GridSize, Position};
use crate::error::GridError;
use crate::input::Direction;

/// What currently sits in a cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize)]
pub enum Occupancy {
    #[default]
    Empty,
    Food,
    Head,
    Body,
    Tail,
}

impl Occupancy {
    /// Returns true for head, body and tail cells.
    #[must_use]
    pub fn is_snake(self) -> bool {
        matches!(self, Self::Head | Self::Body | Self::Tail)
    }
}

/// Handedness of a body corner, read along the direction of travel.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    /// Classifies the quarter turn from `incoming` to `outgoing`.
    ///
    /// Returns `None` for straight runs and reversals.
    #[must_use]
    pub fn between(incoming: Direction, outgoing: Direction) -> Option<Self> {
        use Direction::{Down, Left, Right, Up};

        match (incoming, outgoing) {
            (Up, Right) | (Right, Down) | (Down, Left) | (Left, Up) => Some(Self::Clockwise),
            (Up, Left) | (Left, Down) | (Down, Right) | (Right, Up) => {
                Some(Self::CounterClockwise)
            }
            _ => None,
        }
    }
}

/// One addressable unit of the playfield.
///
/// `direction` is where the cell's segment will travel next tick.
/// `next_direction` records the direction the segment arrived with, which is
/// only used to tell straight body pieces from corners.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Cell {
    pub occupancy: Occupancy,
    pub direction: Option<Direction>,
    pub next_direction: Option<Direction>,
}

impl Cell {
    /// An empty cell with no direction.
    pub const EMPTY: Self = Self {
        occupancy: Occupancy::Empty,
        direction: None,
        next_direction: None,
    };

    /// Returns the corner handedness for body cells that bend.
    #[must_use]
    pub fn corner(self) -> Option<Turn> {
        if self.occupancy != Occupancy::Body {
            return None;
        }

        match (self.next_direction, self.direction) {
            (Some(incoming), Some(outgoing)) => Turn::between(incoming, outgoing),
            _ => None,
        }
    }
}

/// Row-major arena of cells addressed strictly by index.
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates an all-empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::EMPTY; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns a copy of the cell at `index`.
    pub fn cell_at(&self, index: usize) -> Result<Cell, GridError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(GridError::OutOfBounds {
                index,
                len: self.cells.len(),
            })
    }

    /// Overwrites every field of the cell at `index`.
    pub fn set_cell(
        &mut self,
        index: usize,
        occupancy: Occupancy,
        direction: Option<Direction>,
        next_direction: Option<Direction>,
    ) -> Result<(), GridError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GridError::OutOfBounds { index, len })?;

        *cell = Cell {
            occupancy,
            direction,
            next_direction,
        };
        Ok(())
    }

    /// Resets every cell to empty without reallocating.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Iterates over all cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the index one step from `index` towards `direction`.
    ///
    /// `None` when the step leaves the grid, including wrapping past the
    /// left or right edge of a row.
    #[must_use]
    pub fn step(&self, index: usize, direction: Direction) -> Option<usize> {
        let Position { row, col } = self.size.position_of(index)?;

        let next = match direction {
            Direction::Up => Position {
                row: row.checked_sub(1)?,
                col,
            },
            Direction::Down => Position { row: row + 1, col },
            Direction::Left => Position {
                row,
                col: col.checked_sub(1)?,
            },
            Direction::Right => Position { row, col: col + 1 },
        };

        self.size.index_of(next)
    }

    /// Returns true when `index` lies in the first `reserved_rows` rows.
    #[must_use]
    pub fn in_reserved_band(&self, index: usize, reserved_rows: usize) -> bool {
        index < reserved_rows * self.size.cols
    }
}

impl Index<usize> for Grid {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

impl IndexMut<usize> for Grid {
    fn index_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }
}
