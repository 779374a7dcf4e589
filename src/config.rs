use ratatui::style::Color;

/// Logical size of one grid cell in screen units.
pub const CELL_SIZE: u32 = 32;

/// Number of rows at the top of the grid reserved for the score display.
pub const RESERVED_ROWS: usize = 1;

/// Score granted for each food eaten.
pub const FOOD_REWARD: u32 = 100;

/// Fixed logical tick rate of the simulation.
pub const TICKS_PER_SECOND: u32 = 10;

/// Default logical screen width.
pub const DEFAULT_SCREEN_WIDTH: u32 = 640;

/// Default logical screen height.
pub const DEFAULT_SCREEN_HEIGHT: u32 = 640;

/// Terminal columns drawn per grid cell, keeping cells roughly square.
pub const TERMINAL_COLS_PER_CELL: u16 = 2;

/// Largest playfield accepted, in cells.
pub const MAX_GRID_CELLS: usize = 65_536;

/// Row holding the initial snake.
pub const INITIAL_SNAKE_ROW: usize = 2;

/// Column of the initial head; the body trails to the right of it.
pub const INITIAL_SNAKE_HEAD_COL: usize = 8;

/// Segment count of a freshly placed snake.
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Grid row/column position.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// Playfield dimensions in cells.
///
/// Every conversion between a linear cell index and a [`Position`] goes
/// through this type so the row-major layout is decoded the same way
/// everywhere (`row = index / cols`, `col = index % cols`).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    /// Derives the grid from a logical screen size and a cell size.
    #[must_use]
    pub fn from_screen(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            rows: (height / cell_size) as usize,
            cols: (width / cell_size) as usize,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        self.rows * self.cols
    }

    /// Decodes a linear index, or `None` when it lies past the last cell.
    #[must_use]
    pub fn position_of(self, index: usize) -> Option<Position> {
        if index >= self.total_cells() {
            return None;
        }

        Some(Position {
            row: index / self.cols,
            col: index % self.cols,
        })
    }

    /// Encodes a position, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index_of(self, position: Position) -> Option<usize> {
        if position.row >= self.rows || position.col >= self.cols {
            return None;
        }

        Some(position.row * self.cols + position.col)
    }

    /// Returns the top-left corner of a cell in logical screen units.
    #[must_use]
    pub fn cell_origin(self, index: usize, cell_size: u32) -> Option<(u32, u32)> {
        let position = self.position_of(index)?;
        let x = u32::try_from(position.col).ok()?.checked_mul(cell_size)?;
        let y = u32::try_from(position.row).ok()?.checked_mul(cell_size)?;
        Some((x, y))
    }
}

/// Colors used by the terminal front end.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub play_bg: Color,
    pub score_band_fg: Color,
    pub score_band_bg: Color,
    pub banner: Color,
}

/// The only theme shipped with the terminal front end.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    score_band_fg: Color::White,
    score_band_bg: Color::DarkGray,
    banner: Color::Yellow,
};

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
pub const GLYPH_SNAKE_BODY_HORIZONTAL: &str = "━";
pub const GLYPH_SNAKE_BODY_VERTICAL: &str = "┃";
pub const GLYPH_SNAKE_CORNER_UP_RIGHT: &str = "┗";
pub const GLYPH_SNAKE_CORNER_UP_LEFT: &str = "┛";
pub const GLYPH_SNAKE_CORNER_DOWN_RIGHT: &str = "┏";
pub const GLYPH_SNAKE_CORNER_DOWN_LEFT: &str = "┓";
pub const GLYPH_SNAKE_TAIL: &str = "•";
pub const GLYPH_FOOD: &str = "●";

#[cfg(test)]
mod tests {
    use super::{GridSize, Position, CELL_SIZE};

    #[test]
    fn index_decoding_uses_column_count() {
        let size = GridSize { rows: 4, cols: 7 };

        assert_eq!(size.position_of(15), Some(Position { row: 2, col: 1 }));
        assert_eq!(size.index_of(Position { row: 2, col: 1 }), Some(15));
        assert_eq!(size.position_of(28), None);
    }

    #[test]
    fn index_encoding_rejects_out_of_range_columns() {
        let size = GridSize { rows: 4, cols: 7 };

        assert_eq!(size.index_of(Position { row: 0, col: 7 }), None);
        assert_eq!(size.index_of(Position { row: 4, col: 0 }), None);
    }

    #[test]
    fn screen_dimensions_map_to_rows_and_cols() {
        let size = GridSize::from_screen(640, 320, CELL_SIZE);

        assert_eq!(size, GridSize { rows: 10, cols: 20 });
        assert_eq!(size.total_cells(), 200);
    }

    #[test]
    fn cell_origin_scales_by_cell_size() {
        let size = GridSize { rows: 10, cols: 20 };

        assert_eq!(size.cell_origin(21, CELL_SIZE), Some((32, 32)));
        assert_eq!(size.cell_origin(39, CELL_SIZE), Some((19 * 32, 32)));
        assert_eq!(size.cell_origin(19, CELL_SIZE), Some((19 * 32, 0)));
        assert_eq!(size.cell_origin(200, CELL_SIZE), None);
    }
}
