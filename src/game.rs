use std::mem;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{
    GridSize, CELL_SIZE, INITIAL_SNAKE_HEAD_COL, INITIAL_SNAKE_LEN, INITIAL_SNAKE_ROW,
    MAX_GRID_CELLS, RESERVED_ROWS,
};
use crate::error::{GridError, SetupError};
use crate::food;
use crate::grid::{Cell, Grid, Occupancy, Turn};
use crate::input::{resolve_direction, Direction, DirectionSignal};
use crate::score::Score;
use crate::snake::Snake;

/// Current high-level state of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum GameStatus {
    Running,
    /// The head hit a wall, the score band, or the snake itself.
    GameOver,
    /// The food spawner ran out of attempts; the board is effectively full.
    NoSpaceLeft,
}

impl GameStatus {
    /// Returns true once the session can no longer advance.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

/// Why a session ended in [`GameStatus::GameOver`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum GameOverReason {
    Wall,
    SelfCollision,
}

/// Read-only drawing data for one grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct RenderCell {
    pub index: usize,
    pub occupancy: Occupancy,
    pub direction: Option<Direction>,
    pub corner: Option<Turn>,
}

impl RenderCell {
    #[must_use]
    pub fn is_corner(&self) -> bool {
        self.corner.is_some()
    }
}

/// Where a segment would land this tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Destination {
    Wall,
    SelfCollision,
    Food(usize),
    Clear(usize),
}

/// One game: grid, snake, food, and score, advanced one tick at a time.
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    grid: Grid,
    snake: Snake,
    food: Option<usize>,
    score: Score,
    status: GameStatus,
    game_over_reason: Option<GameOverReason>,
    tick_count: u64,
    pending: DirectionSignal,
    rng: R,
}

impl Session<StdRng> {
    /// Builds a session for a screen of `width` x `height` logical units,
    /// with food placement seeded from the OS.
    pub fn initialize(width: u32, height: u32) -> Result<Self, SetupError> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(width: u32, height: u32, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Builds a session that draws food positions from `rng`.
    pub fn with_rng(width: u32, height: u32, rng: R) -> Result<Self, SetupError> {
        let size = grid_size_for_screen(width, height)?;

        let mut session = Self {
            grid: Grid::new(size),
            snake: Snake::from_segments(initial_segments(size)),
            food: None,
            score: Score::default(),
            status: GameStatus::Running,
            game_over_reason: None,
            tick_count: 0,
            pending: DirectionSignal::NONE,
            rng,
        };
        session.paint_initial_snake();
        session.spawn_initial_food();

        Ok(session)
    }

    /// Starts a new game on the same grid.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.snake.reset(initial_segments(self.grid.size()));
        self.paint_initial_snake();
        self.food = None;
        self.score.reset();
        self.status = GameStatus::Running;
        self.game_over_reason = None;
        self.tick_count = 0;
        self.pending = DirectionSignal::NONE;
        self.spawn_initial_food();

        info!("new game on a {}x{} grid", self.grid.size().rows, self.grid.size().cols);
    }

    /// Records the directional keys for the next [`advance`](Self::advance).
    pub fn set_input_direction(&mut self, signal: DirectionSignal) {
        self.pending = signal;
    }

    /// Runs one tick: input, food respawn, then segment propagation.
    ///
    /// Once a terminal status is reached it is returned again without
    /// touching any state.
    pub fn advance(&mut self) -> GameStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        self.tick_count += 1;
        self.apply_input();

        if self.food.is_none() {
            match food::spawn(&mut self.rng, &mut self.grid, RESERVED_ROWS) {
                Ok(index) => self.food = Some(index),
                Err(error) => {
                    info!("board full after {} ticks: {error}", self.tick_count);
                    self.status = GameStatus::NoSpaceLeft;
                    return self.status;
                }
            }
        }

        self.propagate();
        self.status
    }

    /// Moves a food marker to `index`, for scripted scenarios.
    ///
    /// The cell must be empty (or hold the current food) and lie below the
    /// score band.
    pub fn replace_food(&mut self, index: usize) -> Result<(), GridError> {
        let target = self.grid.cell_at(index)?;
        let free = target.occupancy == Occupancy::Empty || self.food == Some(index);
        if !free || self.grid.in_reserved_band(index, RESERVED_ROWS) {
            return Err(GridError::Unavailable { index });
        }

        if let Some(previous) = self.food.take() {
            self.grid[previous] = Cell::EMPTY;
        }
        self.grid[index].occupancy = Occupancy::Food;
        self.food = Some(index);
        Ok(())
    }

    fn apply_input(&mut self) {
        let signal = mem::take(&mut self.pending);
        let Some(head) = self.snake.head() else {
            return;
        };

        let cell = &mut self.grid[head];
        cell.direction = resolve_direction(cell.direction, signal);
    }

    /// Shifts every segment one cell, head first.
    ///
    /// Each trailing segment lands where its head-ward neighbour just was
    /// and takes over that neighbour's old direction, so turns ripple down
    /// the body one segment per tick. Only the head can collide or eat, and
    /// it is checked before anything moves.
    fn propagate(&mut self) {
        let mut carried: Option<Direction> = None;

        for position in (0..self.snake.len()).rev() {
            let current = self.snake.segment(position);
            let moving = self.grid[current];
            debug_assert!(moving.direction.is_some(), "snake cell {current} has no direction");
            let Some(heading) = moving.direction else {
                carried = None;
                continue;
            };

            let next = match self.classify(current, heading) {
                Destination::Wall => return self.end(GameOverReason::Wall),
                Destination::SelfCollision => return self.end(GameOverReason::SelfCollision),
                Destination::Food(next) => return self.grow(current, next, heading),
                Destination::Clear(next) => next,
            };

            self.grid[next] = Cell {
                occupancy: moving.occupancy,
                direction: Some(carried.unwrap_or(heading)),
                next_direction: Some(heading),
            };
            self.grid[current] = Cell::EMPTY;
            self.snake.relocate(position, next);

            carried = Some(heading);
        }
    }

    fn classify(&self, current: usize, heading: Direction) -> Destination {
        let Some(next) = self.grid.step(current, heading) else {
            return Destination::Wall;
        };
        if self.grid.in_reserved_band(next, RESERVED_ROWS) {
            return Destination::Wall;
        }

        match self.grid[next].occupancy {
            Occupancy::Empty => Destination::Clear(next),
            Occupancy::Food => Destination::Food(next),
            // The head vacates first, so a Head target cannot occur.
            Occupancy::Head | Occupancy::Body | Occupancy::Tail => Destination::SelfCollision,
        }
    }

    /// The food cell becomes the new head; nothing else moves this tick.
    fn grow(&mut self, head: usize, food: usize, heading: Direction) {
        self.snake.push_head(food);
        self.grid[food] = Cell {
            occupancy: Occupancy::Head,
            direction: Some(heading),
            next_direction: Some(heading),
        };
        self.grid[head].occupancy = Occupancy::Body;
        self.score.award_food();
        self.food = None;

        debug!(
            "ate food at cell {food}; length {} score {}",
            self.snake.len(),
            self.score.value()
        );
    }

    fn end(&mut self, reason: GameOverReason) {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);

        info!(
            "game over ({reason:?}) after {} ticks with score {}",
            self.tick_count,
            self.score.value()
        );
    }

    fn paint_initial_snake(&mut self) {
        let last = self.snake.len().saturating_sub(1);
        for (position, index) in self.snake.segments().enumerate() {
            let occupancy = match position {
                0 => Occupancy::Tail,
                p if p == last => Occupancy::Head,
                _ => Occupancy::Body,
            };
            self.grid[index] = Cell {
                occupancy,
                direction: Some(Direction::Left),
                next_direction: Some(Direction::Left),
            };
        }
    }

    fn spawn_initial_food(&mut self) {
        match food::spawn(&mut self.rng, &mut self.grid, RESERVED_ROWS) {
            Ok(index) => self.food = Some(index),
            Err(error) => warn!("initial food not placed, retrying next tick: {error}"),
        }
    }
}

impl<R> Session<R> {
    /// Per-cell drawing data in index order.
    pub fn renderable_state(&self) -> impl Iterator<Item = RenderCell> + '_ {
        self.grid.cells().enumerate().map(|(index, cell)| RenderCell {
            index,
            occupancy: cell.occupancy,
            direction: cell.direction,
            corner: cell.corner(),
        })
    }

    #[must_use]
    pub fn current_score(&self) -> u32 {
        self.score.value()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Index of the active food, or `None` while it awaits respawn.
    #[must_use]
    pub fn food(&self) -> Option<usize> {
        self.food
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        self.grid.size()
    }
}

fn grid_size_for_screen(width: u32, height: u32) -> Result<GridSize, SetupError> {
    if width == 0 || height == 0 {
        return Err(SetupError::ZeroDimension { width, height });
    }
    if width % CELL_SIZE != 0 || height % CELL_SIZE != 0 {
        return Err(SetupError::NotCellMultiple {
            width,
            height,
            cell_size: CELL_SIZE,
        });
    }

    let size = GridSize::from_screen(width, height, CELL_SIZE);
    let min_rows = (INITIAL_SNAKE_ROW + 1).max(RESERVED_ROWS + 1);
    let min_cols = INITIAL_SNAKE_HEAD_COL + INITIAL_SNAKE_LEN;
    if size.rows < min_rows || size.cols < min_cols {
        return Err(SetupError::GridTooSmall {
            rows: size.rows,
            cols: size.cols,
        });
    }
    let cells = size.rows.checked_mul(size.cols);
    if cells.is_none_or(|cells| cells > MAX_GRID_CELLS) {
        return Err(SetupError::GridTooLarge {
            rows: size.rows,
            cols: size.cols,
            max_cells: MAX_GRID_CELLS,
        });
    }

    Ok(size)
}

/// Tail-first indices of the starting snake, a horizontal run facing left.
fn initial_segments(size: GridSize) -> Vec<usize> {
    let head = INITIAL_SNAKE_ROW * size.cols + INITIAL_SNAKE_HEAD_COL;
    (0..INITIAL_SNAKE_LEN).rev().map(|offset| head + offset).collect()
}
