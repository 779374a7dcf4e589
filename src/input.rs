use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Serialize;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Directional keys asserted during one tick.
///
/// Several keys may be held at once; [`DirectionSignal::requested`] picks one
/// in the fixed priority order Up, Down, Left, Right.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DirectionSignal {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionSignal {
    /// A signal with no key asserted.
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// A signal asserting exactly one direction.
    #[must_use]
    pub fn only(direction: Direction) -> Self {
        let mut signal = Self::NONE;
        signal.press(direction);
        signal
    }

    /// Marks `direction` as asserted.
    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }

    /// Returns the highest-priority asserted direction.
    #[must_use]
    pub fn requested(self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

impl From<Direction> for DirectionSignal {
    fn from(direction: Direction) -> Self {
        Self::only(direction)
    }
}

/// High-level input events consumed by the terminal loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
    Confirm,
}

/// Polls the terminal for key presses.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Waits up to `timeout` for one key press and maps it to a game input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Maps a terminal key event to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char('p' | 'P') => Some(GameInput::Pause),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Resolves the head's direction for this tick.
///
/// Only the highest-priority key is considered. When it would reverse the
/// snake the current direction is kept, even if a lower-priority key would
/// have been a legal turn.
#[must_use]
pub fn resolve_direction(current: Option<Direction>, signal: DirectionSignal) -> Option<Direction> {
    let Some(requested) = signal.requested() else {
        return current;
    };

    match current {
        Some(current) if !direction_change_is_valid(current, requested) => Some(current),
        _ => Some(requested),
    }
}
