use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::{
    GLYPH_FOOD, GLYPH_SNAKE_BODY_HORIZONTAL, GLYPH_SNAKE_BODY_VERTICAL,
    GLYPH_SNAKE_CORNER_DOWN_LEFT, GLYPH_SNAKE_CORNER_DOWN_RIGHT, GLYPH_SNAKE_CORNER_UP_LEFT,
    GLYPH_SNAKE_CORNER_UP_RIGHT, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL, GridSize, RESERVED_ROWS,
    TERMINAL_COLS_PER_CELL, THEME_CLASSIC, Theme,
};
use crate::game::{GameOverReason, GameStatus, RenderCell, Session};
use crate::grid::{Occupancy, Turn};
use crate::input::Direction;

/// Front-end state drawn on top of the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    None,
    Paused,
}

/// Renders the full game frame from the session's renderable state.
pub fn render<R>(frame: &mut Frame<'_>, session: &Session<R>, overlay: Overlay) {
    let theme = &THEME_CLASSIC;
    let size = session.grid_size();
    let board = board_area(frame.area(), size);

    let buffer = frame.buffer_mut();
    buffer.set_style(board, Style::new().bg(theme.play_bg));
    render_score_band(buffer, board, session.current_score(), theme);
    for cell in session.renderable_state() {
        render_cell(buffer, board, size, cell, theme);
    }

    let lines = match (session.status(), overlay) {
        (GameStatus::GameOver, _) => game_over_lines(session),
        (GameStatus::NoSpaceLeft, _) => vec![
            Line::from("BOARD FULL"),
            Line::from(""),
            Line::from(format!("Score: {}", session.current_score())),
            Line::from(""),
            Line::from("[Enter] Play again  [Q] Quit"),
        ],
        (GameStatus::Running, Overlay::Paused) => vec![
            Line::from("PAUSED"),
            Line::from(""),
            Line::from("[P] Resume  [Q] Quit"),
        ],
        (GameStatus::Running, Overlay::None) => return,
    };

    let popup = centered_popup(board, 80, 50);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.banner))
            .block(Block::bordered()),
        popup,
    );
}

fn game_over_lines<R>(session: &Session<R>) -> Vec<Line<'static>> {
    vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {}", session.current_score())),
        Line::from(match session.game_over_reason() {
            Some(GameOverReason::Wall) => "Cause: hit wall",
            Some(GameOverReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(""),
        Line::from("[Enter] Play again  [Q] Quit"),
    ]
}

fn board_area(area: Rect, size: GridSize) -> Rect {
    let cols = u16::try_from(size.cols).unwrap_or(u16::MAX);
    let rows = u16::try_from(size.rows).unwrap_or(u16::MAX);

    Rect {
        x: area.x,
        y: area.y,
        width: cols.saturating_mul(TERMINAL_COLS_PER_CELL).min(area.width),
        height: rows.min(area.height),
    }
}

fn render_score_band(buffer: &mut Buffer, board: Rect, score: u32, theme: &Theme) {
    let rows = u16::try_from(RESERVED_ROWS).unwrap_or(u16::MAX);
    let band = Rect {
        height: rows.min(board.height),
        ..board
    };
    if band.is_empty() {
        return;
    }

    let style = Style::new()
        .fg(theme.score_band_fg)
        .bg(theme.score_band_bg)
        .add_modifier(Modifier::BOLD);
    buffer.set_style(band, style);

    let label = format!(" SCORE {score} ");
    let label_width = u16::try_from(label.width()).unwrap_or(u16::MAX);
    let x = band.right().saturating_sub(label_width).max(band.x);
    buffer.set_stringn(x, band.y, &label, usize::from(band.width), style);
}

fn render_cell(buffer: &mut Buffer, board: Rect, size: GridSize, cell: RenderCell, theme: &Theme) {
    let (glyph, color) = match cell.occupancy {
        Occupancy::Empty => return,
        Occupancy::Food => (GLYPH_FOOD, theme.food),
        Occupancy::Head => (head_glyph(cell.direction), theme.snake_head),
        Occupancy::Body => (body_glyph(cell.direction, cell.corner), theme.snake_body),
        Occupancy::Tail => (GLYPH_SNAKE_TAIL, theme.snake_tail),
    };

    let Some((x, y)) = logical_to_terminal(board, size, cell.index) else {
        return;
    };

    let style = Style::new().fg(color).bg(theme.play_bg);
    buffer.set_string(x, y, glyph, style);
    if connects_right(glyph) && x + 1 < board.right() {
        buffer.set_string(x + 1, y, GLYPH_SNAKE_BODY_HORIZONTAL, style);
    }
}

fn logical_to_terminal(board: Rect, size: GridSize, index: usize) -> Option<(u16, u16)> {
    let position = size.position_of(index)?;
    let col = u16::try_from(position.col).ok()?;
    let row = u16::try_from(position.row).ok()?;

    let x = board.x.checked_add(col.checked_mul(TERMINAL_COLS_PER_CELL)?)?;
    let y = board.y.checked_add(row)?;
    if x >= board.right() || y >= board.bottom() {
        return None;
    }

    Some((x, y))
}

fn head_glyph(direction: Option<Direction>) -> &'static str {
    match direction {
        Some(Direction::Up) => GLYPH_SNAKE_HEAD_UP,
        Some(Direction::Down) => GLYPH_SNAKE_HEAD_DOWN,
        Some(Direction::Left) | None => GLYPH_SNAKE_HEAD_LEFT,
        Some(Direction::Right) => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Picks a straight or corner piece joining the side the segment came
/// from with the side it leaves through.
fn body_glyph(direction: Option<Direction>, corner: Option<Turn>) -> &'static str {
    let Some(outgoing) = direction else {
        return GLYPH_SNAKE_BODY_HORIZONTAL;
    };

    let incoming = match corner {
        None => {
            return match outgoing {
                Direction::Up | Direction::Down => GLYPH_SNAKE_BODY_VERTICAL,
                Direction::Left | Direction::Right => GLYPH_SNAKE_BODY_HORIZONTAL,
            };
        }
        Some(Turn::Clockwise) => rotate_counter_clockwise(outgoing),
        Some(Turn::CounterClockwise) => rotate_counter_clockwise(outgoing).opposite(),
    };

    match (incoming.opposite(), outgoing) {
        (Direction::Up, Direction::Right) | (Direction::Right, Direction::Up) => {
            GLYPH_SNAKE_CORNER_UP_RIGHT
        }
        (Direction::Up, Direction::Left) | (Direction::Left, Direction::Up) => {
            GLYPH_SNAKE_CORNER_UP_LEFT
        }
        (Direction::Down, Direction::Right) | (Direction::Right, Direction::Down) => {
            GLYPH_SNAKE_CORNER_DOWN_RIGHT
        }
        _ => GLYPH_SNAKE_CORNER_DOWN_LEFT,
    }
}

fn rotate_counter_clockwise(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Left,
        Direction::Left => Direction::Down,
        Direction::Down => Direction::Right,
        Direction::Right => Direction::Up,
    }
}

fn connects_right(glyph: &str) -> bool {
    matches!(
        glyph,
        GLYPH_SNAKE_BODY_HORIZONTAL | GLYPH_SNAKE_CORNER_UP_RIGHT | GLYPH_SNAKE_CORNER_DOWN_RIGHT
    )
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::config::{
        GLYPH_SNAKE_BODY_HORIZONTAL, GLYPH_SNAKE_BODY_VERTICAL, GLYPH_SNAKE_CORNER_DOWN_LEFT,
        GLYPH_SNAKE_CORNER_DOWN_RIGHT, GLYPH_SNAKE_CORNER_UP_RIGHT, GLYPH_SNAKE_HEAD_LEFT,
    };
    use crate::game::Session;
    use crate::grid::Turn;
    use crate::input::Direction;

    use super::{body_glyph, render, Overlay};

    #[test]
    fn straight_pieces_follow_the_axis() {
        assert_eq!(
            body_glyph(Some(Direction::Left), None),
            GLYPH_SNAKE_BODY_HORIZONTAL
        );
        assert_eq!(
            body_glyph(Some(Direction::Down), None),
            GLYPH_SNAKE_BODY_VERTICAL
        );
    }

    #[test]
    fn corners_join_entry_and_exit_sides() {
        // Travelling left, then up: enters from the right, leaves through the top.
        assert_eq!(
            body_glyph(Some(Direction::Up), Some(Turn::Clockwise)),
            GLYPH_SNAKE_CORNER_UP_RIGHT
        );
        // Travelling left, then down: enters from the right, leaves through the bottom.
        assert_eq!(
            body_glyph(Some(Direction::Down), Some(Turn::CounterClockwise)),
            GLYPH_SNAKE_CORNER_DOWN_RIGHT
        );
        // Travelling right, then down: enters from the left, leaves through the bottom.
        assert_eq!(
            body_glyph(Some(Direction::Down), Some(Turn::Clockwise)),
            GLYPH_SNAKE_CORNER_DOWN_LEFT
        );
    }

    #[test]
    fn frame_shows_score_band_and_head() {
        let session = Session::new_with_seed(640, 640, 3).expect("valid screen");
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).expect("test backend");

        terminal
            .draw(|frame| render(frame, &session, Overlay::None))
            .expect("frame draws");

        let buffer = terminal.backend().buffer();
        let band: String = (0..40u16).map(|x| buffer[(x, 0u16)].symbol()).collect();
        assert!(band.contains("SCORE 0"));
        assert_eq!(buffer[(16u16, 2u16)].symbol(), GLYPH_SNAKE_HEAD_LEFT);
        assert_eq!(buffer[(18u16, 2u16)].symbol(), GLYPH_SNAKE_BODY_HORIZONTAL);
    }
}
