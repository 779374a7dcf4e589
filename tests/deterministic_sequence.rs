use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snake::config::RESERVED_ROWS;
use snake::game::{GameOverReason, GameStatus, Session};
use snake::grid::Occupancy;
use snake::input::{Direction, DirectionSignal};

const FAR_AWAY: usize = 385;

fn session_with_distant_food(seed: u64) -> Session {
    let mut session = Session::new_with_seed(640, 640, seed).expect("valid screen");
    session.replace_food(FAR_AWAY).expect("cell is free");
    session
}

fn occupied(session: &Session) -> HashSet<usize> {
    session
        .renderable_state()
        .filter(|cell| cell.occupancy.is_snake())
        .map(|cell| cell.index)
        .collect()
}

#[test]
fn first_tick_slides_the_starting_snake_left() {
    let mut session = session_with_distant_food(42);

    assert_eq!(session.advance(), GameStatus::Running);

    assert_eq!(session.snake().segments().collect::<Vec<_>>(), vec![49, 48, 47]);
    let cells: Vec<_> = session.renderable_state().collect();
    for index in [47, 48, 49] {
        assert_eq!(cells[index].direction, Some(Direction::Left));
    }
    assert_eq!(cells[50].occupancy, Occupancy::Empty);
}

#[test]
fn eating_adjacent_food_grows_and_scores() {
    let mut session = Session::new_with_seed(640, 640, 42).expect("valid screen");
    session.replace_food(47).expect("cell is free");

    assert_eq!(session.advance(), GameStatus::Running);

    assert_eq!(session.snake().len(), 4);
    assert_eq!(session.current_score(), 100);
    assert_eq!(session.food(), None);
}

#[test]
fn running_off_column_zero_ends_the_game() {
    let mut session = session_with_distant_food(7);

    for _ in 0..8 {
        assert_eq!(session.advance(), GameStatus::Running);
    }
    assert_eq!(session.snake().head(), Some(40));

    assert_eq!(session.advance(), GameStatus::GameOver);
    assert_eq!(session.game_over_reason(), Some(GameOverReason::Wall));
}

#[test]
fn stepwise_food_collection_and_turns() {
    let mut session = session_with_distant_food(42);
    session.replace_food(46).expect("cell is free");

    session.advance();
    assert_eq!(session.snake().len(), 3);
    session.advance();
    assert_eq!(session.snake().len(), 4);
    assert_eq!(session.snake().head(), Some(46));

    session.set_input_direction(Direction::Down.into());
    assert_eq!(session.advance(), GameStatus::Running);
    assert_eq!(session.snake().head(), Some(66));

    session.set_input_direction(Direction::Up.into());
    assert_eq!(session.advance(), GameStatus::Running);
    assert_eq!(session.snake().head(), Some(86));
}

#[test]
fn plain_ticks_shift_occupancy_by_one_step() {
    let mut session = session_with_distant_food(5);
    let before = occupied(&session);

    session.advance();

    let after = occupied(&session);
    assert_eq!(after.len(), before.len());
    let shifted: HashSet<usize> = before.iter().map(|index| index - 1).collect();
    assert_eq!(after, shifted);
}

#[test]
fn random_play_keeps_snake_and_grid_in_sync() {
    let mut inputs = StdRng::seed_from_u64(99);
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    for seed in 0..20 {
        let mut session = Session::new_with_seed(640, 640, seed).expect("valid screen");
        let mut previous_len = session.snake().len();
        let mut previous_score = session.current_score();

        for _ in 0..200 {
            let signal = if inputs.gen_bool(0.3) {
                DirectionSignal::only(directions[inputs.gen_range(0..directions.len())])
            } else {
                DirectionSignal::NONE
            };
            session.set_input_direction(signal);

            let status = session.advance();

            let members: HashSet<usize> = session.snake().segments().collect();
            assert_eq!(members.len(), session.snake().len());
            assert_eq!(members, occupied(&session));

            let len = session.snake().len();
            assert!(len == previous_len || len == previous_len + 1);
            if len == previous_len + 1 {
                assert_eq!(session.current_score(), previous_score + 100);
                assert_eq!(session.food(), None);
            } else {
                assert_eq!(session.current_score(), previous_score);
            }
            previous_len = len;
            previous_score = session.current_score();

            if let Some(food) = session.food() {
                assert!(food >= RESERVED_ROWS * session.grid_size().cols);
                assert!(!members.contains(&food));
            }

            if status.is_terminal() {
                break;
            }
        }
    }
}

#[test]
fn snapshot_serializes_for_external_renderers() {
    let session = session_with_distant_food(1);
    let cells: Vec<_> = session.renderable_state().collect();

    let json = serde_json::to_string(&cells).expect("snapshot serializes");

    assert!(json.contains("\"occupancy\":\"Head\""));
    assert!(json.contains("\"corner\":null"));
}
