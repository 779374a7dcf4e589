use std::io;
use std::panic;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{error, info};
use snake::config::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, TICKS_PER_SECOND};
use snake::game::Session;
use snake::input::{DirectionSignal, GameInput, InputHandler};
use snake::renderer::Overlay;
use snake::terminal_runtime::{restore_terminal, TerminalSession};

#[derive(Debug, Parser)]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// Logical screen width; must be a multiple of the 32-unit cell size.
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    width: u32,

    /// Logical screen height; must be a multiple of the 32-unit cell size.
    #[arg(long, default_value_t = DEFAULT_SCREEN_HEIGHT)]
    height: u32,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second.
    #[arg(long, default_value_t = TICKS_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..=120))]
    tps: u32,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let session = match cli.seed {
        Some(seed) => Session::new_with_seed(cli.width, cli.height, seed),
        None => Session::initialize(cli.width, cli.height),
    }
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    install_panic_hook();

    let result = run(session, tick_interval(cli.tps));
    if let Err(error) = &result {
        error!("terminal loop failed: {error}");
    }
    result
}

/// Main loop: accumulate keys between ticks, then advance once per tick.
fn run(mut session: Session, tick: Duration) -> io::Result<()> {
    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler;
    let mut signal = DirectionSignal::NONE;
    let mut paused = false;
    let mut last_tick = Instant::now();

    loop {
        let overlay = if paused { Overlay::Paused } else { Overlay::None };
        terminal.draw(&session, overlay)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if let Some(game_input) = input.poll_input(timeout)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Pause if !session.status().is_terminal() => paused = !paused,
                GameInput::Confirm if session.status().is_terminal() => {
                    session.restart();
                    signal = DirectionSignal::NONE;
                    last_tick = Instant::now();
                }
                GameInput::Direction(direction) if !paused => signal.press(direction),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if paused || session.status().is_terminal() {
                continue;
            }

            session.set_input_direction(signal);
            signal = DirectionSignal::NONE;
            let status = session.advance();
            if status.is_terminal() {
                info!(
                    "session ended with {status:?}, score {}",
                    session.current_score()
                );
            }
        }
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}

fn tick_interval(ticks_per_second: u32) -> Duration {
    Duration::from_secs(1) / ticks_per_second.max(1)
}
