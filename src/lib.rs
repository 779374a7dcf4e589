//! Movement, collision and growth engine for a grid-based snake game.
//!
//! [`game::Session`] owns the simulation. The terminal front end
//! ([`renderer`], [`terminal_runtime`], and the key mapping in [`input`]) only
//! reads its renderable state and feeds it directional signals.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
