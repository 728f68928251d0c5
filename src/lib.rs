//! tui-2048: a terminal 2048 game.
//!
//! This crate provides:
//! - A `Grid` engine with direction-agnostic slide/merge and tile spawning
//!   (`engine` module)
//! - A small state machine that sequences moves, spawns, and game over
//!   (`game` module)
//! - A crossterm front end: raw-mode screen guard, key polling, box-drawing
//!   render (`tui` module)
//!
//! Quick start:
//! ```
//! use tui_2048::game::{Game, Input, State};
//! use tui_2048::engine::Move;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(4, &mut rng).unwrap();
//! game.step(Input::Shift(Move::Left), &mut rng);
//! assert_eq!(game.state(), State::Playing);
//! println!("{}", game.grid());
//! ```
//!
//! The engine takes any `rand::Rng`, so gameplay is reproducible under a
//! seeded `StdRng`; the binary uses the thread-local RNG.
pub mod engine;
pub mod game;
pub mod tui;
