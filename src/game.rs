//! The turn loop as a state machine: apply a move, spawn on change, quit
//! when the player asks or no legal move remains.

use crate::engine::{Grid, Move, SizeError};
use rand::Rng;

/// Game lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Playing,
    Quit,
}

/// A decoded player intent. Key-to-input mapping lives in the terminal
/// layer; anything unrecognized never reaches the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Shift(Move),
    Quit,
}

/// A running game: the grid plus the lifecycle state.
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    state: State,
}

impl Game {
    /// Start a game on an empty `size`×`size` grid seeded with two tiles.
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, SizeError> {
        let mut grid = Grid::new(size)?;
        grid.spawn_tile(rng);
        grid.spawn_tile(rng);
        Ok(Game {
            grid,
            state: State::Playing,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Advance by one input. A shift that changes the grid spawns one tile;
    /// the game ends when no direction can change the board.
    pub fn step<R: Rng + ?Sized>(&mut self, input: Input, rng: &mut R) {
        if self.state == State::Quit {
            return;
        }
        match input {
            Input::Quit => self.state = State::Quit,
            Input::Shift(dir) => {
                if self.grid.shift(dir) {
                    self.grid.spawn_tile(rng);
                }
                if self.grid.is_game_over() {
                    self.state = State::Quit;
                }
            }
        }
    }
}
