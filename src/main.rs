use anyhow::Context;
use clap::Parser;
use std::thread;
use std::time::Duration;
use tui_2048::game::{Game, Input, State};
use tui_2048::tui::{self, Screen};

/// How long one input poll blocks before the loop re-renders.
const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Pacing sleep after a processed move, so held-down keys don't spin.
const MOVE_DELAY: Duration = Duration::from_micros(2048 * 8);

#[derive(Debug, Parser)]
#[command(name = "tui-2048", about = "Terminal 2048: slide tiles with h,j,k,l")]
struct Args {
    /// Board side length (2-8)
    #[arg(default_value_t = 4)]
    size: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = rand::thread_rng();
    let mut game = Game::new(args.size, &mut rng)?;

    let mut screen = Screen::new().context("failed to take over the terminal")?;
    while game.state() == State::Playing {
        screen.render(game.grid())?;
        if let Some(input) = tui::poll_input(POLL_INTERVAL)? {
            game.step(input, &mut rng);
            if matches!(input, Input::Shift(_)) {
                thread::sleep(MOVE_DELAY);
            }
        }
    }
    Ok(())
}
