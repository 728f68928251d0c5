//! Terminal collaborator: raw-mode lifetime, key polling, box-drawing
//! render. The game core only sees `Input` values and a `Write` sink.

use crate::engine::{Grid, Move};
use crate::game::Input;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

/// Scoped terminal takeover: raw mode, alternate screen, hidden cursor.
///
/// The prior terminal state is restored on drop, so every exit path
/// (normal quit, error, panic unwind) puts the terminal back.
pub struct Screen {
    out: io::Stdout,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Screen { out })
    }

    /// Clear and redraw the whole frame.
    pub fn render(&mut self, grid: &Grid) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        draw_grid(&mut self.out, grid)?;
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Wait up to `timeout` for a keypress and decode it. `None` means the poll
/// timed out or the key has no binding.
pub fn poll_input(timeout: Duration) -> io::Result<Option<Input>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(Input::Quit));
            }
            Ok(map_key(key.code))
        }
        _ => Ok(None),
    }
}

fn map_key(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('h') | KeyCode::Left => Some(Input::Shift(Move::Left)),
        KeyCode::Char('j') | KeyCode::Down => Some(Input::Shift(Move::Down)),
        KeyCode::Char('k') | KeyCode::Up => Some(Input::Shift(Move::Up)),
        KeyCode::Char('l') | KeyCode::Right => Some(Input::Shift(Move::Right)),
        _ => None,
    }
}

/// Draw the grid frame and key help to any writer. Lines end in `\r\n`
/// because the terminal is in raw mode.
pub fn draw_grid(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    let size = grid.size();
    draw_border(out, size)?;
    for (row_idx, row) in grid.rows().enumerate() {
        draw_padding(out, size)?;
        write!(out, "| ")?;
        for &val in row {
            if val == 0 {
                write!(out, "      | ")?;
            } else if val >= 1024 {
                write!(out, " {:2}k  | ", val / 1024)?;
            } else {
                write!(out, "{:4}  | ", val)?;
            }
        }
        write!(out, "\r\n")?;
        draw_padding(out, size)?;
        if row_idx < size - 1 {
            write!(out, "|")?;
            for col in 0..size {
                write!(out, "-------")?;
                if col < size - 1 {
                    write!(out, "+")?;
                }
            }
            write!(out, "|\r\n")?;
        }
    }
    draw_border(out, size)?;
    write!(out, "  h,j,k,l: move         q: quit\r\n")
}

fn draw_border(out: &mut impl Write, size: usize) -> io::Result<()> {
    write!(out, "+{}+\r\n", "-".repeat(8 * size - 1))
}

fn draw_padding(out: &mut impl Write, size: usize) -> io::Result<()> {
    write!(out, "|{}\r\n", "       |".repeat(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(grid: &Grid) -> Vec<String> {
        let mut buf = Vec::new();
        draw_grid(&mut buf, grid).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .split("\r\n")
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn it_draws_a_2x2_frame() {
        let grid = Grid::from_cells(2, vec![2, 0, 16, 2048]).unwrap();
        let lines = rendered(&grid);
        assert_eq!(
            lines,
            vec![
                "+---------------+",
                "|       |       |",
                "|    2  |       | ",
                "|       |       |",
                "|-------+-------|",
                "|       |       |",
                "|   16  |   2k  | ",
                "|       |       |",
                "+---------------+",
                "  h,j,k,l: move         q: quit",
                "",
            ]
        );
    }

    #[test]
    fn it_scales_the_border_with_size() {
        for size in [2, 4, 8] {
            let grid = Grid::new(size).unwrap();
            let lines = rendered(&grid);
            assert_eq!(lines[0].len(), 8 * size + 1);
            assert_eq!(lines[0], lines[lines.len() - 3]);
        }
    }

    #[test]
    fn it_maps_movement_and_quit_keys() {
        assert_eq!(map_key(KeyCode::Char('h')), Some(Input::Shift(Move::Left)));
        assert_eq!(map_key(KeyCode::Char('j')), Some(Input::Shift(Move::Down)));
        assert_eq!(map_key(KeyCode::Char('k')), Some(Input::Shift(Move::Up)));
        assert_eq!(map_key(KeyCode::Char('l')), Some(Input::Shift(Move::Right)));
        assert_eq!(map_key(KeyCode::Left), Some(Input::Shift(Move::Left)));
        assert_eq!(map_key(KeyCode::Char('q')), Some(Input::Quit));
        assert_eq!(map_key(KeyCode::Esc), Some(Input::Quit));
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Enter), None);
    }
}
