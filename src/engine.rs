use rand::Rng;
use std::fmt;
use thiserror::Error;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Smallest playable board side.
pub const MIN_SIZE: usize = 2;
/// Largest playable board side.
pub const MAX_SIZE: usize = 8;

/// Rejected board side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("board size must be between {MIN_SIZE} and {MAX_SIZE}, got {0}")]
pub struct SizeError(pub usize);

/// An N×N 2048 grid, row-major. `0` is empty; every non-zero cell holds a
/// power of two ≥ 2.
///
/// Example
/// ```
/// use tui_2048::engine::{Grid, Move};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut grid = Grid::new(4).unwrap();
/// grid.spawn_tile(&mut rng);
/// grid.spawn_tile(&mut rng);
/// assert_eq!(grid.count_empty(), 14);
/// let _ = grid.shift(Move::Left);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Construct an empty grid. Fails for sides outside `[MIN_SIZE, MAX_SIZE]`.
    pub fn new(size: usize) -> Result<Self, SizeError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(SizeError(size));
        }
        Ok(Grid {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Construct a grid from row-major cell values.
    ///
    /// `cells` must be `size * size` long; values are taken as-is.
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Result<Self, SizeError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) || cells.len() != size * size {
            return Err(SizeError(size));
        }
        Ok(Grid { size, cells })
    }

    /// Board side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at `(row, col)`; 0 for an empty cell.
    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.size + col]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    /// Count the number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Slide and merge every line toward `dir`, mutating the grid.
    ///
    /// Returns true if any cell changed (shift or merge). A grid already
    /// fully compacted toward `dir` returns false and is left untouched.
    pub fn shift(&mut self, dir: Move) -> bool {
        let mut changed = false;
        let mut buf = vec![0u32; self.size];
        for line in 0..self.size {
            self.read_line(dir, line, &mut buf);
            if slide_line(&mut buf) {
                changed = true;
                self.write_line(dir, line, &buf);
            }
        }
        changed
    }

    /// Would `shift(dir)` change the grid? Never mutates.
    pub fn would_change(&self, dir: Move) -> bool {
        let mut buf = vec![0u32; self.size];
        for line in 0..self.size {
            self.read_line(dir, line, &mut buf);
            if slide_line(&mut buf) {
                return true;
            }
        }
        false
    }

    /// True if no move in any direction changes the grid.
    pub fn is_game_over(&self) -> bool {
        Move::ALL.iter().all(|&dir| !self.would_change(dir))
    }

    /// Insert a 2 (probability 7/8) or 4 (probability 1/8) into a uniformly
    /// chosen empty cell. Returns false on a full grid.
    ///
    /// The position is drawn before the value, so a seeded RNG reproduces
    /// the same board every run.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let empty = self.count_empty();
        if empty == 0 {
            return false;
        }
        let ordinal = rng.gen_range(0..empty);
        let value = if rng.gen_range(0..8) > 0 { 2 } else { 4 };
        let mut seen = 0;
        for cell in self.cells.iter_mut() {
            if *cell != 0 {
                continue;
            }
            if seen == ordinal {
                *cell = value;
                break;
            }
            seen += 1;
        }
        true
    }

    /// Map `(line, pos)` to a cell index, where `pos == 0` is the edge tiles
    /// slide toward. For a fixed `line`, `pos` enumerates one full row
    /// (Left/Right) or column (Up/Down).
    #[inline]
    fn line_cell(&self, dir: Move, line: usize, pos: usize) -> usize {
        let n = self.size;
        let (row, col) = match dir {
            Move::Left => (line, pos),
            Move::Right => (line, n - 1 - pos),
            Move::Up => (pos, line),
            Move::Down => (n - 1 - pos, line),
        };
        row * n + col
    }

    fn read_line(&self, dir: Move, line: usize, buf: &mut [u32]) {
        for (pos, slot) in buf.iter_mut().enumerate() {
            *slot = self.cells[self.line_cell(dir, line, pos)];
        }
    }

    fn write_line(&mut self, dir: Move, line: usize, buf: &[u32]) {
        for (pos, &val) in buf.iter().enumerate() {
            let idx = self.line_cell(dir, line, pos);
            self.cells[idx] = val;
        }
    }
}

/// Compact and merge one line toward index 0. Returns true if the line
/// changed.
///
/// Equal adjacent tiles merge once per move: the merge target is dropped as
/// a candidate immediately, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`, never
/// `[8, 0, 0, 0]`.
fn slide_line(line: &mut [u32]) -> bool {
    let mut changed = false;
    let mut free = 0;
    let mut last: Option<usize> = None;
    for pos in 0..line.len() {
        let val = line[pos];
        if val == 0 {
            continue;
        }
        if let Some(target) = last {
            if line[target] == val {
                line[target] = val * 2;
                line[pos] = 0;
                last = None;
                changed = true;
                continue;
            }
        }
        line[pos] = 0;
        line[free] = val;
        if free != pos {
            changed = true;
        }
        last = Some(free);
        free += 1;
    }
    changed
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}x{}, {:?})", self.size, self.size, self.cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f)?;
            for (col, &val) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, "|")?;
                }
                if val == 0 {
                    write!(f, "      ")?;
                } else {
                    write!(f, "{:^6}", val)?;
                }
            }
        }
        Ok(())
    }
}
