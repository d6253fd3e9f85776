//! Board module - the N x N tile grid and every rule that touches it
//!
//! Cells are stored flat in row-major order (`row * size + col`). A value of 0
//! is an empty cell, anything else is a tile (a power of two in normal play).
//!
//! All four slide directions share one code path: a direction and a line
//! number map to the cell indices of that line, ordered from the edge the
//! tiles slide toward ([`line_indices`]), and a single routine
//! ([`slide_line`]) compacts and merges any such line.
//!
//! A slide never changes the board sum: two equal tiles fuse into their sum.
//! The score a move earns is the total of the tiles its merges produced.

use std::fmt;

use arrayvec::ArrayVec;
use log::debug;

use crate::error::BoardError;
use crate::rng::RandomSource;
use crate::types::{
    Direction, INITIAL_TILES, MAX_CELLS, MAX_SIZE, MAX_TILE, MIN_SIZE, SPAWN_FOUR_PROBABILITY,
};

/// Cell indices of one row or column.
pub type Line = ArrayVec<usize, MAX_SIZE>;

/// Values of one row or column after a slide.
pub type LineValues = ArrayVec<u32, MAX_SIZE>;

/// The game board - `size` x `size` tiles in a fixed-capacity flat array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Row-major cells (row * size + col)
    cells: ArrayVec<u32, MAX_CELLS>,
}

/// Outcome of sliding a board, before any tile is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// At least one cell differs from the input board.
    pub moved: bool,
    /// Sum of the tiles produced by merges (saturating).
    pub score_delta: u32,
}

/// A tile placed by [`Board::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub index: usize,
    pub value: u32,
}

impl Board {
    fn check_size(size: usize) -> Result<(), BoardError> {
        if (MIN_SIZE..=MAX_SIZE).contains(&size) {
            Ok(())
        } else {
            Err(BoardError::UnsupportedSize(size))
        }
    }

    fn blank(size: usize) -> Result<Self, BoardError> {
        Self::check_size(size)?;
        let mut cells = ArrayVec::new();
        cells.extend(std::iter::repeat(0).take(size * size));
        Ok(Self { size, cells })
    }

    /// Deal a fresh board: all cells empty, then two spawns.
    pub fn initialize<R: RandomSource + ?Sized>(size: usize, rng: &mut R) -> Result<Self, BoardError> {
        let mut board = Self::blank(size)?;
        board.reinitialize(rng);
        Ok(board)
    }

    /// Clear every cell and deal the opening tiles again, keeping the size.
    pub fn reinitialize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.cells.iter_mut().for_each(|cell| *cell = 0);
        for _ in 0..INITIAL_TILES {
            self.spawn(rng);
        }
    }

    /// Build a board from explicit row-major cells.
    ///
    /// Fails with [`BoardError::InvalidBoard`] unless `cells.len() == size * size`,
    /// and with [`BoardError::TileTooLarge`] for any value above [`MAX_TILE`].
    pub fn from_cells(size: usize, cells: &[u32]) -> Result<Self, BoardError> {
        Self::check_size(size)?;
        let expected = size * size;
        if cells.len() != expected {
            return Err(BoardError::InvalidBoard {
                size,
                expected,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells.iter().enumerate().find(|(_, &v)| v > MAX_TILE) {
            return Err(BoardError::TileTooLarge { index, value });
        }
        let mut flat = ArrayVec::new();
        flat.extend(cells.iter().copied());
        Ok(Self { size, cells: flat })
    }

    /// Build a board from rows; the edge length is the number of rows.
    pub fn from_rows<Row: AsRef<[u32]>>(rows: &[Row]) -> Result<Self, BoardError> {
        let size = rows.len();
        let flat: Vec<u32> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        if rows.iter().any(|row| row.as_ref().len() != size) {
            Self::check_size(size)?;
            return Err(BoardError::InvalidBoard {
                size,
                expected: size * size,
                actual: flat.len(),
            });
        }
        Self::from_cells(size, &flat)
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Tile at (row, col); `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.cells[start..start + self.size])
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn contains(&self, value: u32) -> bool {
        self.cells.contains(&value)
    }

    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    /// Slide every line toward `direction`, merging equal neighbours once.
    ///
    /// Pure: `self` is left untouched and no tile is spawned.
    pub fn apply_move(&self, direction: Direction) -> MoveResult {
        let mut next = self.clone();
        let mut score_delta = 0u32;

        for k in 0..self.size {
            let line = line_indices(self.size, direction, k);
            let values: LineValues = line.iter().map(|&i| self.cells[i]).collect();
            let (slid, gained) = slide_line(&values);
            score_delta = score_delta.saturating_add(gained);
            for (&i, &v) in line.iter().zip(slid.iter()) {
                next.cells[i] = v;
            }
        }

        let moved = next.cells != self.cells;
        MoveResult {
            board: next,
            moved,
            score_delta,
        }
    }

    /// Whether sliding toward `direction` would change the board.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.apply_move(direction).moved
    }

    /// Legality of each direction, in [`Direction::ALL`] order.
    pub fn legal_moves(&self) -> [bool; 4] {
        Direction::ALL.map(|dir| self.can_move(dir))
    }

    /// True if any cell is empty or any two orthogonal neighbours are equal.
    pub fn has_moves(&self) -> bool {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let v = self.cells[row * n + col];
                if v == 0 {
                    return true;
                }
                if v >= MAX_TILE {
                    continue;
                }
                // Right and down neighbours cover every adjacent pair once.
                if col + 1 < n && self.cells[row * n + col + 1] == v {
                    return true;
                }
                if row + 1 < n && self.cells[(row + 1) * n + col] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Uses exactly one draw from `rng`: the integer part of
    /// `draw * empty_count` picks the cell and the fractional remainder picks
    /// the value. A full board is left unchanged and consumes no draw.
    pub fn spawn<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Spawned> {
        let empty: ArrayVec<usize, MAX_CELLS> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect();
        if empty.is_empty() {
            return None;
        }

        let scaled = rng.next_unit() * empty.len() as f64;
        let slot = (scaled.floor() as usize).min(empty.len() - 1);
        let remainder = scaled - slot as f64;
        let value = if remainder < 1.0 - SPAWN_FOUR_PROBABILITY { 2 } else { 4 };

        let index = empty[slot];
        self.cells[index] = value;
        debug!("spawned {} at cell {}", value, index);
        Some(Spawned { index, value })
    }

    /// By-value form of [`Board::spawn`].
    pub fn with_spawn<R: RandomSource + ?Sized>(mut self, rng: &mut R) -> Self {
        self.spawn(rng);
        self
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match self.cells[row * self.size + col] {
                    0 => write!(f, "{:>width$}", ".", width = width)?,
                    v => write!(f, "{:>width$}", v, width = width)?,
                }
            }
            if row + 1 < self.size {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// Cell indices of line `k`, ordered from the edge tiles slide toward.
///
/// Left and Right read row `k`, Up and Down read column `k`.
pub fn line_indices(size: usize, direction: Direction, k: usize) -> Line {
    (0..size)
        .map(|i| {
            let far = size - 1 - i;
            match direction {
                Direction::Left => k * size + i,
                Direction::Right => k * size + far,
                Direction::Up => i * size + k,
                Direction::Down => far * size + k,
            }
        })
        .collect()
}

/// Compact one line toward its front and merge equal neighbours.
///
/// Each tile takes part in at most one merge, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`. Returns the new line (same length, zero padded) and the sum
/// of the merged tiles. Tiles of [`MAX_TILE`] or more only compact.
///
/// # Panics
///
/// If `line` is longer than [`MAX_SIZE`].
pub fn slide_line(line: &[u32]) -> (LineValues, u32) {
    let mut out = LineValues::new();
    let mut gained = 0u32;
    let mut pending: Option<u32> = None;

    for &v in line.iter().filter(|&&v| v != 0) {
        match pending.take() {
            Some(p) if p == v && p < MAX_TILE => {
                out.push(p + v);
                gained = gained.saturating_add(p + v);
            }
            Some(p) => {
                out.push(p);
                pending = Some(v);
            }
            None => pending = Some(v),
        }
    }
    if let Some(p) = pending {
        out.push(p);
    }
    while out.len() < line.len() {
        out.push(0);
    }

    (out, gained)
}
