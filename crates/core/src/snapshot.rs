use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::types::{GameStatus, DEFAULT_SIZE, DEFAULT_WIN_TILE, MAX_CELLS, MAX_SIZE, MIN_SIZE};

/// Plain copy of a session for renderers and other observers.
///
/// Presentation code reads this instead of the live board, so it can never
/// mutate engine state behind the session's back.
///
/// Deserializing checks that `cells` holds exactly `size * size` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct GameSnapshot {
    pub size: usize,
    /// Row-major cells, `size * size` long.
    pub cells: ArrayVec<u32, MAX_CELLS>,
    pub score: u32,
    pub best_tile: u32,
    pub moves: u32,
    pub status: GameStatus,
    pub win_tile: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.size = self.size.clamp(MIN_SIZE, MAX_SIZE);
        self.cells.clear();
        self.cells
            .extend(std::iter::repeat(0).take(self.size * self.size));
        self.score = 0;
        self.best_tile = 0;
        self.moves = 0;
        self.status = GameStatus::Playing;
        self.episode_id = 0;
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    pub fn playable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// One-line result, e.g. "I scored 1024 in 2048!".
    pub fn summary(&self) -> String {
        format!("I scored {} in 2048!", self.score)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            size: DEFAULT_SIZE,
            cells: ArrayVec::new(),
            score: 0,
            best_tile: 0,
            moves: 0,
            status: GameStatus::Playing,
            win_tile: DEFAULT_WIN_TILE,
            episode_id: 0,
        };
        s.clear();
        s
    }
}

/// Unchecked wire form of [`GameSnapshot`].
#[derive(Deserialize)]
struct RawSnapshot {
    size: usize,
    cells: ArrayVec<u32, MAX_CELLS>,
    score: u32,
    best_tile: u32,
    moves: u32,
    status: GameStatus,
    win_tile: u32,
    episode_id: u32,
}

impl TryFrom<RawSnapshot> for GameSnapshot {
    type Error = BoardError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&raw.size) {
            return Err(BoardError::UnsupportedSize(raw.size));
        }
        let expected = raw.size * raw.size;
        if raw.cells.len() != expected {
            return Err(BoardError::InvalidBoard {
                size: raw.size,
                expected,
                actual: raw.cells.len(),
            });
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
            score: raw.score,
            best_tile: raw.best_tile,
            moves: raw.moves,
            status: raw.status,
            win_tile: raw.win_tile,
            episode_id: raw.episode_id,
        })
    }
}
