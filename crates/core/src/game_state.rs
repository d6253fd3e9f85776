//! Game state module - one playing session
//!
//! The board engine is pure; this module is the caller that owns a board, a
//! score and an RNG and strings the engine calls together:
//!
//! 1. slide the board with [`Board::apply_move`]
//! 2. if nothing moved, reject the input (no spawn, no score)
//! 3. otherwise bank the score delta and spawn one tile
//! 4. re-evaluate the status: win tile present -> Won, else no moves -> Lost
//!
//! Won and Lost are terminal. Further moves are ignored until [`GameState::restart`].

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, Spawned};
use crate::config::GameConfig;
use crate::error::BoardError;
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameAction, GameStatus};

/// What a single action did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The session is already Won or Lost.
    Ignored,
    /// The slide changed nothing; no tile spawned and the score is untouched.
    Rejected,
    Applied {
        score_delta: u32,
        spawned: Option<Spawned>,
        status: GameStatus,
    },
    Restarted,
}

impl MoveOutcome {
    pub fn changed_board(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. } | MoveOutcome::Restarted)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: GameConfig,
    board: Board,
    score: u32,
    status: GameStatus,
    /// Accepted moves in this episode.
    moves: u32,
    /// Increments on restart.
    episode_id: u32,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Session on the default 4x4 board driven by the built-in LCG.
    pub fn seeded(seed: u32) -> Result<Self, BoardError> {
        Self::new(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl GameState<StdRng> {
    /// Session driven by `StdRng`, seeded from `config.seed` or from entropy.
    pub fn from_config(config: GameConfig) -> Result<Self, BoardError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: RandomSource> GameState<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, BoardError> {
        let board = Board::initialize(config.size, &mut rng)?;
        debug!("new {}x{} session\n{}", config.size, config.size, board);
        Ok(Self {
            config,
            board,
            score: 0,
            status: GameStatus::Playing,
            moves: 0,
            episode_id: 0,
            rng,
        })
    }

    /// Resume play from an explicit board. The config's size follows the board.
    ///
    /// A board that already holds the win tile starts as Won, one with no
    /// moves left starts as Lost.
    pub fn from_board(mut config: GameConfig, board: Board, rng: R) -> Self {
        config.size = board.size();
        let mut state = Self {
            config,
            board,
            score: 0,
            status: GameStatus::Playing,
            moves: 0,
            episode_id: 0,
            rng,
        };
        state.status = state.evaluate_status();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn best_tile(&self) -> u32 {
        self.board.max_tile()
    }

    pub fn apply_action(&mut self, action: GameAction) -> MoveOutcome {
        match action {
            GameAction::Move(direction) => self.handle_move(direction),
            GameAction::Restart => {
                self.restart();
                MoveOutcome::Restarted
            }
        }
    }

    /// Slide, then spawn and re-check the status if anything moved.
    pub fn handle_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status.is_terminal() {
            return MoveOutcome::Ignored;
        }

        let result = self.board.apply_move(direction);
        if !result.moved {
            debug!("{} rejected: nothing moves", direction.as_str());
            return MoveOutcome::Rejected;
        }

        self.board = result.board;
        self.score = self.score.saturating_add(result.score_delta);
        self.moves += 1;
        let spawned = self.board.spawn(&mut self.rng);

        let status = self.evaluate_status();
        if status != self.status {
            info!(
                "episode {} {} after {} moves, score {}",
                self.episode_id,
                status.as_str(),
                self.moves,
                self.score
            );
            self.status = status;
        }
        debug!(
            "{} accepted: +{} (score {})",
            direction.as_str(),
            result.score_delta,
            self.score
        );

        MoveOutcome::Applied {
            score_delta: result.score_delta,
            spawned,
            status,
        }
    }

    /// Deal a fresh board of the same size and reset score and status.
    pub fn restart(&mut self) {
        self.board.reinitialize(&mut self.rng);
        self.score = 0;
        self.moves = 0;
        self.status = GameStatus::Playing;
        self.episode_id = self.episode_id.wrapping_add(1);
        info!("episode {} started", self.episode_id);
    }

    // A move that both completes the win tile and fills the board counts as a win.
    fn evaluate_status(&self) -> GameStatus {
        if self.board.contains(self.config.win_tile) {
            GameStatus::Won
        } else if !self.board.has_moves() {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Overwrite `snap` without reallocating.
    pub fn snapshot_into(&self, snap: &mut GameSnapshot) {
        snap.size = self.board.size();
        snap.cells.clear();
        snap.cells.extend(self.board.cells().iter().copied());
        snap.score = self.score;
        snap.best_tile = self.best_tile();
        snap.moves = self.moves;
        snap.status = self.status;
        snap.win_tile = self.config.win_tile;
        snap.episode_id = self.episode_id;
    }
}
