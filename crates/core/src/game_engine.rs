//! Game engine module - drives the active piece, the board and scoring
//!
//! The engine owns the board, the falling piece, the on-deck piece and the
//! ghost preview. It moves through three phases:
//!
//! ```text
//! Falling --lock--> Locked --advance: clear rows, score, spawn--> Falling
//!                                                            \--> GameOver
//! GameOver --restart--> Falling
//! ```
//!
//! Intents are only honored while `Falling`. A lock, whether from gravity or a
//! hard drop, is settled by the next call to [`GameEngine::advance`].

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::piece::{Piece, PlacedPiece};
use crate::rng::{ShapeSource, UniformShapes};
use crate::scoring::{calculate_line_score, ClearResult, LevelProgress};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH};

/// Externally visible game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Current piece accepts intents and gravity
    Falling,
    /// Current piece is written into the board; rows and spawn are pending
    Locked,
    /// A spawn was blocked
    GameOver,
}

/// True iff every mapped block is inside the side and bottom borders
///
/// The top border is open so a spawning piece may poke above row 0.
fn within_borders(piece: &PlacedPiece) -> bool {
    piece
        .mapped_blocks()
        .iter()
        .all(|b| (0..BOARD_WIDTH as i8).contains(&b.x) && b.y < BOARD_HEIGHT as i8)
}

fn is_legal(board: &Board, piece: &PlacedPiece) -> bool {
    within_borders(piece) && board.are_all_empty(piece.mapped_blocks())
}

/// Translate `piece` if the result is legal on `board`
fn shift(board: &Board, piece: &mut PlacedPiece, dx: i8, dy: i8) -> bool {
    let candidate = piece.translated(dx, dy);
    if is_legal(board, &candidate) {
        *piece = candidate;
        return true;
    }
    false
}

/// Move `piece` down until it rests on something
fn sink(board: &Board, piece: &mut PlacedPiece) {
    while shift(board, piece, 0, 1) {}
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameEngine<S = UniformShapes> {
    board: Board,
    current: PlacedPiece,
    on_deck: Piece,
    ghost: PlacedPiece,
    shapes: S,
    config: EngineConfig,
    phase: Phase,
    score: u32,
    progress: LevelProgress,
    total_lines: u32,
    tick_interval: Duration,
    since_last_tick: Duration,
    last_clear: Option<ClearResult>,
}

impl GameEngine<UniformShapes> {
    /// New game with default timing and the given seed
    pub fn new(seed: u64) -> Self {
        let config = EngineConfig::with_seed(seed);
        Self::build(config, UniformShapes::new(seed))
    }

    /// New game from a validated configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Self::with_source(config, UniformShapes::new(config.seed))
    }
}

impl<S: ShapeSource> GameEngine<S> {
    /// New game drawing shapes from `shapes`; `config.seed` is not used
    pub fn with_source(config: EngineConfig, shapes: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, shapes))
    }

    fn build(config: EngineConfig, shapes: S) -> Self {
        let mut engine = Self {
            board: Board::with_boundary(config.boundary),
            current: PlacedPiece::default(),
            on_deck: Piece::default(),
            ghost: PlacedPiece::default(),
            shapes,
            config,
            phase: Phase::Falling,
            score: 0,
            progress: LevelProgress::default(),
            total_lines: 0,
            tick_interval: config.tick_interval(0),
            since_last_tick: Duration::ZERO,
            last_clear: None,
        };
        engine.reset();
        engine
    }

    /// Start a fresh game on an empty board
    pub fn reset(&mut self) {
        self.score = 0;
        self.progress = LevelProgress::default();
        self.total_lines = 0;
        self.last_clear = None;
        self.tick_interval = self.config.tick_interval(0);
        self.since_last_tick = Duration::ZERO;
        self.board.empty();

        self.pick_on_deck();
        self.spawn_on_deck();
        self.pick_on_deck();

        self.phase = Phase::Falling;
        self.update_ghost();
        log::info!(
            "new game: current {:?}, on deck {:?}",
            self.current.kind(),
            self.on_deck.kind()
        );
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Edit the board in place (puzzle setups, tests); the ghost is refreshed afterwards
    pub fn edit_board(&mut self, edit: impl FnOnce(&mut Board)) {
        edit(&mut self.board);
        self.update_ghost();
    }

    pub fn current(&self) -> &PlacedPiece {
        &self.current
    }

    pub fn on_deck(&self) -> &Piece {
        &self.on_deck
    }

    pub fn ghost(&self) -> &PlacedPiece {
        &self.ghost
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    /// Rows cleared since the last level-up
    pub fn lines_this_level(&self) -> u32 {
        self.progress.cleared
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn status(&self) -> GameStatus {
        match self.phase {
            Phase::GameOver => GameStatus::GameOver,
            Phase::Falling | Phase::Locked => GameStatus::Playing,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// A piece was locked and the next `advance` will settle it
    pub fn is_lock_pending(&self) -> bool {
        self.phase == Phase::Locked
    }

    /// Current gravity interval
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Outcome of the most recently settled lock
    pub fn last_clear(&self) -> Option<ClearResult> {
        self.last_clear
    }

    /// True iff every block is inside the borders and on an empty cell
    pub fn is_position_legal(&self, piece: &PlacedPiece) -> bool {
        is_legal(&self.board, piece)
    }

    /// Translate the current piece if the target position is legal
    pub fn attempt_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let moved = shift(&self.board, &mut self.current, dx, dy);
        if moved {
            self.update_ghost();
        }
        moved
    }

    /// Rotate the current piece clockwise if the rotated position is legal
    pub fn attempt_rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let candidate = self.current.rotated_clockwise();
        if !is_legal(&self.board, &candidate) {
            return false;
        }
        self.current = candidate;
        self.update_ghost();
        true
    }

    /// Move the current piece to its lowest legal row without locking it
    pub fn drop_piece(&mut self) {
        while self.attempt_move(0, 1) {}
    }

    /// Write the current piece into the board; rows and spawn settle on the next `advance`
    pub fn lock(&mut self) {
        if self.phase != Phase::Falling {
            return;
        }
        self.board
            .set_many(self.current.mapped_blocks(), Some(self.current.color()));
        self.phase = Phase::Locked;
        log::debug!(
            "locked {:?} at {}",
            self.current.kind(),
            self.current.location()
        );
    }

    /// Drop and lock the current piece
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.drop_piece();
        self.lock();
        true
    }

    /// Gravity step: move down one row, or lock if that is not possible
    pub fn tick(&mut self) {
        if self.phase != Phase::Falling {
            return;
        }
        if !self.attempt_move(0, 1) {
            self.lock();
        }
    }

    /// Project the current piece to its resting row
    pub fn update_ghost(&mut self) {
        self.ghost = self.current;
        sink(&self.board, &mut self.ghost);
    }

    /// Per-frame update
    ///
    /// Accumulates `elapsed`; once the total exceeds the tick interval a
    /// gravity step runs and the accumulator restarts. A pending lock is then
    /// settled: completed rows are removed and scored, the on-deck piece
    /// spawns and a new one is drawn. A blocked spawn ends the game.
    ///
    /// Returns the clear result when a lock was settled during this call.
    pub fn advance(&mut self, elapsed: Duration) -> Option<ClearResult> {
        if self.phase == Phase::GameOver {
            return None;
        }

        self.since_last_tick += elapsed;
        if self.since_last_tick > self.tick_interval {
            self.tick();
            self.since_last_tick = Duration::ZERO;
        }

        if self.phase != Phase::Locked {
            return None;
        }
        Some(self.settle())
    }

    /// Apply a player intent; returns whether it had an effect
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.attempt_move(-1, 0),
            GameAction::MoveRight => self.attempt_move(1, 0),
            GameAction::SoftDrop => self.attempt_move(0, 1),
            GameAction::Rotate => self.attempt_rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Restart => {
                if self.phase != Phase::GameOver {
                    return false;
                }
                self.reset();
                true
            }
        }
    }

    /// Read-only copy of everything a renderer needs
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.color_grid(),
            current: PieceSnapshot::from(&self.current),
            ghost: PieceSnapshot::from(&self.ghost),
            on_deck: PieceSnapshot::from(&PlacedPiece::new(self.on_deck, Default::default())),
            score: self.score,
            level: self.progress.level,
            lines_this_level: self.progress.cleared,
            total_lines: self.total_lines,
            status: self.status(),
        }
    }

    fn pick_on_deck(&mut self) {
        self.on_deck = Piece::new(self.shapes.next_shape());
    }

    /// Place the on-deck piece at the spawn location; returns whether it fits
    fn spawn_on_deck(&mut self) -> bool {
        self.current = PlacedPiece::new(self.on_deck, self.board.spawn_location());
        is_legal(&self.board, &self.current)
    }

    /// Locked -> rows cleared -> spawn attempt -> Falling | GameOver
    fn settle(&mut self) -> ClearResult {
        let rows = self.board.remove_completed_rows();
        let result = self.score_rows(rows);
        self.last_clear = Some(result);

        let spawned = self.spawn_on_deck();
        self.pick_on_deck();

        if spawned {
            self.phase = Phase::Falling;
            log::debug!("spawned {:?}", self.current.kind());
        } else {
            self.phase = Phase::GameOver;
            log::info!(
                "game over: score {}, level {}, lines {}",
                self.score,
                self.progress.level,
                self.total_lines
            );
        }
        self.update_ghost();
        result
    }

    fn score_rows(&mut self, rows: usize) -> ClearResult {
        let points = calculate_line_score(rows, self.progress.level);
        self.score = self.score.saturating_add(points);
        self.total_lines += rows as u32;

        let levels_gained = self
            .progress
            .add_rows(rows as u32, self.config.lines_per_level);
        if levels_gained > 0 {
            self.tick_interval = self.config.tick_interval(self.progress.level);
            log::info!(
                "level {} reached, tick interval {:?}",
                self.progress.level,
                self.tick_interval
            );
        }
        if rows > 0 {
            log::debug!("cleared {} rows for {} points", rows, points);
        }

        ClearResult {
            rows_removed: rows as u32,
            points,
            levels_gained,
        }
    }
}

impl Default for GameEngine<UniformShapes> {
    fn default() -> Self {
        Self::new(1)
    }
}
