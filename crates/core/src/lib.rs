//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every gameplay rule: the grid, the seven shapes,
//! collision, rotation, row clearing, scoring and level progression. It has
//! **no dependencies** on rendering, audio, windowing or input polling, so it
//! runs the same under a terminal, a GUI or a headless simulation:
//!
//! - **Deterministic**: the shape source is injected; equal seeds replay equal games
//! - **Testable**: every rule is reachable through plain method calls
//! - **Allocation-free hot path**: the board is a fixed array, row lists are `ArrayVec`s
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with validity checks, row completion and compaction
//! - [`piece`]: shapes, clockwise rotation and board placement
//! - [`rng`]: uniform shape selection behind the [`ShapeSource`] trait
//! - [`scoring`]: line-clear points, level progression, gravity interval
//! - [`config`]: runtime timing and boundary settings
//! - [`game_engine`]: the tick / move / rotate / lock / clear state machine
//! - [`snapshot`]: serializable read-only view for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece is an independent uniform draw
//! - **Rotation**: clockwise quarter turn about the piece origin, no wall kicks; O never rotates
//! - **Gravity**: one row per tick; a piece that cannot fall locks immediately
//! - **Ghost piece**: shows where the current piece will land
//! - **Scoring**: 40 / 100 / 300 / 1200 × (level + 1) for 1-4 rows
//! - **Levels**: one level per 10 cleared rows; each level shortens the tick
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_core::GameEngine;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameEngine::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! assert!(game.apply_action(GameAction::HardDrop));
//!
//! // The lock settles on the next frame and the on-deck piece takes over
//! let cleared = game.advance(Duration::from_millis(16));
//! assert_eq!(cleared.map(|c| c.rows_removed), Some(0));
//! assert!(!game.is_game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameEngine::advance`](game_engine::GameEngine::advance) every frame
//! with the elapsed time. Gravity fires once the accumulated time exceeds
//! `0.72 s − level / 100` (never below 0.1 s).

pub mod board;
pub mod config;
pub mod game_engine;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoundaryMode};
pub use config::EngineConfig;
pub use game_engine::{GameEngine, GameStatus};
pub use piece::{Piece, PlacedPiece};
pub use rng::{random_shape, ShapeCycle, ShapeSource, UniformShapes};
pub use scoring::{calculate_line_score, ClearResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
