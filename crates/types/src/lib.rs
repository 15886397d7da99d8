//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic attached, making them
//! usable in any context (core rules, rendering layers, snapshots).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn location**: (5, 0); pieces may extend above row 0 while spawning
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame step used by the headless runner (~60 FPS) |
//! | `MAX_TICK_SECONDS` | 0.72 | Gravity interval at level 0 |
//! | `MIN_TICK_SECONDS` | 0.1 | Floor for the gravity interval |
//! | `MAX_LEVELS` | 100.0 | Divisor of the per-level speed-up |
//! | `LINES_PER_LEVEL` | 10 | Cleared rows needed for a level-up |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BlockColor, Coord, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert_eq!(kind.color(), BlockColor::Purple);
//!
//! let p = Coord::new(1, 2).swap_xy();
//! assert_eq!(p, Coord::new(2, 1));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column at which new pieces appear
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8;

/// Row at which new pieces appear
pub const SPAWN_Y: i8 = 0;

/// Frame step in milliseconds used when driving the engine headless
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 0, in seconds
pub const MAX_TICK_SECONDS: f64 = 0.72;

/// Lower bound for the gravity interval, in seconds
pub const MIN_TICK_SECONDS: f64 = 0.1;

/// Every level shaves `1 / MAX_LEVELS` seconds off the gravity interval
pub const MAX_LEVELS: f64 = 100.0;

/// Cleared rows required to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N rows at level 0:
/// - 0 rows: 0 points
/// - 1 row: 40 points
/// - 2 rows: 100 points
/// - 3 rows: 300 points
/// - 4 rows: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Integer code used for an empty cell in exported grids
pub const EMPTY_CELL_CODE: i8 = -1;

/// Integer grid position: `x` is the column, `y` the row (growing downward).
///
/// Values may lie outside the board while candidate moves are being built;
/// validity is always decided by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Exchange the column and row values
    pub const fn swap_xy(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Multiply the column by `factor`
    pub const fn scale_x(self, factor: i8) -> Self {
        Self {
            x: self.x * factor,
            y: self.y,
        }
    }

    /// Multiply the row by `factor`
    pub const fn scale_y(self, factor: i8) -> Self {
        Self {
            x: self.x,
            y: self.y * factor,
        }
    }

    /// Translate by the given offsets
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        self.offset(rhs.x, rhs.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// Block colors, in palette order.
///
/// The discriminant is the color index stored in exported grids and used by
/// renderers to pick a texture slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockColor {
    Red = 0,
    Orange = 1,
    Yellow = 2,
    Green = 3,
    BlueLight = 4,
    BlueDark = 5,
    Purple = 6,
}

impl BlockColor {
    /// Palette index (0..=6)
    pub fn index(self) -> i8 {
        self as i8
    }

    /// Inverse of [`BlockColor::index`]
    ///
    /// ```
    /// use blockfall_types::BlockColor;
    ///
    /// assert_eq!(BlockColor::from_index(4), Some(BlockColor::BlueLight));
    /// assert_eq!(BlockColor::from_index(7), None);
    /// assert_eq!(BlockColor::from_index(-1), None);
    /// ```
    pub fn from_index(index: i8) -> Option<Self> {
        match index {
            0 => Some(BlockColor::Red),
            1 => Some(BlockColor::Orange),
            2 => Some(BlockColor::Yellow),
            3 => Some(BlockColor::Green),
            4 => Some(BlockColor::BlueLight),
            5 => Some(BlockColor::BlueDark),
            6 => Some(BlockColor::Purple),
            _ => None,
        }
    }
}

/// The seven piece shapes
///
/// Each shape has exactly one color and one canonical 4-block layout,
/// expressed as offsets from the piece origin:
/// - **S**: Red
/// - **Z**: Green
/// - **L**: Orange
/// - **J**: Dark blue
/// - **O**: Yellow, 2x2 square (does not rotate)
/// - **I**: Light blue, straight bar
/// - **T**: Purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    S,
    Z,
    L,
    J,
    O,
    I,
    T,
}

impl ShapeKind {
    /// Number of shape kinds
    pub const COUNT: usize = 7;

    /// All kinds, in index order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::O,
        ShapeKind::I,
        ShapeKind::T,
    ];

    /// Kind at `index` in [`ShapeKind::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Color bound to this kind
    pub fn color(self) -> BlockColor {
        match self {
            ShapeKind::S => BlockColor::Red,
            ShapeKind::Z => BlockColor::Green,
            ShapeKind::L => BlockColor::Orange,
            ShapeKind::J => BlockColor::BlueDark,
            ShapeKind::O => BlockColor::Yellow,
            ShapeKind::I => BlockColor::BlueLight,
            ShapeKind::T => BlockColor::Purple,
        }
    }

    /// Canonical block offsets relative to the piece origin
    pub fn offsets(self) -> [Coord; 4] {
        match self {
            ShapeKind::O => [
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
            ],
            ShapeKind::I => [
                Coord::new(0, 0),
                Coord::new(0, -1),
                Coord::new(0, 1),
                Coord::new(0, 2),
            ],
            ShapeKind::S => [
                Coord::new(0, 0),
                Coord::new(-1, 0),
                Coord::new(0, 1),
                Coord::new(1, 1),
            ],
            ShapeKind::Z => [
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(-1, 1),
            ],
            ShapeKind::L => [
                Coord::new(0, 0),
                Coord::new(1, -1),
                Coord::new(0, -1),
                Coord::new(0, 1),
            ],
            ShapeKind::J => [
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(-1, -1),
                Coord::new(0, -1),
            ],
            ShapeKind::T => [
                Coord::new(0, 0),
                Coord::new(-1, 0),
                Coord::new(1, 0),
                Coord::new(0, -1),
            ],
        }
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "o" => Some(ShapeKind::O),
            "i" => Some(ShapeKind::I),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::O => "o",
            ShapeKind::I => "i",
            ShapeKind::T => "t",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(BlockColor)`: Cell filled by a locked block of that color
pub type Cell = Option<BlockColor>;

/// Integer code of a cell in exported grids (`-1` empty, color index otherwise)
pub fn cell_code(cell: Cell) -> i8 {
    cell.map_or(EMPTY_CELL_CODE, BlockColor::index)
}

/// Discrete player intents accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Start a new game (honored only after game over)
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Restart => "restart",
        }
    }
}
