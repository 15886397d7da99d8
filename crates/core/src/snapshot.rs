use serde::{Deserialize, Serialize};

use crate::board::ColorGrid;
use crate::game_engine::GameStatus;
use crate::piece::PlacedPiece;
use crate::types::{BlockColor, Coord, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub color: BlockColor,
    pub location: Coord,
    /// Mapped block coordinates
    pub blocks: [Coord; 4],
}

impl From<&PlacedPiece> for PieceSnapshot {
    fn from(value: &PlacedPiece) -> Self {
        Self {
            kind: value.kind(),
            color: value.color(),
            location: value.location(),
            blocks: value.mapped_blocks(),
        }
    }
}

/// Everything a rendering layer reads from the engine
///
/// The on-deck piece is reported at location (0, 0), so its blocks are the
/// raw shape offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Playfield colors, row-major, `-1` for empty
    pub board: ColorGrid,
    pub current: PieceSnapshot,
    pub ghost: PieceSnapshot,
    pub on_deck: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines_this_level: u32,
    pub total_lines: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
