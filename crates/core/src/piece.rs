//! Pieces module - shape layouts, rotation and grid placement
//!
//! A [`Piece`] carries a shape kind, its color and four block offsets relative
//! to the piece origin. A [`PlacedPiece`] binds a piece to a board location and
//! is the only way piece occupancy is expressed in board coordinates.
//!
//! Rotation is a plain quarter turn about the origin: `(x, y)` becomes
//! `(y, -x)`. The O shape is left untouched so its footprint never wobbles.

use std::fmt;

use crate::types::{BlockColor, Coord, ShapeKind};

/// Half-extent of the text preview produced by `Display`
const PREVIEW_RADIUS: i8 = 3;

/// A shape kind with its color and shape-relative block offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    color: BlockColor,
    blocks: [Coord; 4],
}

impl Piece {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            color: kind.color(),
            blocks: kind.offsets(),
        }
    }

    /// Replace kind, color and offsets with the canonical layout for `kind`
    pub fn set_shape(&mut self, kind: ShapeKind) {
        *self = Self::new(kind);
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    /// Block offsets relative to the piece origin
    pub fn offsets(&self) -> &[Coord; 4] {
        &self.blocks
    }

    /// Rotate 90° clockwise about the origin (no-op for O)
    pub fn rotate_clockwise(&mut self) {
        if self.kind == ShapeKind::O {
            return;
        }
        for block in &mut self.blocks {
            *block = block.scale_x(-1).swap_xy();
        }
    }

    /// Clockwise-rotated copy
    pub fn rotated_clockwise(mut self) -> Self {
        self.rotate_clockwise();
        self
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::new(ShapeKind::O)
    }
}

/// 7x7 preview centred on the origin, `X` for blocks
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in -PREVIEW_RADIUS..=PREVIEW_RADIUS {
            for x in -PREVIEW_RADIUS..=PREVIEW_RADIUS {
                let mark = if self.blocks.contains(&Coord::new(x, y)) {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A piece bound to a board-absolute location
///
/// Cheap to copy; candidate moves are built as new values and only committed
/// once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlacedPiece {
    piece: Piece,
    location: Coord,
}

impl PlacedPiece {
    pub fn new(piece: Piece, location: Coord) -> Self {
        Self { piece, location }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn kind(&self) -> ShapeKind {
        self.piece.kind()
    }

    pub fn color(&self) -> BlockColor {
        self.piece.color()
    }

    pub fn location(&self) -> Coord {
        self.location
    }

    pub fn set_location(&mut self, location: Coord) {
        self.location = location;
    }

    /// Translate the location; legality is the caller's concern
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.location = self.location.offset(dx, dy);
    }

    /// Translated copy
    pub fn translated(mut self, dx: i8, dy: i8) -> Self {
        self.move_by(dx, dy);
        self
    }

    pub fn rotate_clockwise(&mut self) {
        self.piece.rotate_clockwise();
    }

    /// Clockwise-rotated copy at the same location
    pub fn rotated_clockwise(mut self) -> Self {
        self.rotate_clockwise();
        self
    }

    /// Block offsets translated onto the board, in offset-table order
    pub fn mapped_blocks(&self) -> [Coord; 4] {
        self.piece.offsets().map(|offset| offset + self.location)
    }
}
