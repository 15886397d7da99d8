//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of a
//! locked block. Cells live in a flat array for cache locality and zero
//! allocation. Coordinates: (x, y) where x ranges 0..9 (left to right) and
//! y ranges 0..19 (top to bottom). New pieces spawn at (5, 0).
//!
//! Storage is padded with one gutter column and one gutter row. In
//! [`BoundaryMode::Strict`] the gutter is unreachable; in
//! [`BoundaryMode::Inclusive`] it backs the extra points accepted by the
//! inclusive validity check. The gutter never counts toward row completion,
//! never moves during compaction and is never exported.

use std::fmt;
use std::ops::Index;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{cell_code, Cell, Coord, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// Playfield columns
const COLS: usize = BOARD_WIDTH as usize;

/// Playfield rows
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// Row stride of the padded storage (playfield columns plus gutter)
const STRIDE: usize = COLS + 1;

/// Total number of stored cells, gutter included
const STORAGE_SIZE: usize = STRIDE * (ROWS + 1);

/// Row indices, bounded by the board height
pub type RowList = ArrayVec<usize, ROWS>;

/// Exported color grid, `-1` for empty cells
pub type ColorGrid = [[i8; COLS]; ROWS];

/// How [`Board::is_valid_point`] treats the far edges of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryMode {
    /// `0 <= x < width` and `0 <= y < height`
    #[default]
    Strict,
    /// `0 <= x <= width` and `0 <= y <= height`, one past the last index
    Inclusive,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Padded cells, row-major order (y * STRIDE + x)
    cells: [Cell; STORAGE_SIZE],
    boundary: BoundaryMode,
}

impl Board {
    /// Create a new empty board with strict bounds
    pub fn new() -> Self {
        Self::with_boundary(BoundaryMode::Strict)
    }

    /// Create a new empty board using the given boundary mode
    pub fn with_boundary(boundary: BoundaryMode) -> Self {
        Self {
            cells: [None; STORAGE_SIZE],
            boundary,
        }
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Where new pieces are placed
    pub fn spawn_location(&self) -> Coord {
        Coord::new(SPAWN_X, SPAWN_Y)
    }

    /// Whether `point` addresses a stored cell under the current boundary mode
    pub fn is_valid_point(&self, point: Coord) -> bool {
        let (x, y) = (point.x as i16, point.y as i16);
        let (w, h) = (BOARD_WIDTH as i16, BOARD_HEIGHT as i16);
        match self.boundary {
            BoundaryMode::Strict => (0..w).contains(&x) && (0..h).contains(&y),
            BoundaryMode::Inclusive => (0..=w).contains(&x) && (0..=h).contains(&y),
        }
    }

    #[inline(always)]
    fn offset_of(&self, point: Coord) -> Option<usize> {
        if !self.is_valid_point(point) {
            return None;
        }
        Some(point.y as usize * STRIDE + point.x as usize)
    }

    /// Get cell at `point`, `None` if the point is not valid
    pub fn get(&self, point: Coord) -> Option<Cell> {
        self.offset_of(point).map(|idx| self.cells[idx])
    }

    /// Cell at `point`
    ///
    /// # Panics
    ///
    /// Panics if `point` is not valid; callers filter with
    /// [`Board::is_valid_point`] first.
    pub fn content(&self, point: Coord) -> Cell {
        self[point]
    }

    /// Set the cell at `point`
    /// Returns false (and writes nothing) if the point is not valid
    pub fn set(&mut self, point: Coord, cell: Cell) -> bool {
        match self.offset_of(point) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => {
                log::warn!("ignoring write outside the board at {}", point);
                false
            }
        }
    }

    /// Set every valid point in `points`; invalid points are skipped silently
    pub fn set_many<I>(&mut self, points: I, cell: Cell)
    where
        I: IntoIterator<Item = Coord>,
    {
        for point in points {
            if let Some(idx) = self.offset_of(point) {
                self.cells[idx] = cell;
            }
        }
    }

    /// True iff every valid point in `points` is empty; invalid points are ignored
    pub fn are_all_empty<I>(&self, points: I) -> bool
    where
        I: IntoIterator<Item = Coord>,
    {
        points
            .into_iter()
            .filter_map(|point| self.get(point))
            .all(|cell| cell.is_none())
    }

    /// Check if a row is completely filled
    pub fn is_row_completed(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Indices of all completed rows, ascending
    pub fn completed_row_indices(&self) -> RowList {
        (0..ROWS).filter(|&row| self.is_row_completed(row)).collect()
    }

    /// Remove every completed row and return how many were removed
    pub fn remove_completed_rows(&mut self) -> usize {
        let rows = self.completed_row_indices();
        self.remove_rows(&rows);
        rows.len()
    }

    /// Remove the given rows one at a time, in the order given
    ///
    /// Each removal runs against the grid left by the previous one.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        for &row in rows {
            self.remove_row(row);
        }
    }

    /// Remove `row`, shifting every row above it down by one and emptying row 0
    pub fn remove_row(&mut self, row: usize) {
        if row >= ROWS {
            return;
        }
        for source in (0..row).rev() {
            self.copy_row(source, source + 1);
        }
        self.fill_row(0, None);
    }

    /// Copy the playfield cells of `source` over `target`
    pub fn copy_row(&mut self, source: usize, target: usize) {
        if source >= ROWS || target >= ROWS {
            return;
        }
        let src_start = source * STRIDE;
        self.cells
            .copy_within(src_start..src_start + COLS, target * STRIDE);
    }

    /// Set every playfield cell in `row`
    pub fn fill_row(&mut self, row: usize, cell: Cell) {
        if row >= ROWS {
            return;
        }
        let start = row * STRIDE;
        self.cells[start..start + COLS].fill(cell);
    }

    /// Playfield cells of `row`
    ///
    /// # Panics
    ///
    /// Panics if `row` is not a playfield row.
    pub fn row(&self, row: usize) -> &[Cell] {
        assert!(row < ROWS, "row {} is not a playfield row", row);
        let start = row * STRIDE;
        &self.cells[start..start + COLS]
    }

    /// Reset every cell (gutter included) to empty
    pub fn empty(&mut self) {
        self.cells.fill(None);
    }

    /// Number of filled playfield cells
    pub fn filled_count(&self) -> usize {
        (0..ROWS)
            .map(|row| self.row(row).iter().filter(|c| c.is_some()).count())
            .sum()
    }

    /// Write playfield colors into `out` (`-1` for empty)
    pub fn write_color_grid(&self, out: &mut ColorGrid) {
        for (y, out_row) in out.iter_mut().enumerate() {
            for (dst, &cell) in out_row.iter_mut().zip(self.row(y)) {
                *dst = cell_code(cell);
            }
        }
    }

    pub fn color_grid(&self) -> ColorGrid {
        let mut grid = [[0; COLS]; ROWS];
        self.write_color_grid(&mut grid);
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord> for Board {
    type Output = Cell;

    fn index(&self, point: Coord) -> &Cell {
        match self.offset_of(point) {
            Some(idx) => &self.cells[idx],
            None => panic!("board read outside the grid at {}", point),
        }
    }
}

/// One line per row, `.` for empty cells and the color index otherwise
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for &cell in self.row(row) {
                match cell {
                    Some(color) => write!(f, "{:>2}", color.index())?,
                    None => write!(f, "{:>2}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
