//! Greedy placement planner used by the headless runner.
//!
//! A placement is a number of clockwise turns plus a target column. The
//! planner scores every legal resting position of the current piece and
//! [`apply_place`] turns the best one into ordinary intents, so the engine
//! enforces exactly the same rules as for a human player.

use crate::core::{Board, GameEngine, PlacedPiece, ShapeSource};
use crate::types::{Coord, GameAction, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise quarter turns to apply (0-3)
    pub turns: u8,
    /// Column the piece origin should end up in
    pub column: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    RotationBlocked,
    ColumnBlocked,
}

impl PlaceError {
    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "engine is not accepting intents",
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::ColumnBlocked => "could not move to target column due to collision",
        }
    }
}

/// Per-column stack heights and covered holes
fn surface(board: &Board) -> (u32, u32, u32) {
    let mut aggregate = 0;
    let mut tallest = 0;
    let mut holes = 0;
    for x in 0..BOARD_WIDTH as i8 {
        let top = (0..BOARD_HEIGHT as i8)
            .find(|&y| matches!(board.get(Coord::new(x, y)), Some(Some(_))));
        let Some(top) = top else {
            continue;
        };
        let height = (BOARD_HEIGHT as i8 - top) as u32;
        aggregate += height;
        tallest = tallest.max(height);
        holes += (top..BOARD_HEIGHT as i8)
            .filter(|&y| board.get(Coord::new(x, y)) == Some(None))
            .count() as u32;
    }
    (aggregate, tallest, holes)
}

/// Lower is better
fn placement_cost(board: &Board, resting: &PlacedPiece) -> i64 {
    let mut after = board.clone();
    after.set_many(resting.mapped_blocks(), Some(resting.color()));
    let rows = after.remove_completed_rows() as i64;
    let (aggregate, tallest, holes) = surface(&after);
    aggregate as i64 + 2 * tallest as i64 + 8 * holes as i64 - 10 * rows
}

/// Shift `piece` one column at a time toward `column`; `None` if a step is blocked
fn slide_to<S: ShapeSource>(
    engine: &GameEngine<S>,
    mut piece: PlacedPiece,
    column: i8,
) -> Option<PlacedPiece> {
    while piece.location().x != column {
        let dx = if piece.location().x < column { 1 } else { -1 };
        piece.move_by(dx, 0);
        if !engine.is_position_legal(&piece) {
            return None;
        }
    }
    Some(piece)
}

/// Best resting position the current piece can actually reach
///
/// Candidates follow the same path as [`apply_place`]: every quarter turn in
/// place, then one column per step, then straight down.
pub fn plan_placement<S: ShapeSource>(engine: &GameEngine<S>) -> Option<Placement> {
    let current = *engine.current();
    if !engine.is_position_legal(&current) {
        return None;
    }
    let turns = if current.kind() == ShapeKind::O { 1 } else { 4 };

    let mut best: Option<(i64, Placement)> = None;
    let mut oriented = current;
    for turn in 0..turns {
        if turn > 0 {
            oriented.rotate_clockwise();
            // Later turns pass through this one
            if !engine.is_position_legal(&oriented) {
                break;
            }
        }
        for column in 0..BOARD_WIDTH as i8 {
            let Some(mut candidate) = slide_to(engine, oriented, column) else {
                continue;
            };
            while engine.is_position_legal(&candidate.translated(0, 1)) {
                candidate.move_by(0, 1);
            }
            let cost = placement_cost(engine.board(), &candidate);
            if best.map_or(true, |(c, _)| cost < c) {
                best = Some((cost, Placement { turns: turn, column }));
            }
        }
    }
    best.map(|(_, placement)| placement)
}

/// Rotate, shift and hard-drop the current piece into `placement`
pub fn apply_place<S: ShapeSource>(
    engine: &mut GameEngine<S>,
    placement: Placement,
) -> Result<(), PlaceError> {
    if engine.is_game_over() || engine.is_lock_pending() {
        return Err(PlaceError::NotPlayable);
    }

    for _ in 0..placement.turns {
        if !engine.apply_action(GameAction::Rotate) {
            return Err(PlaceError::RotationBlocked);
        }
    }

    while engine.current().location().x != placement.column {
        let action = if engine.current().location().x < placement.column {
            GameAction::MoveRight
        } else {
            GameAction::MoveLeft
        };
        if !engine.apply_action(action) {
            return Err(PlaceError::ColumnBlocked);
        }
    }

    engine.apply_action(GameAction::HardDrop);
    Ok(())
}
