//! Integration tests for the engine lifecycle

use std::time::Duration;

use blockfall::autoplay::{apply_place, plan_placement};
use blockfall::core::{EngineConfig, GameEngine, GameStatus, ShapeCycle};
use blockfall::types::{BlockColor, Coord, GameAction, ShapeKind, BOARD_WIDTH};

fn cycle_engine(kinds: &[ShapeKind]) -> GameEngine<ShapeCycle> {
    GameEngine::with_source(EngineConfig::default(), ShapeCycle::new(kinds.to_vec())).unwrap()
}

/// Slide the current piece to `column`, hard drop, settle
fn drop_at(engine: &mut GameEngine<ShapeCycle>, column: i8) {
    while engine.current().location().x > column {
        assert!(engine.apply_action(GameAction::MoveLeft));
    }
    while engine.current().location().x < column {
        assert!(engine.apply_action(GameAction::MoveRight));
    }
    assert!(engine.apply_action(GameAction::HardDrop));
}

#[test]
fn test_game_lifecycle() {
    let engine = GameEngine::new(12345);
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.current().location(), Coord::new(5, 0));
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.level(), 0);
    assert_eq!(engine.total_lines(), 0);
    assert!(engine.last_clear().is_none());
}

#[test]
fn test_ten_vertical_i_pieces_clear_four_rows() {
    let mut engine = GameEngine::with_source(
        EngineConfig::default(),
        ShapeCycle::repeat(ShapeKind::I),
    )
    .unwrap();

    for column in 0..BOARD_WIDTH as i8 {
        drop_at(&mut engine, column);
        let result = engine.advance(Duration::from_millis(16)).unwrap();
        if column < 9 {
            assert_eq!(result.rows_removed, 0, "column {}", column);
        } else {
            assert_eq!(result.rows_removed, 4);
            assert_eq!(result.points, 1200);
        }
    }

    assert_eq!(engine.score(), 1200);
    assert_eq!(engine.lines_this_level(), 4);
    assert_eq!(engine.total_lines(), 4);
    assert_eq!(engine.level(), 0);
    assert_eq!(engine.board().filled_count(), 0);
    assert_eq!(engine.status(), GameStatus::Playing);
}

#[test]
fn test_left_wall_rejects_without_mutation() {
    let mut engine = cycle_engine(&[ShapeKind::T]);
    while engine.apply_action(GameAction::MoveLeft) {}

    let before = *engine.current();
    let board = engine.board().clone();
    assert!(!engine.attempt_move(-1, 0));
    assert_eq!(*engine.current(), before);
    assert_eq!(engine.board(), &board);
    // T reaches one block left of its origin
    assert_eq!(before.location().x, 1);
}

#[test]
fn test_rotation_blocked_by_wall_leaves_piece() {
    let mut engine = cycle_engine(&[ShapeKind::I]);
    assert!(engine.attempt_move(0, 3));
    while engine.apply_action(GameAction::MoveRight) {}
    assert_eq!(engine.current().location(), Coord::new(9, 3));

    // Horizontal I would cover columns 8..=11
    let before = *engine.current();
    assert!(!engine.attempt_rotate());
    assert_eq!(*engine.current(), before);

    // Two columns in, the turn fits
    assert!(engine.apply_action(GameAction::MoveLeft));
    assert!(engine.apply_action(GameAction::MoveLeft));
    assert!(engine.attempt_rotate());
    assert!(engine.is_position_legal(engine.current()));
}

#[test]
fn test_game_over_then_restart() {
    let mut engine = cycle_engine(&[ShapeKind::T, ShapeKind::O]);
    engine.edit_board(|board| {
        for y in 0..3 {
            for x in 1..BOARD_WIDTH as i8 {
                board.set(Coord::new(x, y), Some(BlockColor::Red));
            }
        }
    });

    assert!(engine.apply_action(GameAction::HardDrop));
    assert_eq!(engine.advance(Duration::ZERO).map(|c| c.rows_removed), Some(0));
    assert!(engine.is_game_over());
    assert!(engine.snapshot().is_game_over());

    // Nothing but restart has an effect now
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::HardDrop,
    ] {
        assert!(!engine.apply_action(action), "{:?}", action);
    }
    assert_eq!(engine.advance(Duration::from_secs(10)), None);

    assert!(engine.apply_action(GameAction::Restart));
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.board().filled_count(), 0);
}

#[test]
fn test_gravity_drives_piece_to_lock() {
    let mut engine = cycle_engine(&[ShapeKind::O, ShapeKind::T]);
    let frame = Duration::from_millis(16);

    let mut frames = 0;
    let result = loop {
        frames += 1;
        if let Some(result) = engine.advance(frame) {
            break result;
        }
        assert!(frames < 10_000, "piece never locked");
    };

    assert_eq!(result.rows_removed, 0);
    assert_eq!(engine.current().kind(), ShapeKind::T);
    assert_eq!(
        engine.board().get(Coord::new(5, 19)),
        Some(Some(BlockColor::Yellow))
    );
}

#[test]
fn test_snapshot_serializes() {
    let engine = cycle_engine(&[ShapeKind::L, ShapeKind::Z]);
    let json = serde_json::to_string(&engine.snapshot()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "playing");
    assert_eq!(value["score"], 0);
    assert_eq!(value["board"][0].as_array().map(|r| r.len()), Some(10));
    assert!(value["current"]["blocks"].is_array());
}

#[test]
fn test_autoplay_survives_a_while() {
    let mut engine = GameEngine::new(7);
    for _ in 0..60 {
        if engine.is_game_over() {
            break;
        }
        let placement = plan_placement(&engine).unwrap();
        apply_place(&mut engine, placement).unwrap();
        engine.advance(Duration::from_millis(16));
    }
    assert!(engine.total_lines() > 0);
}
