//! Board tests - validity, writes, row completion and compaction

use blockfall::core::{Board, BoundaryMode};
use blockfall::types::{BlockColor, Coord, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, row: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        assert!(board.set(Coord::new(x, row), Some(BlockColor::Purple)));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.boundary(), BoundaryMode::Strict);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            let p = Coord::new(x, y);
            assert!(board.is_valid_point(p), "{} should be valid", p);
            assert_eq!(board.content(p), None);
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_valid_point_strict() {
    let board = Board::new();
    assert!(board.is_valid_point(Coord::new(0, 0)));
    assert!(board.is_valid_point(Coord::new(9, 19)));

    assert!(!board.is_valid_point(Coord::new(-1, 0)));
    assert!(!board.is_valid_point(Coord::new(0, -1)));
    assert!(!board.is_valid_point(Coord::new(10, 0)));
    assert!(!board.is_valid_point(Coord::new(0, 20)));
    assert!(!board.is_valid_point(Coord::new(i8::MAX, i8::MAX)));
}

#[test]
fn test_valid_point_inclusive() {
    let board = Board::with_boundary(BoundaryMode::Inclusive);
    // Gutter column and row are addressable
    assert!(board.is_valid_point(Coord::new(10, 0)));
    assert!(board.is_valid_point(Coord::new(0, 20)));
    assert!(board.is_valid_point(Coord::new(10, 20)));

    assert!(!board.is_valid_point(Coord::new(-1, 0)));
    assert!(!board.is_valid_point(Coord::new(11, 0)));
    assert!(!board.is_valid_point(Coord::new(0, 21)));
}

#[test]
fn test_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(Coord::new(5, 10), Some(BlockColor::Orange)));
    assert_eq!(board.get(Coord::new(5, 10)), Some(Some(BlockColor::Orange)));

    assert!(board.set(Coord::new(5, 10), None));
    assert_eq!(board.get(Coord::new(5, 10)), Some(None));

    // Out of range writes are refused and leave the board alone
    assert!(!board.set(Coord::new(-1, 3), Some(BlockColor::Red)));
    assert!(!board.set(Coord::new(3, 20), Some(BlockColor::Red)));
    assert_eq!(board.get(Coord::new(3, 20)), None);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_set_many_skips_invalid_points() {
    let mut board = Board::new();
    board.set_many(
        [Coord::new(0, 0), Coord::new(-1, 0), Coord::new(0, -2), Coord::new(1, 0)],
        Some(BlockColor::Yellow),
    );
    assert_eq!(board.filled_count(), 2);
    assert_eq!(board.content(Coord::new(1, 0)), Some(BlockColor::Yellow));
}

#[test]
fn test_are_all_empty_ignores_invalid_points() {
    let mut board = Board::new();
    let points = [Coord::new(4, -1), Coord::new(4, 0), Coord::new(12, 7)];
    assert!(board.are_all_empty(points));

    board.set(Coord::new(4, 0), Some(BlockColor::BlueDark));
    assert!(!board.are_all_empty(points));

    // Only invalid points: vacuously empty
    assert!(board.are_all_empty([Coord::new(-3, -3), Coord::new(40, 2)]));
}

#[test]
fn test_row_completion() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 - 1 {
        board.set(Coord::new(x, 19), Some(BlockColor::Red));
    }
    assert!(!board.is_row_completed(19));
    board.set(Coord::new(9, 19), Some(BlockColor::Red));
    assert!(board.is_row_completed(19));
    assert!(!board.is_row_completed(18));
    assert!(!board.is_row_completed(200));
}

#[test]
fn test_remove_completed_rows_with_none_is_noop() {
    let mut board = Board::new();
    board.set(Coord::new(3, 15), Some(BlockColor::Green));
    let before = board.clone();

    assert_eq!(board.remove_completed_rows(), 0);
    assert_eq!(board, before);
    assert_eq!(board.remove_completed_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_remove_non_adjacent_rows() {
    let mut board = Board::new();
    for row in [2, 5, 9] {
        fill_row(&mut board, row);
    }
    board.set(Coord::new(0, 0), Some(BlockColor::Red));
    board.set(Coord::new(1, 3), Some(BlockColor::Orange));
    board.set(Coord::new(2, 7), Some(BlockColor::Green));
    board.set(Coord::new(3, 12), Some(BlockColor::BlueDark));

    assert_eq!(board.completed_row_indices().as_slice(), &[2, 5, 9]);
    assert_eq!(board.remove_completed_rows(), 3);

    // Each marker drops by the number of removed rows below it
    assert_eq!(board.content(Coord::new(0, 3)), Some(BlockColor::Red));
    assert_eq!(board.content(Coord::new(1, 5)), Some(BlockColor::Orange));
    assert_eq!(board.content(Coord::new(2, 8)), Some(BlockColor::Green));
    assert_eq!(board.content(Coord::new(3, 12)), Some(BlockColor::BlueDark));
    assert_eq!(board.filled_count(), 4);
    for row in 0..3 {
        assert!(board.row(row).iter().all(|c| c.is_none()));
    }
}

#[test]
fn test_remove_bottom_four_rows() {
    let mut board = Board::new();
    for row in 16..20 {
        fill_row(&mut board, row);
    }
    board.set(Coord::new(7, 15), Some(BlockColor::BlueLight));

    assert_eq!(board.remove_completed_rows(), 4);
    assert_eq!(board.filled_count(), 1);
    assert_eq!(board.content(Coord::new(7, 19)), Some(BlockColor::BlueLight));
}

#[test]
fn test_inclusive_gutter_does_not_complete_rows() {
    let mut board = Board::with_boundary(BoundaryMode::Inclusive);
    assert!(board.set(Coord::new(10, 19), Some(BlockColor::Red)));
    assert!(board.set(Coord::new(4, 20), Some(BlockColor::Red)));
    assert!(!board.is_row_completed(19));

    fill_row(&mut board, 19);
    assert_eq!(board.remove_completed_rows(), 1);
    // Playfield export never includes the gutter
    assert!(board.color_grid().iter().flatten().all(|&c| c == -1));
}

#[test]
fn test_color_grid_codes() {
    let mut board = Board::new();
    board.set(Coord::new(0, 0), Some(BlockColor::Red));
    board.set(Coord::new(9, 19), Some(BlockColor::Purple));
    board.set(Coord::new(4, 10), Some(BlockColor::BlueLight));

    let grid = board.color_grid();
    assert_eq!(grid[0][0], 0);
    assert_eq!(grid[19][9], 6);
    assert_eq!(grid[10][4], 4);
    assert_eq!(grid[10][5], -1);
}

#[test]
fn test_empty_resets_board() {
    let mut board = Board::new();
    fill_row(&mut board, 7);
    board.empty();
    assert_eq!(board, Board::new());
}
