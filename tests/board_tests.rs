//! Board tests - collision, locking and line clearing

use blockfall::core::{spawn_shape, Board, Shape};
use blockfall::types::{PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};

fn empty_board() -> Board {
    Board::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap()
}

fn full_row() -> &'static str {
    "zzzzzzzzzz"
}

fn board_with(rows_from_top: &[(usize, &'static str)]) -> Board {
    let mut rows = vec![".........."; DEFAULT_HEIGHT as usize];
    for &(y, row) in rows_from_top {
        rows[y] = row;
    }
    Board::from_rows(&rows).unwrap()
}

fn occupied_rows(board: &Board) -> usize {
    (0..board.height() as usize)
        .filter(|&r| board.row(r).iter().any(|c| c.is_some()))
        .count()
}

#[test]
fn test_board_new_empty() {
    let board = empty_board();
    assert_eq!(board.width(), DEFAULT_WIDTH);
    assert_eq!(board.height(), DEFAULT_HEIGHT);
    assert_eq!(board.filled_count(), 0);
    assert_eq!(board.get(0, 0), Some(None));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = empty_board();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(DEFAULT_HEIGHT as i32, 0), None);
    assert_eq!(board.get(0, DEFAULT_WIDTH as i32), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = empty_board();
    assert!(board.set(10, 5, Some(PieceKind::T)));
    assert_eq!(board.get(10, 5), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(10, 5));
    assert!(board.set(10, 5, None));
    assert!(!board.is_occupied(10, 5));
    assert!(!board.set(-1, 0, Some(PieceKind::T)));
}

// ============== is_valid_position ==============

#[test]
fn test_valid_position_on_empty_board() {
    let board = empty_board();
    let t = spawn_shape(PieceKind::T);
    assert!(board.is_valid_position(&t, 0, 0));
    assert!(board.is_valid_position(&t, 18, 7));
}

#[test]
fn test_side_walls() {
    let board = empty_board();
    let t = spawn_shape(PieceKind::T);
    assert!(!board.is_valid_position(&t, 5, -1));
    assert!(!board.is_valid_position(&t, 5, 8));
}

#[test]
fn test_floor() {
    let board = empty_board();
    let t = spawn_shape(PieceKind::T);
    // Two rows tall: anchor 18 is the lowest valid row.
    assert!(board.is_valid_position(&t, 18, 3));
    assert!(!board.is_valid_position(&t, 19, 3));
}

#[test]
fn test_empty_shape_cells_ignore_obstacles() {
    // T bottom row is ".#.", so the corners under it may be filled.
    let board = board_with(&[(1, "s.s.......")]);
    let t = spawn_shape(PieceKind::T);
    assert!(board.is_valid_position(&t, 0, 0));
    assert!(!board.is_valid_position(&t, 0, 1));
}

#[test]
fn test_above_board_is_exempt_from_floor_and_occupancy_only() {
    let board = board_with(&[(0, full_row())]);
    let i_vertical = spawn_shape(PieceKind::I).rotated_cw();
    // Entirely above row 0: allowed even though row 0 is full.
    assert!(board.is_valid_position(&i_vertical, -4, 0));
    // Reaching into the full row collides.
    assert!(!board.is_valid_position(&i_vertical, -3, 0));
    // Horizontal bounds still apply above the board.
    assert!(!board.is_valid_position(&i_vertical, -4, -1));
    assert!(!board.is_valid_position(&i_vertical, -4, 10));
}

#[test]
fn test_valid_iff_no_overlap_for_every_anchor() {
    let board = board_with(&[(19, "zz..zz..zz"), (18, "....s.....")]);
    let o = spawn_shape(PieceKind::O);
    for row in -2..=19 {
        for col in -2..=10 {
            let mut expected = true;
            for (dr, dc) in o.occupied() {
                let (r, c) = (row + dr, col + dc);
                if !(0..10).contains(&c) || r >= 20 || (r >= 0 && board.is_occupied(r, c)) {
                    expected = false;
                }
            }
            assert_eq!(board.is_valid_position(&o, row, col), expected, "({row}, {col})");
        }
    }
}

// ============== lock_piece ==============

#[test]
fn test_lock_piece_writes_exactly_piece_cells() {
    let mut board = board_with(&[(19, "j.........")]);
    let before = board.clone();
    let s = spawn_shape(PieceKind::S);
    board.lock_piece(&s, PieceKind::S, 10, 4);

    let piece_cells: Vec<(i32, i32)> = s.occupied().map(|(r, c)| (10 + r, 4 + c)).collect();
    for row in 0..20 {
        for col in 0..10 {
            if piece_cells.contains(&(row, col)) {
                assert_eq!(board.get(row, col), Some(Some(PieceKind::S)));
            } else {
                assert_eq!(board.get(row, col), before.get(row, col));
            }
        }
    }
}

#[test]
fn test_lock_piece_drops_out_of_bounds_cells() {
    let mut board = empty_board();
    let i_vertical = spawn_shape(PieceKind::I).rotated_cw();
    board.lock_piece(&i_vertical, PieceKind::I, -2, 0);
    assert_eq!(board.filled_count(), 2);
    assert!(board.is_occupied(0, 0));
    assert!(board.is_occupied(1, 0));
}

#[test]
fn test_lock_custom_shape() {
    let mut board = empty_board();
    let dot = Shape::new(PieceKind::L, &[&[false, true]]).unwrap();
    board.lock_piece(&dot, PieceKind::L, 3, 3);
    assert_eq!(board.filled_count(), 1);
    assert!(board.is_occupied(3, 4));
}

// ============== clear_lines ==============

#[test]
fn test_clear_lines_no_full_rows() {
    let mut board = board_with(&[(19, "zzzzzzzzz."), (10, "..t.......")]);
    let before = board.clone();
    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_single_line_shifts_rows_down() {
    let mut board = board_with(&[(19, full_row()), (18, "o........."), (5, "...l......")]);
    assert_eq!(board.clear_lines(), 1);
    assert_eq!(board.get(19, 0), Some(Some(PieceKind::O)));
    assert_eq!(board.get(6, 3), Some(Some(PieceKind::L)));
    assert!(board.row(0).iter().all(|c| c.is_none()));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_two_non_adjacent_lines() {
    let mut board = board_with(&[
        (19, full_row()),
        (18, "i........."),
        (17, full_row()),
        (16, ".j........"),
    ]);
    let before_rows = occupied_rows(&board);
    assert_eq!(board.clear_lines(), 2);
    assert_eq!(occupied_rows(&board), before_rows - 2);
    // Relative order preserved: j above i.
    assert_eq!(board.get(19, 0), Some(Some(PieceKind::I)));
    assert_eq!(board.get(18, 1), Some(Some(PieceKind::J)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_four_lines_scattered() {
    let mut board = board_with(&[
        (19, full_row()),
        (18, "s........."),
        (16, full_row()),
        (15, full_row()),
        (14, "..t......."),
        (10, full_row()),
        (9, "........zz"),
    ]);
    assert_eq!(board.clear_lines(), 4);
    assert_eq!(board.get(19, 0), Some(Some(PieceKind::S)));
    // Row 17 was empty and lands on 18.
    assert!(board.row(18).iter().all(|c| c.is_none()));
    assert_eq!(board.get(17, 2), Some(Some(PieceKind::T)));
    assert_eq!(board.get(13, 8), Some(Some(PieceKind::Z)));
    assert_eq!(board.filled_count(), 4);
    for row in 0..4 {
        assert!(board.row(row).iter().all(|c| c.is_none()));
    }
}

#[test]
fn test_clear_four_adjacent_lines() {
    let mut board = board_with(&[
        (19, full_row()),
        (18, full_row()),
        (17, full_row()),
        (16, full_row()),
        (15, "o.o.o....."),
    ]);
    assert_eq!(board.clear_lines(), 4);
    assert_eq!(board.filled_count(), 3);
    assert!(board.is_occupied(19, 4));
}

#[test]
fn test_single_gap_row_clears_after_lock() {
    let mut board = board_with(&[(19, "zzzzz.zzzz"), (18, ".....l....")]);
    // Row 18 covers the gap from above, so only a one-cell shape reaches it.
    let dot = Shape::new(PieceKind::I, &[&[true]]).unwrap();
    assert!(!board.is_valid_position(&dot, 18, 5));
    assert!(board.is_valid_position(&dot, 19, 5));
    board.lock_piece(&dot, PieceKind::I, 19, 5);

    assert_eq!(board.clear_lines(), 1);
    // Everything shifted down by one, new empty top row.
    assert_eq!(board.get(19, 5), Some(Some(PieceKind::L)));
    assert_eq!(board.filled_count(), 1);
    assert!(board.row(0).iter().all(|c| c.is_none()));
}
