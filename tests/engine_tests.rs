//! Engine tests - spawning, movement, locking, line clears, game over

use blockfall::game::{Cell, ConfigError, Engine, Piece, PieceKind};
use ratatui::style::Color;

fn engine() -> Engine {
    Engine::new(16, 12).unwrap()
}

fn piece_at(kind: PieceKind, row: i32, col: i32) -> Piece {
    let mut piece = Piece::new(kind, Color::Red);
    piece.row = row;
    piece.col = col;
    piece
}

fn fill_row_locked(eng: &mut Engine, row: i32, skip: &[i32]) {
    for col in 0..12 {
        if !skip.contains(&col) {
            eng.grid.set(row, col, Cell::Locked(Color::Blue));
        }
    }
}

#[test]
fn test_new_game_rejects_zero_dimensions() {
    assert_eq!(Engine::new(0, 12).unwrap_err(), ConfigError { rows: 0, cols: 12 });
    assert_eq!(Engine::new(16, 0).unwrap_err(), ConfigError { rows: 16, cols: 0 });

    let msg = Engine::new(0, 0).unwrap_err().to_string();
    assert!(msg.contains("invalid playfield size"));
}

#[test]
fn test_spawn_priming_contract() {
    let mut eng = engine();

    // First spawn finds an empty queue: no piece in play yet
    eng.spawn();
    assert!(eng.current.is_none());
    assert_eq!(eng.queue.len(), 1);

    // Second spawn promotes the queued piece to the spawn anchor
    eng.spawn();
    let current = eng.current.as_ref().unwrap();
    assert_eq!((current.row, current.col), (-1, 6));
    assert_eq!(eng.queue.len(), 1);
}

#[test]
fn test_left_move_rejected_at_wall() {
    let mut eng = engine();
    // O piece whose leftmost cells sit in column 0
    eng.current = Some(piece_at(PieceKind::O, 10, 1));

    eng.move_piece(-1, 0);

    let current = eng.current.as_ref().unwrap();
    assert_eq!((current.row, current.col), (10, 1));
    // No side effects on rejection
    for row in 0..16 {
        for col in 0..12 {
            assert_eq!(eng.get_cell(row, col), Cell::Empty);
        }
    }
}

#[test]
fn test_horizontal_move_rewrites_footprint() {
    let mut eng = engine();
    eng.current = Some(piece_at(PieceKind::O, 10, 5));

    eng.move_piece(-1, 0);

    let current = eng.current.as_ref().unwrap();
    assert_eq!((current.row, current.col), (10, 4));
    for (row, col) in [(9, 3), (9, 4), (10, 3), (10, 4)] {
        assert_eq!(eng.get_cell(row, col), Cell::Active(Color::Red));
    }
    // Vacated cells are cleared
    assert_eq!(eng.get_cell(9, 5), Cell::Empty);
    assert_eq!(eng.get_cell(10, 5), Cell::Empty);
}

#[test]
fn test_piece_entering_from_above_can_shift() {
    let mut eng = engine();
    // Spawn anchor: every cell is still above row 0
    eng.current = Some(piece_at(PieceKind::O, -1, 6));

    eng.move_piece(-1, 0);

    assert_eq!(eng.current.as_ref().unwrap().col, 5);
}

#[test]
fn test_lock_and_spawn_promotes_queue_front() {
    let mut eng = engine();
    eng.queue.push_back(Piece::new(PieceKind::T, Color::Magenta));
    eng.current = Some(piece_at(PieceKind::O, 14, 5));

    // One step down still fits: the piece stays active on the bottom row
    eng.move_piece(0, 1);
    let current = eng.current.as_ref().unwrap();
    assert_eq!(current.row, 15);
    assert_eq!(eng.get_cell(15, 4), Cell::Active(Color::Red));

    // The next step hits the floor: lock, then spawn the queued piece
    eng.move_piece(0, 1);
    for (row, col) in [(14, 4), (14, 5), (15, 4), (15, 5)] {
        assert_eq!(eng.get_cell(row, col), Cell::Locked(Color::Red));
    }
    let current = eng.current.as_ref().unwrap();
    assert_eq!(current.kind, PieceKind::T);
    assert_eq!((current.row, current.col), (-1, 6));
    assert_eq!(eng.queue.len(), 1);
}

#[test]
fn test_single_row_clear_scores_one_and_shifts() {
    let mut eng = engine();
    fill_row_locked(&mut eng, 15, &[4, 5]);
    eng.grid.set(10, 0, Cell::Locked(Color::Cyan));
    // O piece falls into the two-cell gap
    eng.current = Some(piece_at(PieceKind::O, 15, 5));

    eng.move_piece(0, 1);

    assert_eq!(eng.score(), 1);
    // The piece's upper half shifted down into the cleared row
    assert_eq!(eng.get_cell(15, 4), Cell::Locked(Color::Red));
    assert_eq!(eng.get_cell(15, 5), Cell::Locked(Color::Red));
    assert_eq!(eng.get_cell(15, 0), Cell::Empty);
    // Marker above dropped by exactly one row
    assert_eq!(eng.get_cell(11, 0), Cell::Locked(Color::Cyan));
    assert_eq!(eng.get_cell(10, 0), Cell::Empty);
    // Fresh empty row at the top
    for col in 0..12 {
        assert_eq!(eng.get_cell(0, col), Cell::Empty);
    }
}

#[test]
fn test_three_simultaneous_rows_score_three() {
    let mut eng = engine();
    fill_row_locked(&mut eng, 13, &[]);
    fill_row_locked(&mut eng, 14, &[]);
    fill_row_locked(&mut eng, 15, &[]);
    // Lands on top of the stack; its lock triggers one evaluation pass
    eng.current = Some(piece_at(PieceKind::O, 12, 5));

    eng.move_piece(0, 1);

    assert_eq!(eng.score(), 3);
    // The locking piece dropped by the three cleared rows
    for (row, col) in [(14, 4), (14, 5), (15, 4), (15, 5)] {
        assert_eq!(eng.get_cell(row, col), Cell::Locked(Color::Red));
    }
    // Everything else is empty again
    for row in 0..16 {
        for col in 0..12 {
            if !matches!((row, col), (14, 4) | (14, 5) | (15, 4) | (15, 5)) {
                assert_eq!(eng.get_cell(row, col), Cell::Empty);
            }
        }
    }
}

#[test]
fn test_active_cells_never_complete_a_row() {
    let mut eng = engine();
    fill_row_locked(&mut eng, 15, &[4]);
    // Vertical I aimed at the single gap
    let mut piece = piece_at(PieceKind::I, 12, 3);
    piece.apply_rotation(); // occupies column anchor+1, rows anchor-1..=anchor+2
    eng.current = Some(piece);

    // The piece slides into the gap: the row looks full but is not cleared
    eng.move_piece(0, 1);
    assert_eq!(eng.score(), 0);
    assert_eq!(eng.get_cell(15, 4), Cell::Active(Color::Red));

    // Only locking completes the row
    eng.move_piece(0, 1);
    assert_eq!(eng.score(), 1);
    assert_eq!(eng.get_cell(15, 4), Cell::Locked(Color::Red));
    assert_eq!(eng.get_cell(15, 0), Cell::Empty);
}

#[test]
fn test_rotation_rejected_at_bottom_edge() {
    let mut eng = engine();
    // Horizontal I near the floor: the vertical form would leave the grid
    eng.current = Some(piece_at(PieceKind::I, 15, 8));
    let before = eng.current.clone().unwrap();

    eng.rotate();

    assert_eq!(eng.current.as_ref().unwrap(), &before);
}

#[test]
fn test_rotation_rejected_into_locked_cell() {
    let mut eng = engine();
    eng.grid.set(10, 6, Cell::Locked(Color::Blue));
    eng.current = Some(piece_at(PieceKind::I, 8, 5));
    let before = eng.current.clone().unwrap();

    eng.rotate();

    assert_eq!(eng.current.as_ref().unwrap(), &before);
}

#[test]
fn test_rotation_rejected_while_entering_from_above() {
    let mut eng = engine();
    eng.current = Some(piece_at(PieceKind::I, -1, 6));
    let before = eng.current.clone().unwrap();

    eng.rotate();

    assert_eq!(eng.current.as_ref().unwrap(), &before);
}

#[test]
fn test_rotation_applies_whole_transform() {
    let mut eng = engine();
    eng.current = Some(piece_at(PieceKind::I, 8, 5));

    eng.rotate();

    let current = eng.current.as_ref().unwrap();
    assert_eq!(current.cells, [(-1, 1), (0, 1), (1, 1), (2, 1)]);
    assert_eq!((current.row, current.col), (8, 5));
    for row in 7..=10 {
        assert_eq!(eng.get_cell(row as usize, 6), Cell::Active(Color::Red));
    }
}

#[test]
fn test_game_over_when_lock_reaches_top_row() {
    let mut eng = engine();
    // Stack high enough that the next lock leaves cells in row 0
    eng.grid.set(2, 4, Cell::Locked(Color::Blue));
    eng.current = Some(piece_at(PieceKind::O, 1, 5));

    eng.move_piece(0, 1);

    assert!(eng.is_game_over());
    assert!(eng.current.is_none());
    // No spawn after the terminal lock
    assert!(eng.queue.is_empty());
    assert_eq!(eng.get_cell(0, 4), Cell::Locked(Color::Red));
}

#[test]
#[should_panic(expected = "no falling piece")]
fn test_move_without_piece_is_misuse() {
    let mut eng = engine();
    eng.move_piece(0, 1);
}

#[test]
#[should_panic(expected = "no falling piece")]
fn test_rotate_without_piece_is_misuse() {
    let mut eng = engine();
    eng.rotate();
}

#[test]
#[should_panic(expected = "no falling piece")]
fn test_move_after_game_over_is_misuse() {
    let mut eng = engine();
    eng.grid.set(2, 4, Cell::Locked(Color::Blue));
    eng.current = Some(piece_at(PieceKind::O, 1, 5));
    eng.move_piece(0, 1);
    assert!(eng.is_game_over());

    eng.move_piece(-1, 0);
}
