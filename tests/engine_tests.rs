//! Engine tests - movement, rotation, merge, line clears and game-over

use std::cell::Cell as Counter;
use std::rc::Rc;

use gioco::core::{catalog_shape, ActivePiece, Collision, Engine, EngineConfig, Shape};
use gioco::types::{Color, PieceKind};

const GRAY: Color = Color::new(0x808080);

fn engine() -> Engine {
    Engine::new(EngineConfig::seeded(2024)).unwrap()
}

fn count_game_overs(engine: &mut Engine) -> Rc<Counter<u32>> {
    let count = Rc::new(Counter::new(0));
    let seen = Rc::clone(&count);
    engine.on_game_over(move || seen.set(seen.get() + 1));
    count
}

#[test]
fn test_o_piece_falls_eighteen_rows() {
    let mut engine = engine();
    assert!(engine.spawn(PieceKind::O));
    assert_eq!((engine.active().x, engine.active().y), (6, 0));

    for step in 1..=18 {
        assert!(engine.attempt_move(0, 1), "step {step}");
    }
    assert_eq!(engine.active().y, 18);
    assert!(!engine.attempt_move(0, 1));
    assert_eq!(engine.active().y, 18);
    assert!(!engine.is_game_over());
}

#[test]
fn test_blocked_move_has_no_side_effect() {
    let mut engine = engine();
    engine.spawn(PieceKind::T);
    engine.board_mut().set(5, 1, Some(GRAY));
    let before = *engine.active();
    let board = engine.board().clone();

    assert!(!engine.attempt_move(-1, 0));
    assert_eq!(*engine.active(), before);
    assert_eq!(*engine.board(), board);
}

#[test]
fn test_fill_row_then_merge_clears_it() {
    let mut engine = engine();
    // Bottom row full except the column the special piece will drop into.
    engine.board_mut().fill_row(19, GRAY);
    engine.board_mut().set(7, 19, None);

    assert!(engine.spawn(PieceKind::Special));
    assert_eq!(engine.active().x, 7);
    while engine.attempt_move(0, 1) {}
    assert_eq!(engine.active().y, 19);

    assert!(engine.merge_active_into_board());
    assert_eq!(engine.clear_full_lines(), 1);
    assert!(engine.board().row(0).unwrap().iter().all(|c| c.is_none()));
    assert!(engine.board().is_clear());
}

#[test]
fn test_merge_writes_piece_color() {
    let mut engine = engine();
    engine.spawn(PieceKind::S);
    while engine.attempt_move(0, 1) {}
    assert!(engine.merge_active_into_board());

    let green = PieceKind::S.color();
    let filled: Vec<_> = engine.active().board_cells().collect();
    assert_eq!(filled.len(), 4);
    for (x, y) in filled {
        assert_eq!(engine.board().get(x, y), Some(Some(green)));
    }
}

#[test]
fn test_spawn_blocked_sets_game_over_without_touching_board() {
    let mut engine = engine();
    let count = count_game_overs(&mut engine);
    engine.board_mut().fill_row(0, GRAY);
    engine.board_mut().fill_row(1, GRAY);
    let board = engine.board().clone();

    assert!(!engine.spawn_next());
    assert!(engine.is_game_over());
    assert_eq!(*engine.board(), board);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_game_over_is_sticky_until_cleared() {
    let mut engine = engine();
    let count = count_game_overs(&mut engine);
    engine.board_mut().fill_row(0, GRAY);
    engine.board_mut().fill_row(1, GRAY);
    engine.spawn_next();

    engine.reset_board();
    assert!(engine.board().is_clear());
    assert!(engine.is_game_over());

    engine.clear_game_over();
    assert!(!engine.is_game_over());
    assert!(engine.spawn_next());
    assert_eq!(count.get(), 1);
}

#[test]
fn test_rotation_is_atomic_when_blocked() {
    let mut engine = engine();
    engine.spawn(PieceKind::L);
    engine.attempt_move(0, 6);
    let before = *engine.active();

    // Block every cell the rotated piece could occupy but the current one does not.
    let rotated = before.shape.rotated_cw();
    let current: Vec<_> = before.board_cells().collect();
    for (r, c) in rotated.cells() {
        let (x, y) = (before.x + c as i32, before.y + r as i32);
        if !current.contains(&(x, y)) {
            engine.board_mut().set(x, y, Some(GRAY));
        }
    }

    assert!(!engine.rotate());
    assert_eq!(*engine.active(), before);
    assert!(!engine.is_game_over());
}

#[test]
fn test_rotate_o_piece_is_stable() {
    let mut engine = engine();
    engine.spawn(PieceKind::O);
    engine.attempt_move(0, 3);
    let before = *engine.active();
    assert!(engine.rotate());
    assert_eq!(*engine.active(), before);
}

#[test]
fn test_rotation_past_right_wall_resets_board() {
    let mut engine = engine();
    let count = count_game_overs(&mut engine);
    engine.spawn(PieceKind::I);
    engine.attempt_move(0, 8);
    assert!(engine.rotate());
    // Vertical bar in matrix column 2: slide until the bar touches the right wall.
    while engine.attempt_move(1, 0) {}
    assert_eq!(engine.active().x + 2, 14);
    engine.board_mut().set(0, 19, Some(GRAY));

    assert!(!engine.rotate());
    assert!(engine.is_game_over());
    assert!(engine.board().is_clear());
    assert_eq!(count.get(), 1);
}

/// A horizontal 1x3 bar placed at `(x, y)`.
fn place_bar(engine: &mut Engine, x: i32, y: i32) {
    let mut piece = ActivePiece::spawn(PieceKind::Special, 15).at(x, y);
    piece.shape = Shape::from_rows(&[[1u8, 1, 1]]).unwrap();
    engine.set_active(piece);
}

#[test]
fn test_rotation_recenters_non_square_shape() {
    let mut engine = engine();
    place_bar(&mut engine, 5, 5);

    assert!(engine.rotate());
    let piece = *engine.active();
    assert_eq!((piece.x, piece.y), (6, 4));
    assert_eq!((piece.shape.width(), piece.shape.height()), (1, 3));
    let cells: Vec<_> = piece.board_cells().collect();
    assert_eq!(cells, vec![(6, 4), (6, 5), (6, 6)]);

    assert!(engine.rotate());
    assert_eq!((engine.active().x, engine.active().y), (5, 5));
    assert_eq!(engine.active().shape.height(), 1);
}

#[test]
fn test_rotation_into_ceiling_ends_game_but_keeps_board() {
    let mut engine = engine();
    let count = count_game_overs(&mut engine);
    engine.board_mut().set(0, 19, Some(GRAY));
    place_bar(&mut engine, 5, 0);
    let before = *engine.active();

    assert!(!engine.rotate());
    assert!(engine.is_game_over());
    assert_eq!(count.get(), 1);
    assert_eq!(*engine.active(), before);
    assert_eq!(engine.board().filled_count(), 1);
    assert_eq!(engine.board().get(0, 19), Some(Some(GRAY)));
}

#[test]
fn test_collision_reports_top_boundary() {
    let engine = engine();
    let t = catalog_shape(PieceKind::T);
    assert_eq!(engine.collision(&t, 5, -1), Some(Collision::Top));
    // Matrix row 0 of the I piece is empty, so the piece fits one row higher.
    let i = catalog_shape(PieceKind::I);
    assert_eq!(engine.collision(&i, 5, -1), None);
}

#[test]
fn test_merge_stops_at_first_cell_above_board() {
    let mut engine = engine();
    // Vertical I in column 2 with its top two cells above the board.
    let mut piece = ActivePiece::spawn(PieceKind::I, 15).at(4, -2);
    piece.shape = piece.shape.rotated_cw();
    engine.set_active(piece);

    assert!(!engine.merge_active_into_board());
    assert!(engine.is_game_over());
    assert!(engine.board().is_clear());
}

#[test]
fn test_seeded_engines_spawn_identical_sequences() {
    let mut a = engine();
    let mut b = engine();
    for _ in 0..50 {
        a.spawn_next();
        b.spawn_next();
        assert_eq!(a.active().kind, b.active().kind);
    }
}

#[test]
fn test_custom_board_size() {
    let mut engine = Engine::new(EngineConfig::seeded(1).with_size(8, 12)).unwrap();
    assert!(engine.spawn(PieceKind::O));
    assert_eq!(engine.active().x, 3);
    while engine.attempt_move(0, 1) {}
    assert_eq!(engine.active().y, 10);
}
