use gioco::core::{EngineConfig, GameSession, HighScoreLedger, SessionSnapshot};
use gioco::term::{GameView, Rgb, Viewport};
use gioco::types::{Color, GameAction, PieceKind};

fn session(seed: u64) -> GameSession {
    GameSession::new(EngineConfig::seeded(seed), HighScoreLedger::new()).unwrap()
}

fn running_snapshot() -> SessionSnapshot {
    let mut s = session(1);
    s.apply_action(GameAction::Start);
    s.snapshot()
}

fn screen_contains(fb: &gioco::term::FrameBuffer, needle: &str) -> bool {
    (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
}

#[test]
fn term_view_renders_border_corners() {
    let snap = running_snapshot();
    let view = GameView::default();

    // 15 cells * 2 columns + border = 32 wide, 20 rows + border = 22 high.
    // Too narrow for the side panel, so the board is centered alone.
    let vp = Viewport::new(32, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(31, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(31, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut s = session(1);
    s.apply_action(GameAction::Start);
    let red = Color::new(0xff0000);
    s.engine_mut().board_mut().set(0, 19, Some(red));
    let snap = s.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(32, 22));
    let left = fb.get(1, 20).unwrap();
    let right = fb.get(2, 20).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(right.ch, '█');
    assert_eq!(left.style.fg, Rgb::new(255, 0, 0));
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_in_its_color() {
    let mut s = session(1);
    s.apply_action(GameAction::Start);
    s.engine_mut().spawn(PieceKind::O);
    let snap = s.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(32, 22));
    // O at anchor (6, 0): board column 6 starts at terminal column 1 + 12.
    let cell = fb.get(13, 1).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, Rgb::from(PieceKind::O.color()));
}

#[test]
fn term_view_side_panel_shows_stats() {
    let mut s = session(1);
    s.apply_action(GameAction::Start);
    for _ in 0..3 {
        s.apply_action(GameAction::SoftDrop);
    }
    for _ in 0..(65_000 / 16) {
        s.tick(16);
        if s.phase() != gioco::core::Phase::Running {
            break;
        }
    }
    let snap = s.snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(100, 30));

    for label in ["SCORE", "LEVEL", "LINES", "TIME", "BUBBLES", "HIGH SCORES"] {
        assert!(screen_contains(&fb, label), "missing {label}");
    }
    let (m, sec) = snap.clock();
    assert!(screen_contains(&fb, &format!("{m}:{sec:02}")));
}

#[test]
fn term_view_overlays_follow_phase() {
    let view = GameView::default();
    let vp = Viewport::new(100, 30);

    let mut s = session(4);
    assert!(screen_contains(&view.render(&s.snapshot(), vp), "PRESS ENTER"));

    s.apply_action(GameAction::Start);
    let fb = view.render(&s.snapshot(), vp);
    assert!(!screen_contains(&fb, "PRESS ENTER"));
    assert!(!screen_contains(&fb, "PAUSED"));

    s.apply_action(GameAction::Pause);
    assert!(screen_contains(&view.render(&s.snapshot(), vp), "PAUSED"));

    s.apply_action(GameAction::Pause);
    for y in 2..20 {
        let board = s.engine_mut().board_mut();
        board.fill_row(y, Color::new(0x808080));
        board.set(0, y as i32, None);
    }
    s.engine_mut().spawn(PieceKind::O);
    s.tick(1000);
    assert_eq!(s.phase(), gioco::core::Phase::GameOver);
    assert!(screen_contains(&view.render(&s.snapshot(), vp), "GAME OVER"));
}

#[test]
fn term_view_handles_custom_board_size() {
    let mut s = GameSession::new(
        EngineConfig::seeded(2).with_size(8, 10),
        HighScoreLedger::new(),
    )
    .unwrap();
    s.apply_action(GameAction::Start);
    let fb = GameView::default().render(&s.snapshot(), Viewport::new(18, 12));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 11).unwrap().ch, '┘');
}
