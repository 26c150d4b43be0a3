use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gioco::core::{Board, Engine, EngineConfig, GameSession, HighScoreLedger};
use gioco::types::{Color, GameAction, PieceKind, TICK_MS};

const GRAY: Color = Color::new(0x808080);

fn bench_session_tick(c: &mut Criterion) {
    let mut session = GameSession::new(EngineConfig::seeded(12345), HighScoreLedger::new())
        .unwrap();
    session.apply_action(GameAction::Start);

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if !session.tick(black_box(TICK_MS)) && session.engine().is_game_over() {
                session.restart();
                session.apply_action(GameAction::Start);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            for y in 16..20 {
                board.fill_row(y, GRAY);
            }
            black_box(board.clear_full_lines());
        })
    });
}

fn bench_spawn_next(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::seeded(12345)).unwrap();

    c.bench_function("spawn_next", |b| {
        b.iter(|| {
            black_box(engine.spawn_next());
        })
    });
}

fn bench_attempt_move(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::seeded(12345)).unwrap();
    engine.spawn(PieceKind::T);
    let mut dx = 1;

    c.bench_function("attempt_move", |b| {
        b.iter(|| {
            if !engine.attempt_move(black_box(dx), 0) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::seeded(12345)).unwrap();
    engine.spawn(PieceKind::T);
    engine.attempt_move(0, 5);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(engine.rotate());
        })
    });
}

criterion_group!(
    benches,
    bench_session_tick,
    bench_line_clear,
    bench_spawn_next,
    bench_attempt_move,
    bench_rotate
);
criterion_main!(benches);
