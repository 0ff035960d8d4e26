use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_memory::core::{Board, GameSnapshot, GameState, MemoryStore, Session, SimpleRng};
use tui_memory::term::{FrameBuffer, GameView, Viewport};
use tui_memory::types::{Difficulty, GameAction, SYMBOL_POOL, TICK_MS};

fn bench_generate(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut next_id = 0;

    c.bench_function("generate_expert_board", |b| {
        b.iter(|| Board::generate(black_box(8), &SYMBOL_POOL, &mut rng, &mut next_id))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(Difficulty::Expert, 12345, MemoryStore::new()).unwrap();
    session.select(0);

    c.bench_function("session_tick_50ms", |b| {
        b.iter(|| session.tick(black_box(TICK_MS)))
    });
}

fn bench_playthrough(c: &mut Criterion) {
    c.bench_function("expert_perfect_game", |b| {
        b.iter(|| {
            let mut session =
                Session::new(Difficulty::Expert, 777, MemoryStore::new()).unwrap();
            let tiles = session.board().tiles().to_vec();
            for i in 0..tiles.len() {
                if session.board().tiles()[i].matched {
                    continue;
                }
                let partner = (i + 1..tiles.len())
                    .find(|&j| tiles[j].symbol == tiles[i].symbol)
                    .unwrap();
                session.select(i);
                session.select(partner);
            }
            black_box(session.finished())
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let session = Session::new(Difficulty::Expert, 9, MemoryStore::new()).unwrap();
    let mut game = GameState::new(session);
    game.apply_action(GameAction::Select).unwrap();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    c.bench_function("render_expert_frame", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(100, 30), &mut fb);
            black_box(fb.cells().len())
        })
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_tick,
    bench_playthrough,
    bench_render
);
criterion_main!(benches);
