use criterion::{black_box, criterion_group, criterion_main, Criterion};

use life_tracker::{CounterKind, GameState, PlayerId, Timestamp, TrackerConfig};

fn table() -> GameState {
    GameState::new(TrackerConfig::new().with_player_count(6).with_seed(1)).unwrap()
}

fn bench_commander_damage(c: &mut Criterion) {
    c.bench_function("commander_damage_change", |b| {
        let mut state = table();
        let mut now = 0;
        b.iter(|| {
            now += 1;
            for defender in PlayerId::all(6) {
                let source = PlayerId::new((defender.0 + 1) % 6);
                let _ = state.change_commander_damage(defender, source, black_box(1), Timestamp(now));
            }
            state.advance(Timestamp(now));
        });
    });
}

fn bench_counters(c: &mut Criterion) {
    c.bench_function("counter_change", |b| {
        let mut state = table();
        let kinds = CounterKind::mana();
        b.iter(|| {
            for player in PlayerId::all(6) {
                for kind in &kinds {
                    let _ = state.change_counter(player, kind.clone(), black_box(1));
                }
            }
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = table();
    c.bench_function("snapshot_encode", |b| {
        b.iter(|| black_box(state.snapshot().encode()));
    });
}

criterion_group!(benches, bench_commander_damage, bench_counters, bench_snapshot);
criterion_main!(benches);
