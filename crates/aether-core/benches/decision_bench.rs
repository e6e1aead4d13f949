// ─────────────────────────────────────────────────────────────────────
// Aether — Decision Benchmarks
// ─────────────────────────────────────────────────────────────────────

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aether_core::{DecisionEngine, DecisionHistogram, LayerDispatcher};
use aether_dynamics::EngineSeed;
use aether_types::{DecisionEngineConfig, SpectralParams};

fn bench_decide_clamped(c: &mut Criterion) {
    let mut engine = DecisionEngine::from_config(
        DecisionEngineConfig::default(),
        Some(EngineSeed::Integers(vec![1, 2, 3])),
    )
    .unwrap();
    c.bench_function("decide_clamped", |b| b.iter(|| black_box(engine.decide().unwrap())));
}

fn bench_decide_spectral(c: &mut Criterion) {
    let mut engine = DecisionEngine::from_config(
        DecisionEngineConfig::spectral(SpectralParams::default()),
        Some(EngineSeed::from(42)),
    )
    .unwrap();
    c.bench_function("decide_spectral", |b| b.iter(|| black_box(engine.decide().unwrap())));
}

fn bench_decide_and_dispatch(c: &mut Criterion) {
    let mut engine = DecisionEngine::from_config(
        DecisionEngineConfig::default(),
        Some(EngineSeed::Integers(vec![1, 2, 3])),
    )
    .unwrap();
    let mut dispatcher = LayerDispatcher::rotating();
    let mut hist = DecisionHistogram::new(4).unwrap();
    c.bench_function("decide_dispatch_record", |b| {
        b.iter(|| {
            let d = engine.decide().unwrap();
            hist.record(d).unwrap();
            black_box(dispatcher.dispatch(d).unwrap().len())
        })
    });
}

criterion_group!(
    benches,
    bench_decide_clamped,
    bench_decide_spectral,
    bench_decide_and_dispatch
);
criterion_main!(benches);
