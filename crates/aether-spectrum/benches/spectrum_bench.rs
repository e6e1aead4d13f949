// ─────────────────────────────────────────────────────────────────────
// Aether — Spectrum Benchmarks
// ─────────────────────────────────────────────────────────────────────

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aether_dynamics::{EngineSeed, SpectralDelayMap};
use aether_spectrum::linalg::qr_in_place;
use aether_spectrum::{estimate_ensemble, LyapunovEstimator};
use aether_types::{SpectralParams, SpectrumParams};

fn bench_qr(c: &mut Criterion) {
    let n = 13;
    let base: Vec<f64> = (0..n * n)
        .map(|i| ((i as f64) * 0.61).cos() + if i % (n + 1) == 0 { 3.0 } else { 0.0 })
        .collect();
    let mut r = vec![0.0; n];
    c.bench_function("mgs_qr_13x13", |b| {
        b.iter(|| {
            let mut a = base.clone();
            qr_in_place(black_box(&mut a), n, &mut r);
        })
    });
}

fn bench_estimate(c: &mut Criterion) {
    let map = SpectralDelayMap::new(SpectralParams::default()).unwrap();
    let mut est = LyapunovEstimator::new(&map, SpectrumParams::new(500, 100)).unwrap();
    let seed = EngineSeed::from(42);
    c.bench_function("lyapunov_500_steps", |b| {
        b.iter(|| est.estimate_exponents(black_box(&seed), None).unwrap())
    });
}

fn bench_ensemble(c: &mut Criterion) {
    let map = SpectralDelayMap::new(SpectralParams::default()).unwrap();
    let params = SpectrumParams::new(300, 100);
    let seeds: Vec<EngineSeed> = (1..=8u64).map(EngineSeed::from).collect();
    c.bench_function("ensemble_8x300", |b| {
        b.iter(|| estimate_ensemble(&map, &params, black_box(&seeds), None).unwrap())
    });
}

criterion_group!(benches, bench_qr, bench_estimate, bench_ensemble);
criterion_main!(benches);
