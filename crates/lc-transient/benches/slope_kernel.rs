//! Benchmarks for the per-bin slope kernel and full detector screens

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lc_core::scalar_sequential;
use lc_series::PhotonSeries;
use lc_transient::{EclipseDetector, FlareDetector, SlopeKernel, TransientDetector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn generate_series(len: usize) -> PhotonSeries {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    PhotonSeries::from_counts((0..len).map(|_| rng.gen_range(0..=12)).collect())
}

fn bench_slopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("slope_kernel");

    for &len in &[10_000, 100_000, 1_000_000] {
        let series = generate_series(len);
        let x = series.time_array().to_vec();
        let y = series.cumulative_counts_f64();

        for &binsize in &[5, 300] {
            let kernel = SlopeKernel::new(scalar_sequential(), binsize);
            group.bench_with_input(
                BenchmarkId::new(format!("sequential_bin{binsize}"), len),
                &(&x, &y),
                |b, (x, y)| b.iter(|| black_box(kernel.slopes(x, y))),
            );

            #[cfg(feature = "parallel")]
            {
                let kernel = SlopeKernel::new(lc_core::scalar_parallel(), binsize);
                group.bench_with_input(
                    BenchmarkId::new(format!("parallel_bin{binsize}"), len),
                    &(&x, &y),
                    |b, (x, y)| b.iter(|| black_box(kernel.slopes(x, y))),
                );
            }
        }
    }

    group.finish();
}

fn bench_detectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("detectors");
    let series = generate_series(100_000);

    let flare = FlareDetector::with_defaults();
    group.bench_function("flare_100k", |b| b.iter(|| black_box(flare.detect(&series))));

    let eclipse = EclipseDetector::with_defaults();
    group.bench_function("eclipse_100k", |b| {
        b.iter(|| black_box(eclipse.detect(&series)))
    });

    group.finish();
}

criterion_group!(benches, bench_slopes, bench_detectors);
criterion_main!(benches);
