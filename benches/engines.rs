use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use em_radiation::fields::{compute_field_snapshot, FieldParams};
use em_radiation::synchrotron::{compute_spectrum, SpectrumParams};

fn bench_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("synchrotron_spectrum");
    group.sample_size(10);
    for lg_res in [1.0, 1.5, 2.0] {
        let params = SpectrumParams { lg_integration_resolution: lg_res, ..SpectrumParams::default() };
        group.bench_with_input(BenchmarkId::new("lg_integration_resolution", lg_res), &params, |b, p| {
            b.iter(|| compute_spectrum(p))
        });
    }
    group.finish();
}

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("retarded_field");
    group.sample_size(10);
    for lg_gamma in [-1.0, 1.0, 2.0] {
        let params = FieldParams { time_index: 37, lg_gamma, ..FieldParams::default() };
        group.bench_with_input(BenchmarkId::new("lg_gamma", lg_gamma), &params, |b, p| {
            b.iter(|| compute_field_snapshot(p))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_spectrum, bench_field);
criterion_main!(benches);
