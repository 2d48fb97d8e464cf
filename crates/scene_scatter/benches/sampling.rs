mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use scene_scatter::prelude::{
    filter_visible, sample_until_non_empty, Domain, PoissonDiskSampling, PositionSampling,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const RADII: [f32; 5] = [2.0, 1.5, 1.0, 0.5, 0.25];

fn sampling_poisson_benches(c: &mut Criterion) {
    let extent = Vec3::new(9.0, 7.0, 4.0);
    let mut group = c.benchmark_group("sampling/poisson_disk_3d");

    for &radius in &RADII {
        let strategy = PoissonDiskSampling::new(radius);
        let mut rng_est = StdRng::seed_from_u64(0xBEEFu64 ^ radius.to_bits() as u64);
        let expected = strategy.generate(extent.into(), &mut rng_est).len();
        group.throughput(common::elements_throughput(expected));

        let mut rng = StdRng::seed_from_u64(0xC0FFEEu64 ^ radius.to_bits() as u64);
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, _| {
            b.iter(|| {
                let pts = strategy.generate(extent.into(), &mut rng);
                black_box(pts.len());
            });
        });
    }

    group.finish();
}

fn sampling_rejection_threshold_benches(c: &mut Criterion) {
    let extent = Vec3::new(9.0, 7.0, 4.0);
    let mut group = c.benchmark_group("sampling/rejection_threshold");

    for &k in &[5usize, 15, 30, 60] {
        let strategy = PoissonDiskSampling::new(0.75).with_rejection_threshold(k);
        let mut rng = StdRng::seed_from_u64(0xA11CE ^ k as u64);
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, _| {
            b.iter(|| {
                let pts = strategy.generate(extent.into(), &mut rng);
                black_box(pts.len());
            });
        });
    }

    group.finish();
}

fn sampling_with_visibility_benches(c: &mut Criterion) {
    let domain = Domain::new(9.0, 7.0, 4.0).with_base_height(2.0);
    let camera = common::overhead_camera();
    let mut group = c.benchmark_group("sampling/sample_and_filter");

    for &radius in &[1.5f32, 0.5] {
        let strategy = PoissonDiskSampling::new(radius);
        let mut rng = StdRng::seed_from_u64(0xF00D ^ radius.to_bits() as u64);
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, _| {
            b.iter(|| {
                let sampled = sample_until_non_empty(&strategy, &domain, 8, &mut rng, &mut ())
                    .map(|s| s.points)
                    .unwrap_or_default();
                black_box(filter_visible(&sampled, &camera).len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_poisson_benches,
              sampling_rejection_threshold_benches,
              sampling_with_visibility_benches
}
criterion_main!(benches);
