//! Benchmarks for the y+ estimator and sweep reduction.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use wing_aero_calc::sweep::{ForceSource, flow_direction, reduce_forces};
use wing_aero_calc::{AoaResult, Result, SolverConfig, first_layer_height_from_yplus, free_stream_velocity, run_sweep};

/// Mach/temperature grid typical of a low-speed wing study
fn generate_conditions(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let frac = i as f64 / n as f64;
            (0.05 + 0.6 * frac, 250.0 + 60.0 * frac)
        })
        .collect()
}

/// Benchmark the first-layer estimate over a condition grid
fn bench_first_layer_height(c: &mut Criterion) {
    let mut group = c.benchmark_group("FirstLayerHeight");

    for &n in &[10usize, 1000] {
        let conditions = generate_conditions(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("grid", n), &conditions, |bencher, conditions| {
            bencher.iter(|| {
                conditions
                    .iter()
                    .filter_map(|&(mach, t)| {
                        let u = free_stream_velocity(mach, t);
                        first_layer_height_from_yplus(1.0, u, 0.3, t, 101325.0).ok()
                    })
                    .map(|wd| wd.first_layer_height)
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

/// Analytic force source so the sweep loop can be timed without an engine
struct FlatPlate;

impl ForceSource for FlatPlate {
    fn wall_forces(&mut self, aoa_deg: f64, direction: [f64; 3], _iterations: u32) -> Result<[f64; 3]> {
        let lift = 2.0 * std::f64::consts::PI * aoa_deg.to_radians();
        let drag = 0.01;
        let [c, _, s] = direction;
        Ok([drag * c - lift * s, 0.0, drag * s + lift * c])
    }
}

/// Benchmark reduction of a full AoA sweep
fn bench_sweep(c: &mut Criterion) {
    let cfg = SolverConfig {
        aoa_deg: (0..=40).map(|i| -10.0 + 0.5 * i as f64).collect(),
        ..SolverConfig::default()
    };

    let mut group = c.benchmark_group("Sweep");
    group.throughput(Throughput::Elements(cfg.aoa_deg.len() as u64));

    group.bench_function("run_sweep_41", |bencher| {
        bencher.iter(|| run_sweep(&mut FlatPlate, &cfg).map(|r: Vec<AoaResult>| r.len()));
    });

    group.bench_function("reduce_forces", |bencher| {
        bencher.iter(|| {
            cfg.aoa_deg
                .iter()
                .map(|&a| reduce_forces(a, [0.1, 0.0, 1.0], 2800.0, 0.1).cl)
                .sum::<f64>()
        });
    });

    group.bench_function("flow_direction", |bencher| {
        bencher.iter(|| cfg.aoa_deg.iter().map(|&a| flow_direction(a)[2]).sum::<f64>());
    });

    group.finish();
}

criterion_group!(benches, bench_first_layer_height, bench_sweep);
criterion_main!(benches);
