//! Benchmarks for ADSR envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_voice::dsp::envelope::{Adsr, AdsrParams};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f64 = 48_000.0;

fn started(params: AdsrParams) -> Adsr {
    let mut env = Adsr::new(params, SAMPLE_RATE);
    env.trigger();
    env.gate(true);
    env
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (ramping up, long enough to stay there)
        let mut env = started(AdsrParams::linear(100.0, 0.1, 0.7, 0.3));
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Curved attack - powf with a non-integer exponent
        let mut env = started(AdsrParams::linear(100.0, 0.1, 0.7, 0.3).with_curve(0.3));
        group.bench_with_input(BenchmarkId::new("attack_curved", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Sustain phase (holding steady)
        let mut env = started(AdsrParams::linear(0.001, 0.001, 0.7, 0.3));
        // Advance past attack/decay
        for _ in 0..200 {
            env.generate();
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Release phase (ramping down, long enough to stay there)
        let mut env = started(AdsrParams::linear(0.001, 0.001, 0.7, 100.0));
        for _ in 0..200 {
            env.generate();
        }
        env.gate(false);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
