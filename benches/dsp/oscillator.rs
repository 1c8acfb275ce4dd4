//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_voice::dsp::{oscillator::Oscillator, wavetable::Wavetable};

use crate::BLOCK_SIZES;

fn soft_clip_table(p: f64) -> f64 {
    (4.0 * (p - 0.5)).tanh()
}

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - uses sin() transcendental function
        let mut osc = Oscillator::sine().with_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Sawtooth - simple linear ramp
        let mut osc = Oscillator::sawtooth().with_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Square - branch per sample
        let mut osc = Oscillator::square().with_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Custom - call through a fn pointer
        let mut osc = Oscillator::new(Wavetable::Custom(soft_clip_table), 48_000.0)
            .with_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("custom", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Phase-modulated sine, offset changes every sample
        let mut osc = Oscillator::sine().with_frequency(220.0);
        group.bench_with_input(BenchmarkId::new("sine_pm", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    *sample = osc.process(black_box(i as f64 * 1e-4));
                }
            })
        });
    }

    group.finish();
}
