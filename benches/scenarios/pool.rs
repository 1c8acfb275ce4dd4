//! Benchmarks for the voice pool.
//!
//! Mixing cost scales with capacity, not with how many notes are held, so
//! the interesting cases are an idle pool, a full pool, and a pool that is
//! stealing on every block.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_voice::dsp::{envelope::AdsrParams, wavetable::Wavetable};
use saavy_voice::synth::{SynthVoice, VoicePool};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f64 = 48_000.0;
const VOICES: usize = 16;

fn pool() -> VoicePool<SynthVoice> {
    VoicePool::from_factory(VOICES, || {
        SynthVoice::with_params(
            Wavetable::Saw,
            AdsrParams::linear(0.01, 0.1, 0.7, 0.3),
            SAMPLE_RATE,
        )
    })
}

pub fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pool");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === IDLE ===
        // Nothing held: the mixer only checks is_done per voice
        let mut idle = pool();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render(black_box(&mut buffer));
            })
        });

        // === FULL ===
        // Every voice sounding
        let mut full = pool();
        for note in 48..48 + VOICES as i32 {
            full.note_press(note);
        }
        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| {
                full.render(black_box(&mut buffer));
            })
        });

        // === STEALING ===
        // Full pool, one new note per block evicts the oldest
        let mut stealing = pool();
        for note in 48..48 + VOICES as i32 {
            stealing.note_press(note);
        }
        let mut next = 0i32;
        group.bench_with_input(BenchmarkId::new("stealing", size), &size, |b, _| {
            b.iter(|| {
                stealing.note_press(black_box(36 + next % 48));
                next = next.wrapping_add(1);
                stealing.render(black_box(&mut buffer));
            })
        });

        // === CHORD CHURN ===
        // Press and release a triad every block
        let mut churn = pool();
        group.bench_with_input(BenchmarkId::new("chord_churn", size), &size, |b, _| {
            b.iter(|| {
                for note in [60, 64, 67] {
                    churn.note_press(black_box(note));
                }
                churn.render(black_box(&mut buffer));
                for note in [60, 64, 67] {
                    churn.note_release(black_box(note));
                }
            })
        });
    }

    group.finish();
}
