#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::TAU;

/*
Wavetables
==========

A wavetable here is not a stored array of samples: it is a pure function from
normalized phase to amplitude. One full cycle of the waveform lives in the
phase interval [0, 1), and the oscillator walks that interval at a speed set
by its frequency.

    amplitude = table(phase)        phase in [0, 1), amplitude in [-1, 1]

Shapes
------

  Sine       sin(2π·p)                    pure tone, fundamental only
  Square     +1 for p < 0.5, -1 otherwise  odd harmonics, 1/n falloff
  Saw        2p - 1                       all harmonics, 1/n falloff
  Triangle   1 - 4·|p - 0.5|              odd harmonics, 1/n² falloff

None of these are band-limited: at high fundamentals the discontinuities of
square and saw alias. That is acceptable for control-rate use and for the
budget polyphony this crate targets.

Custom tables are plain `fn` pointers. They cannot capture state, which keeps
every table allocation-free and safe to evaluate on the audio thread.
*/

/// Wrap any phase into [0, 1).
///
/// Adds one before taking the remainder so small negative values (negative
/// frequencies, negative offsets) land at the top of the cycle instead of
/// staying negative. Inputs below -1 are handled by `rem_euclid`.
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    let wrapped = (phase + 1.0).rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Periodic phase-to-amplitude mapping evaluated by an [`Oscillator`].
///
/// [`Oscillator`]: crate::dsp::oscillator::Oscillator
#[derive(Debug, Clone, Copy, Default)]
pub enum Wavetable {
    #[default]
    Sine,
    Square,
    Saw,
    Triangle,
    /// User supplied table. Must be pure; it runs once per sample.
    Custom(fn(f64) -> f64),
}

impl Wavetable {
    /// Evaluate the table at `phase`. Callers pass a wrapped phase.
    #[inline]
    pub fn eval(&self, phase: f64) -> f64 {
        match self {
            Wavetable::Sine => (TAU * phase).sin(),
            Wavetable::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Wavetable::Saw => 2.0 * phase - 1.0,
            Wavetable::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Wavetable::Custom(table) => table(phase),
        }
    }
}

/// Named built-in shapes, the subset of [`Wavetable`] that can be configured
/// from outside the process (CLI flags, serialized settings).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Saw,
    Triangle,
}

impl From<Waveform> for Wavetable {
    fn from(waveform: Waveform) -> Self {
        match waveform {
            Waveform::Sine => Wavetable::Sine,
            Waveform::Square => Wavetable::Square,
            Waveform::Saw => Wavetable::Saw,
            Waveform::Triangle => Wavetable::Triangle,
        }
    }
}
