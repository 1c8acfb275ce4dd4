//! Low-level DSP primitives used by the voice layer.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math; note handling and mixing live in [`crate::synth`].

/// Time-driven ADSR envelope with power-law segment curves.
pub mod envelope;
/// Phase-accumulating oscillator.
pub mod oscillator;
/// Stateless phase-to-amplitude functions.
pub mod wavetable;

pub use envelope::{Adsr, AdsrParams, EnvelopeStage};
pub use oscillator::Oscillator;
pub use wavetable::{Waveform, Wavetable};
