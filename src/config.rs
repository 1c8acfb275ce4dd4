//! Instrument settings for front ends.
//!
//! The realtime core takes whatever numbers it is given. `SynthConfig` is the
//! place where a host checks them first, so a zero envelope time becomes a
//! readable error instead of NaN samples on the audio thread.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dsp::{envelope::AdsrParams, oscillator::DEFAULT_SAMPLE_RATE, wavetable::Waveform};
use crate::synth::{pool::VoicePool, voice::SynthVoice};

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Errors reported by [`SynthConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("voice count must be at least 1")]
    NoVoices,

    #[error("sample rate must be positive, got {0}")]
    SampleRate(f64),

    #[error("{stage} time must be positive, got {value}s")]
    EnvelopeTime { stage: &'static str, value: f64 },

    #[error("{stage} curve must be positive, got {value}")]
    EnvelopeCurve { stage: &'static str, value: f64 },

    #[error("sustain must be within 0.0..=1.0, got {0}")]
    Sustain(f64),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub voices: usize,
    pub waveform: Waveform,
    pub envelope: AdsrParams,
    pub sample_rate: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            voices: 8,
            waveform: Waveform::Saw,
            envelope: AdsrParams::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.voices == 0 {
            return Err(ConfigError::NoVoices);
        }
        if !is_positive(self.sample_rate) {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }

        let env = &self.envelope;
        for (stage, value) in [
            ("attack", env.attack),
            ("decay", env.decay),
            ("release", env.release),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::EnvelopeTime { stage, value });
            }
        }
        for (stage, value) in [
            ("attack", env.attack_curve),
            ("decay", env.decay_curve),
            ("release", env.release_curve),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::EnvelopeCurve { stage, value });
            }
        }
        if !(0.0..=1.0).contains(&env.sustain) {
            return Err(ConfigError::Sustain(env.sustain));
        }

        Ok(())
    }

    /// One voice as described by this config.
    pub fn build_voice(&self) -> SynthVoice {
        SynthVoice::with_params(self.waveform.into(), self.envelope, self.sample_rate)
    }

    /// A full pool of [`SynthVoice`]s. Does not validate.
    pub fn build_pool(&self) -> VoicePool<SynthVoice> {
        VoicePool::from_factory(self.voices, || self.build_voice())
    }
}
