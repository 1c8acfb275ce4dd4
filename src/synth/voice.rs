use crate::dsp::{
    envelope::{Adsr, AdsrParams},
    oscillator::Oscillator,
    wavetable::Wavetable,
};

/// Anything the [`VoicePool`](crate::synth::pool::VoicePool) can play.
///
/// The pool only ever talks to its voices through these calls, so a bare
/// envelope, an enveloped oscillator or a whole patch can be swapped in.
/// Every method runs on the audio thread and must not allocate or block.
pub trait Voice: Send {
    /// Produce the next sample.
    fn generate(&mut self) -> f32;

    /// Restart the voice from the beginning of its attack.
    fn trigger(&mut self);

    /// Note held (`true`) or released (`false`).
    fn gate(&mut self, on: bool);

    /// Pitch in Hz. Any value is accepted.
    fn set_frequency(&mut self, hz: f64);

    /// True when the voice is silent and can be skipped by the mixer.
    fn is_done(&self) -> bool;

    /// Propagate a host sample-rate change.
    ///
    /// Default implementation does nothing (rate-independent voices).
    fn set_sample_rate(&mut self, _sample_rate: f64) {
        // Default: do nothing
    }
}

/// A bare envelope is a voice that outputs its own level. Useful as a
/// control-rate source and for checking allocation without audio content.
impl Voice for Adsr {
    fn generate(&mut self) -> f32 {
        Adsr::generate(self)
    }

    fn trigger(&mut self) {
        Adsr::trigger(self)
    }

    fn gate(&mut self, on: bool) {
        Adsr::gate(self, on)
    }

    fn set_frequency(&mut self, _hz: f64) {}

    fn is_done(&self) -> bool {
        Adsr::is_done(self)
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        Adsr::set_sample_rate(self, sample_rate)
    }
}

/// Oscillator shaped by an ADSR envelope: `osc × env`.
#[derive(Debug, Clone, Default)]
pub struct SynthVoice {
    osc: Oscillator,
    env: Adsr,
}

impl SynthVoice {
    pub fn new(osc: Oscillator, env: Adsr) -> Self {
        Self { osc, env }
    }

    /// Build a voice from a wavetable and envelope shape at one sample rate.
    pub fn with_params(wavetable: Wavetable, params: AdsrParams, sample_rate: f64) -> Self {
        Self {
            osc: Oscillator::new(wavetable, sample_rate),
            env: Adsr::new(params, sample_rate),
        }
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.osc
    }

    pub fn oscillator_mut(&mut self) -> &mut Oscillator {
        &mut self.osc
    }

    pub fn envelope(&self) -> &Adsr {
        &self.env
    }

    pub fn envelope_mut(&mut self) -> &mut Adsr {
        &mut self.env
    }
}

impl Voice for SynthVoice {
    #[inline]
    fn generate(&mut self) -> f32 {
        self.osc.process(0.0) * self.env.generate()
    }

    /// Retrigger both halves: the envelope restarts its attack and the
    /// oscillator restarts its cycle, so every note begins at the same point
    /// of the waveform.
    fn trigger(&mut self) {
        self.osc.reset();
        self.env.trigger();
    }

    fn gate(&mut self, on: bool) {
        self.env.gate(on);
    }

    fn set_frequency(&mut self, hz: f64) {
        self.osc.set_frequency(hz);
    }

    fn is_done(&self) -> bool {
        self.env.is_done()
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.osc.set_sample_rate(sample_rate);
        self.env.set_sample_rate(sample_rate);
    }
}

/// Allow boxed voices to be used as voices (for dynamic dispatch)
impl Voice for Box<dyn Voice> {
    fn generate(&mut self) -> f32 {
        (**self).generate()
    }

    fn trigger(&mut self) {
        (**self).trigger()
    }

    fn gate(&mut self, on: bool) {
        (**self).gate(on)
    }

    fn set_frequency(&mut self, hz: f64) {
        (**self).set_frequency(hz)
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        (**self).set_sample_rate(sample_rate)
    }
}
