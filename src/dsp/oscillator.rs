use crate::dsp::wavetable::{wrap_phase, Wavetable};

/*
Phase-Accumulating Oscillator
=============================

Vocabulary
----------

  phase        Position inside one waveform cycle, always kept in [0, 1).
               0.0 is the start of the cycle, 0.5 is halfway through.

  delta        How far the phase moves per sample:

                   delta = frequency / sample_rate

               At 440 Hz and 48 kHz, delta ≈ 0.00917, so one cycle takes
               about 109 samples.

  wrap         After each step the phase is folded back into [0, 1). The
               fold adds 1.0 before the remainder so negative deltas (negative
               frequencies) and negative offsets stay positive.


Each call to `process` moves the phase forward by one delta, folds in the
caller's phase offset, wraps, and evaluates the wavetable at the new phase:

    phase ← wrap(phase + offset + delta)
    out   ← table(phase)

The offset is folded into the stored phase. A constant offset therefore acts
like a small frequency shift, and a modulator fed in sample by sample gives
phase/frequency modulation.

`sample` is the read-only twin: it evaluates table(wrap(phase + offset))
without touching the accumulator. Scopes and phase-locked auxiliary taps use
it to read the waveform without disturbing the running voice.

Frequency is not validated. Zero stalls the phase, negative frequencies run
the waveform backwards. Both are legitimate.
*/

pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;

#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    phase: f64,
    frequency: f64,
    sample_rate: f64,
    wavetable: Wavetable,
}

impl Oscillator {
    pub fn new(wavetable: Wavetable, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            frequency: 0.0,
            sample_rate,
            wavetable,
        }
    }

    pub fn sine() -> Self {
        Self::new(Wavetable::Sine, DEFAULT_SAMPLE_RATE)
    }

    pub fn square() -> Self {
        Self::new(Wavetable::Square, DEFAULT_SAMPLE_RATE)
    }

    pub fn sawtooth() -> Self {
        Self::new(Wavetable::Saw, DEFAULT_SAMPLE_RATE)
    }

    pub fn triangle() -> Self {
        Self::new(Wavetable::Triangle, DEFAULT_SAMPLE_RATE)
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Advance one sample and return the wavetable at the new phase.
    #[inline]
    pub fn process(&mut self, phase_offset: f64) -> f32 {
        let delta = self.frequency / self.sample_rate;
        self.phase = wrap_phase(self.phase + phase_offset + delta);
        self.wavetable.eval(self.phase) as f32
    }

    /// Peek at the waveform `phase_offset` ahead of the current phase.
    /// Never advances the accumulator.
    #[inline]
    pub fn sample(&self, phase_offset: f64) -> f32 {
        self.wavetable.eval(wrap_phase(self.phase + phase_offset)) as f32
    }

    /// Fill a block with consecutive samples (no phase offset).
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.process(0.0);
        }
    }

    /// Restart the cycle at phase 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }

    pub fn wavetable(&self) -> Wavetable {
        self.wavetable
    }

    pub fn set_wavetable(&mut self, wavetable: Wavetable) {
        self.wavetable = wavetable;
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::sine()
    }
}
