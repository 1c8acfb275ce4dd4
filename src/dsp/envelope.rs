#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::DEFAULT_SAMPLE_RATE;

/*
ADSR Envelope Implementation
============================

This module implements a curved ADSR envelope generator driven by elapsed
time rather than by per-stage increments.

Vocabulary
----------

  phase       Seconds elapsed since the last trigger. The sentinel -1.0 means
              the envelope is idle (finished, silent). Every stage is a range
              of phase values, so the stage is never stored separately.

  gate        The note on/off signal. Gate high holds the note, gate low
              starts the release.

  curve       Power-law exponent applied to each segment's normalized time.
              1.0 is a straight line. Below 1.0 the segment moves quickly at
              first and settles slowly; above 1.0 it starts slowly.

  down        The level captured when the gate drops. Release ramps from
              here to zero, so releasing during the attack does not jump up
              to the sustain level first.


The Shape
---------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ phase (seconds)
          0     a    a+d       a+d+r
          Attack Decay Sustain  Release

Segments, with t the phase:

    t < 0              0                                  (idle)
    0 ≤ t < a          (t / a)^ac                          attack
    a ≤ t ≤ a+d        1 - (1 - s)·((t - a) / d)^dc        decay
    a+d < t < a+d+r    down - down·((t - a - d) / r)^rc    release
    otherwise          0

Sustain is not a segment of its own: while the gate is high the phase is
frozen at exactly a+d, where the decay formula evaluates to s.


The State Machine
-----------------

    trigger()        phase ← 0, down ← s
    gate(true)       gate ← true (phase moves only inside generate)
    gate(false)      if gate was high: down ← current level, phase ← a+d;
                     then gate ← false

    generate():
      1. advance phase by 1/sample_rate while attacking/decaying, or while
         releasing (gate low)
      2. otherwise, if still gated past a+d, pin phase back to a+d
      3. phase past a+d+r → phase ← -1 (idle)
      4. evaluate the segment at the new phase

    ┌──────┐ trigger ┌────────┐ t=a ┌───────┐ t=a+d ┌─────────┐
    │ Idle │ ──────→ │ Attack │ ──→ │ Decay │ ────→ │ Sustain │
    └──────┘         └────────┘     └───────┘       └─────────┘
        ↑                 │ gate off    │ gate off       │ gate off
        │  t > a+d+r      ↓             ↓                ↓
        └────────────── ┌─────────────────────────────────────┐
                        │ Release (from the captured level)   │
                        └─────────────────────────────────────┘

Zero-length times
-----------------

a, d and r divide the normalized time. A zero length produces NaN or
infinity in its segment. No clamping happens here: keeping the times
positive is the caller's job (see `SynthConfig::validate`).
*/

/// Phase value of an envelope that is not running.
pub const IDLE: f64 = -1.0;

/// Envelope shape. Times are in seconds, curves are exponents, sustain is a
/// level in [0, 1].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    pub attack: f64,
    pub attack_curve: f64,
    pub decay: f64,
    pub decay_curve: f64,
    pub sustain: f64,
    pub release: f64,
    pub release_curve: f64,
}

impl AdsrParams {
    /// Linear segments (all curves 1.0).
    pub fn linear(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            attack_curve: 1.0,
            decay,
            decay_curve: 1.0,
            sustain,
            release,
            release_curve: 1.0,
        }
    }

    /// Same exponent on every segment.
    pub fn with_curve(mut self, curve: f64) -> Self {
        self.attack_curve = curve;
        self.decay_curve = curve;
        self.release_curve = curve;
        self
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self::linear(0.01, 0.1, 0.7, 0.3)
    }
}

/// Named view of the implicit state. Derived from `(phase, gate)` on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone)]
pub struct Adsr {
    params: AdsrParams,
    sample_rate: f64,

    gate: bool,
    phase: f64,  // seconds since trigger, or IDLE
    down: f64,   // level the release starts from
    sample: f64, // last output
}

impl Adsr {
    pub fn new(params: AdsrParams, sample_rate: f64) -> Self {
        Self {
            params,
            sample_rate,
            gate: false,
            phase: IDLE,
            down: params.sustain,
            sample: 0.0,
        }
    }

    pub fn adsr(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self::new(
            AdsrParams::linear(attack, decay, sustain, release),
            DEFAULT_SAMPLE_RATE,
        )
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Restart from the beginning of the attack.
    ///
    /// Does not touch the gate and does not reset the output level; the next
    /// `generate` recomputes it from phase 0.
    pub fn trigger(&mut self) {
        self.phase = 0.0;
        self.down = self.params.sustain;
    }

    pub fn gate(&mut self, on: bool) {
        if !on && self.gate {
            self.down = self.sample;
            self.phase = self.sustain_point();
        }
        self.gate = on;
    }

    /// Advance one sample and return the new level.
    #[inline]
    pub fn generate(&mut self) -> f32 {
        let hold = self.sustain_point();

        if self.phase >= 0.0 && (self.phase < hold || !self.gate) {
            self.phase += 1.0 / self.sample_rate;
        } else if self.gate && self.phase >= hold {
            self.phase = hold;
        }

        if self.phase > hold + self.params.release {
            self.phase = IDLE;
        }

        self.sample = self.level_at(self.phase);
        self.sample as f32
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.generate();
        }
    }

    fn level_at(&self, t: f64) -> f64 {
        let AdsrParams {
            attack: a,
            attack_curve: ac,
            decay: d,
            decay_curve: dc,
            sustain: s,
            release: r,
            release_curve: rc,
        } = self.params;

        if t < 0.0 {
            0.0
        } else if t < a {
            (t / a).powf(ac)
        } else if t <= a + d {
            1.0 - (1.0 - s) * ((t - a) / d).powf(dc)
        } else if t < a + d + r {
            self.down - self.down * ((t - a - d) / r).powf(rc)
        } else {
            0.0
        }
    }

    #[inline]
    fn sustain_point(&self) -> f64 {
        self.params.attack + self.params.decay
    }

    /// True once the release has run out (or before the first trigger).
    pub fn is_done(&self) -> bool {
        self.phase == IDLE
    }

    pub fn stage(&self) -> EnvelopeStage {
        let hold = self.sustain_point();
        if self.phase < 0.0 {
            EnvelopeStage::Idle
        } else if self.phase < self.params.attack {
            EnvelopeStage::Attack
        } else if self.phase < hold {
            EnvelopeStage::Decay
        } else if self.gate {
            EnvelopeStage::Sustain
        } else {
            EnvelopeStage::Release
        }
    }

    /// Last generated level (0.0 to 1.0 for sane parameters).
    pub fn level(&self) -> f32 {
        self.sample as f32
    }

    /// Seconds since trigger, or [`IDLE`].
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn is_gated(&self) -> bool {
        self.gate
    }

    pub fn params(&self) -> &AdsrParams {
        &self.params
    }

    /// Takes effect from the next sample; a running envelope keeps its phase.
    pub fn set_params(&mut self, params: AdsrParams) {
        self.params = params;
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self::new(AdsrParams::default(), DEFAULT_SAMPLE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 1_000.0;

    fn env(attack: f64, decay: f64, sustain: f64, release: f64) -> Adsr {
        Adsr::adsr(attack, decay, sustain, release).with_sample_rate(SAMPLE_RATE)
    }

    fn render_samples(env: &mut Adsr, samples: usize) -> Vec<f32> {
        (0..samples).map(|_| env.generate()).collect()
    }

    fn note_on(env: &mut Adsr) {
        env.trigger();
        env.gate(true);
    }

    #[test]
    fn starts_idle_and_silent() {
        let mut env = env(0.01, 0.1, 0.7, 0.2);
        assert!(env.is_done());
        assert_eq!(env.stage(), EnvelopeStage::Idle);
        assert!(render_samples(&mut env, 10).iter().all(|&s| s == 0.0));
        assert!(env.is_done());
    }

    #[test]
    fn attack_reaches_full_level() {
        let mut env = env(0.01, 0.1, 0.7, 0.2);
        note_on(&mut env);

        let out = render_samples(&mut env, 10);
        assert!((out[4] - 0.5).abs() < 1e-6, "halfway through attack");
        assert!((out[9] - 1.0).abs() < 1e-6, "expected attack to reach peak");
        assert_eq!(env.stage(), EnvelopeStage::Decay);
    }

    #[test]
    fn sustain_holds_target_level() {
        let sustain = 0.6;
        let mut env = env(0.01, 0.05, sustain, 0.2);
        note_on(&mut env);

        // well past a + d
        let out = render_samples(&mut env, 500);
        assert!(!env.is_done());
        assert_eq!(env.stage(), EnvelopeStage::Sustain);
        assert!((env.phase() - 0.06).abs() < 1e-12, "phase pinned at a+d");
        for level in &out[100..] {
            assert!((*level as f64 - sustain).abs() < 1e-6);
        }
    }

    #[test]
    fn never_done_while_gated() {
        let mut env = env(0.005, 0.005, 0.3, 0.005);
        note_on(&mut env);
        for _ in 0..2_000 {
            env.generate();
            assert!(!env.is_done());
        }
    }

    #[test]
    fn release_falls_back_to_idle() {
        let release = 0.03;
        let mut env = env(0.01, 0.05, 0.5, release);
        note_on(&mut env);
        render_samples(&mut env, 200);

        env.gate(false);
        assert_eq!(env.stage(), EnvelopeStage::Release);

        // 30 release samples (plus one for the float sum to pass a+d+r)
        let out = render_samples(&mut env, 29);
        assert!(!env.is_done(), "still releasing before r elapses");
        assert!(out.windows(2).all(|w| w[1] <= w[0]), "monotone release");
        assert!((out[14] - 0.25).abs() < 0.02, "linear release halfway");

        render_samples(&mut env, 3);
        assert!(env.is_done());
        assert_eq!(env.level(), 0.0);
        assert_eq!(env.phase(), IDLE);
    }

    #[test]
    fn release_starts_from_current_level() {
        let mut env = env(0.1, 0.1, 0.8, 0.1);
        note_on(&mut env);
        let out = render_samples(&mut env, 20);
        let held = out[19];
        assert!((held - 0.2).abs() < 1e-6);

        env.gate(false);
        let first = env.generate();
        assert!(first < held, "release must not jump to sustain");
        assert!(first > 0.15);
    }

    #[test]
    fn curve_shapes_attack() {
        let mut fast = Adsr::new(
            AdsrParams::linear(0.01, 0.1, 0.5, 0.1).with_curve(0.5),
            SAMPLE_RATE,
        );
        let mut slow = Adsr::new(
            AdsrParams::linear(0.01, 0.1, 0.5, 0.1).with_curve(2.0),
            SAMPLE_RATE,
        );
        note_on(&mut fast);
        note_on(&mut slow);
        let fast_out = render_samples(&mut fast, 3);
        let slow_out = render_samples(&mut slow, 3);

        // t = 0.003 → (0.3)^0.5 vs (0.3)^2
        assert!((fast_out[2] as f64 - 0.3f64.sqrt()).abs() < 1e-6);
        assert!((slow_out[2] as f64 - 0.09).abs() < 1e-6);
    }

    #[test]
    fn retrigger_restarts_attack() {
        let mut env = env(0.01, 0.01, 0.5, 0.1);
        note_on(&mut env);
        render_samples(&mut env, 50);
        env.trigger();
        assert_eq!(env.stage(), EnvelopeStage::Attack);
        let first = env.generate();
        assert!((first - 0.1).abs() < 1e-6);
    }

    #[test]
    fn gate_off_without_trigger_still_releases() {
        let mut env = env(0.01, 0.01, 0.5, 0.1);
        env.gate(true);
        env.gate(false);

        // pinned to the release marker even though attack never ran
        assert_eq!(env.phase(), 0.02);
        assert!(!env.is_done());
        assert_eq!(env.stage(), EnvelopeStage::Release);

        // releases from the captured level (0) for r seconds
        for _ in 0..95 {
            assert_eq!(env.generate(), 0.0);
            assert!(!env.is_done());
        }
        for _ in 0..10 {
            env.generate();
        }
        assert!(env.is_done());
    }

    #[test]
    fn gate_off_without_gate_on_is_noop() {
        let mut env = env(0.01, 0.01, 0.5, 0.1);
        env.gate(false);
        assert!(env.is_done());
        assert_eq!(env.phase(), IDLE);
    }

    #[test]
    fn zero_attack_is_not_guarded() {
        let mut env = env(0.0, 0.01, 0.5, 0.1);
        env.trigger();
        env.gate(true);
        // phase 0 with a = 0 lands in decay at t = 1/sr, fine; the attack
        // formula itself would divide by zero
        let out = env.generate();
        assert!(out.is_finite());
        let mut degenerate = Adsr::adsr(0.0, 0.0, 0.5, 0.1).with_sample_rate(SAMPLE_RATE);
        degenerate.trigger();
        degenerate.gate(true);
        // phase pinned at a+d = 0, decay formula evaluates 0/0
        assert!(degenerate.generate().is_nan());
    }
}
