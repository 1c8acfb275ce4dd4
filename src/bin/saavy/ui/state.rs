//! Shared state types for UI communication
//!
//! Designed for real-time safety: static data is built once before the
//! stream starts, per-block updates are fixed-size and `Copy`.

use saavy_voice::{
    dsp::{
        envelope::{AdsrParams, EnvelopeStage},
        wavetable::Waveform,
    },
    synth::{SynthVoice, VoicePool},
};

/// Slots beyond this are still played, just not shown.
pub const MAX_DISPLAY_VOICES: usize = 16;

/// Static session info (built once, never in audio callback)
#[derive(Clone, Debug)]
pub struct SessionInfo {
    pub sample_rate: f32,
    pub channels: usize,
    pub voices: usize,
    pub waveform: Waveform,
    pub envelope: AdsrParams,
}

/// One pool slot as seen by the UI
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotState {
    /// Note bound to the slot (`None` = free, maybe still in its release tail)
    pub note: Option<i32>,
    /// Envelope stage, `None` when the slot was never used
    pub stage: Option<EnvelopeStage>,
    /// Last envelope level (0.0-1.0)
    pub level: f32,
    /// Position in press order, 0 = newest. `None` for free slots.
    pub press_rank: Option<u8>,
}

/// Snapshot of the pool sent from the audio thread (allocation-free, Copy)
#[derive(Clone, Copy, Debug, Default)]
pub struct VoiceSnapshot {
    pub slots: [SlotState; MAX_DISPLAY_VOICES],
    pub num_slots: u8,
    /// Voices still producing sound
    pub sounding: u8,
    /// Notes currently held
    pub held: u8,
}

impl VoiceSnapshot {
    /// Called from the audio callback. Must not allocate.
    pub fn capture(pool: &VoicePool<SynthVoice>) -> Self {
        let mut snapshot = Self::default();

        for (slot, voice) in pool.voices().iter().take(MAX_DISPLAY_VOICES).enumerate() {
            let env = voice.envelope();
            snapshot.slots[slot] = SlotState {
                note: pool.note_at(slot),
                stage: Some(env.stage()),
                level: env.level(),
                press_rank: None,
            };
        }
        for (rank, slot) in pool.pressed().enumerate() {
            if let Some(state) = snapshot.slots.get_mut(slot) {
                state.press_rank = Some(rank as u8);
            }
        }

        snapshot.num_slots = pool.capacity().min(MAX_DISPLAY_VOICES) as u8;
        snapshot.sounding = pool.active_count().min(u8::MAX as usize) as u8;
        snapshot.held = pool.pressed().count().min(u8::MAX as usize) as u8;
        snapshot
    }
}
