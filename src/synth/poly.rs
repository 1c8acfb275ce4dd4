use tracing::trace;

use crate::synth::{
    message::{MessageReceiver, SynthMessage},
    pool::VoicePool,
    voice::Voice,
};

/// Block renderer around a [`VoicePool`].
///
/// The pool itself has no synchronization. `PolySynth` owns the receiving
/// end of a single-producer queue and drains it at the top of every block,
/// so note events and per-sample mixing never interleave. Event timing is
/// therefore quantized to the block boundary.
pub struct PolySynth<V: Voice, R: MessageReceiver> {
    pool: VoicePool<V>,
    rx: R,
}

impl<V: Voice, R: MessageReceiver> PolySynth<V, R> {
    pub fn new(pool: VoicePool<V>, rx: R) -> Self {
        Self { pool, rx }
    }

    /// Apply pending control messages, then render `out` sample by sample.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let mut handled = 0usize;
        while let Some(msg) = self.rx.pop() {
            match msg {
                SynthMessage::NoteOn { note, .. } => {
                    self.pool.note_press(note);
                }
                SynthMessage::NoteOff { note } => {
                    self.pool.note_release(note);
                }
                SynthMessage::AllNotesOff => self.pool.all_notes_off(),
            }
            handled += 1;
        }
        if handled > 0 {
            trace!(handled, "drained control messages");
        }

        self.pool.render(out);
    }

    pub fn pool(&self) -> &VoicePool<V> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut VoicePool<V> {
        &mut self.pool
    }
}
