#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control events for a [`PolySynth`](crate::synth::poly::PolySynth).
///
/// `Copy` and fixed-size so they can cross a lock-free queue from the UI or
/// MIDI thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    /// Velocity is carried for MIDI parity; the pool ignores it.
    NoteOn { note: i32, velocity: u8 },
    NoteOff { note: i32 },
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
