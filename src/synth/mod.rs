// Purpose: Voice management, polyphony, note handling
// This layer sits above the DSP primitives and decides which voice plays what

pub mod factory;
pub mod message;
pub mod poly;
pub mod pool;
pub mod voice;

pub use message::{MessageReceiver, SynthMessage};
pub use poly::PolySynth;
pub use pool::{note_to_freq, PressOutcome, VoicePool};
pub use voice::{SynthVoice, Voice};
