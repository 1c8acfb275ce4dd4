pub mod config; // Instrument settings and validation
pub mod dsp;
pub mod synth; // Voice management and polyphony

pub use config::{ConfigError, SynthConfig};

pub const MAX_BLOCK_SIZE: usize = 2048;
