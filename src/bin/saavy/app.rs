//! Saavy - audio setup and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info};

use saavy_voice::{
    synth::{PolySynth, SynthMessage},
    SynthConfig, MAX_BLOCK_SIZE,
};

use crate::ui::{SessionInfo, UiApp, VoiceSnapshot};

/// Note events from the UI thread
const CONTROL_QUEUE_SIZE: usize = 256;
/// Samples for the oscilloscope
const AUDIO_QUEUE_SIZE: usize = 8192;
const SNAPSHOT_QUEUE_SIZE: usize = 16;

/// Main application
pub struct Saavy {
    config: SynthConfig,
}

impl Saavy {
    pub fn new(config: SynthConfig) -> Self {
        Self { config }
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(mut self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let channels = stream_config.channels() as usize;
        self.config.sample_rate = stream_config.sample_rate().0 as f64;
        info!(
            sample_rate = self.config.sample_rate,
            channels,
            voices = self.config.voices,
            "opening output stream"
        );

        let (control_tx, control_rx) = RingBuffer::<SynthMessage>::new(CONTROL_QUEUE_SIZE);
        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(AUDIO_QUEUE_SIZE);
        let (mut snapshot_tx, snapshot_rx) = RingBuffer::<VoiceSnapshot>::new(SNAPSHOT_QUEUE_SIZE);

        let mut synth = PolySynth::new(self.config.build_pool(), control_rx);
        let gain = 1.0 / (self.config.voices as f32).sqrt();
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    synth.render_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        let s = s * gain;
                        let out = s.clamp(-1.0, 1.0);
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = out;
                        }
                        // Scope sees the unclipped mix; a full queue drops samples
                        let _ = audio_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }

                let _ = snapshot_tx.push(VoiceSnapshot::capture(synth.pool()));
            },
            |err| error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        let session = SessionInfo {
            sample_rate: self.config.sample_rate as f32,
            channels,
            voices: self.config.voices,
            waveform: self.config.waveform,
            envelope: self.config.envelope,
        };
        let mut ui = UiApp::new(control_tx, audio_rx, snapshot_rx, session);

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        info!("shutting down");
        drop(stream);
        result
    }
}
