//! saavy - Terminal polyphonic keyboard
//!
//! Run with: cargo run -- --voices 4 --waveform square --release 0.8

mod app;
mod keyboard;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::Saavy;
use saavy_voice::{dsp::envelope::AdsrParams, dsp::wavetable::Waveform, SynthConfig};

#[derive(Parser)]
#[command(name = "saavy")]
#[command(author, version, about = "Polyphonic terminal keyboard", long_about = None)]
struct Cli {
    /// Number of voices in the pool
    #[arg(short, long, default_value_t = 8)]
    voices: usize,

    /// Oscillator shape
    #[arg(short, long, value_enum, default_value_t = WaveArg::Saw)]
    waveform: WaveArg,

    /// Attack time in seconds
    #[arg(long, default_value_t = 0.01)]
    attack: f64,

    /// Decay time in seconds
    #[arg(long, default_value_t = 0.1)]
    decay: f64,

    /// Sustain level (0.0 - 1.0)
    #[arg(long, default_value_t = 0.7)]
    sustain: f64,

    /// Release time in seconds
    #[arg(long, default_value_t = 0.3)]
    release: f64,

    /// Curve exponent for every envelope segment (1.0 = linear)
    #[arg(long, default_value_t = 1.0)]
    curve: f64,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum WaveArg {
    Sine,
    Square,
    Saw,
    Triangle,
}

impl From<WaveArg> for Waveform {
    fn from(arg: WaveArg) -> Self {
        match arg {
            WaveArg::Sine => Waveform::Sine,
            WaveArg::Square => Waveform::Square,
            WaveArg::Saw => Waveform::Saw,
            WaveArg::Triangle => Waveform::Triangle,
        }
    }
}

impl Cli {
    fn config(&self) -> SynthConfig {
        SynthConfig {
            voices: self.voices,
            waveform: self.waveform.into(),
            envelope: AdsrParams::linear(self.attack, self.decay, self.sustain, self.release)
                .with_curve(self.curve),
            ..Default::default()
        }
    }
}

/// Library debug events fire inside the audio callback (voice steals,
/// all-notes-off). The writer below locks and blocks, so they stay off unless
/// `RUST_LOG` asks for them.
const DEFAULT_LOG_FILTER: &str = "saavy=info,saavy_voice=info";

/// The terminal owns stdout, so logs only go to a file.
fn init_logging(path: &PathBuf) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let config = cli.config();
    config.validate().wrap_err("invalid synth settings")?;

    Saavy::new(config).run()
}
