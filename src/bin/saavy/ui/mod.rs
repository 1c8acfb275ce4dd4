//! TUI module for saavy
//!
//! Turns key presses into note messages and shows what the pool is doing.

mod header;
pub mod state;
mod voices;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use saavy_voice::synth::SynthMessage;
use std::time::Duration;
use tracing::{info, warn};

pub use state::{SessionInfo, SlotState, VoiceSnapshot};

use crate::keyboard::Keyboard;
use header::{render_header, AudioStats};
use voices::render_voices;
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    /// Ring buffer sender for note events
    control_tx: Producer<SynthMessage>,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Ring buffer receiver for pool snapshots
    snapshot_rx: Consumer<VoiceSnapshot>,
    session: SessionInfo,
    /// Latest snapshot received
    snapshot: VoiceSnapshot,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    keyboard: Keyboard,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    /// Create a new UI application
    pub fn new(
        control_tx: Producer<SynthMessage>,
        audio_rx: Consumer<f32>,
        snapshot_rx: Consumer<VoiceSnapshot>,
        session: SessionInfo,
    ) -> Self {
        Self {
            control_tx,
            audio_rx,
            snapshot_rx,
            session,
            snapshot: VoiceSnapshot::default(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            keyboard: Keyboard::new(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_snapshots();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        // leave nothing latched in the audio thread
        self.send(SynthMessage::AllNotesOff);
        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        // Read as many samples as available, keeping last VIS_BUFFER_SIZE
        let mut new_samples = Vec::new();
        while let Ok(sample) = self.audio_rx.pop() {
            new_samples.push(sample);
        }

        if !new_samples.is_empty() {
            self.audio_buffer.extend(new_samples);
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
        }
    }

    /// Keep only the latest snapshot
    fn poll_snapshots(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.pop() {
            self.snapshot = snapshot;
        }
    }

    /// Queue `msg` for the audio thread. The keyboard latch only follows
    /// messages that were actually queued.
    fn send(&mut self, msg: SynthMessage) {
        if self.control_tx.push(msg).is_ok() {
            self.keyboard.apply(msg);
        } else {
            warn!(?msg, "control queue full, dropping message");
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                info!(latched = self.keyboard.held_count(), "quit requested");
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.send(SynthMessage::AllNotesOff),
            KeyCode::Char('z') | KeyCode::Left => self.keyboard.octave_down(),
            KeyCode::Char('x') | KeyCode::Right => self.keyboard.octave_up(),
            KeyCode::Char(c) => {
                if let Some(msg) = self.keyboard.message_for(c) {
                    self.send(msg);
                }
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let table_height = self.snapshot.num_slots.max(1) as u16 + 3;

        // Main layout: header, voice table, waveform, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Header
                Constraint::Length(table_height), // Voice slots
                Constraint::Min(6),               // Waveform
                Constraint::Length(1),            // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_header(
            frame,
            chunks[0],
            &self.session,
            &self.snapshot,
            self.keyboard.base(),
            &stats,
        );
        render_voices(frame, chunks[1], &self.snapshot);
        render_waveform(frame, chunks[2], &self.audio_buffer);

        let help = ratatui::widgets::Paragraph::new(
            " [a-'] Toggle note  [Space] All off  [Z/X] Octave  [Q] Quit",
        )
        .style(ratatui::style::Style::default().fg(ratatui::style::Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
