//! Header bar widget - shows patch settings, keyboard octave, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{SessionInfo, VoiceSnapshot};
use crate::keyboard::note_name;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the header bar
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    session: &SessionInfo,
    snapshot: &VoiceSnapshot,
    keyboard_base: i32,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" saavy ").borders(Borders::ALL);

    let env = &session.envelope;
    let line = Line::from(vec![
        Span::styled(
            format!(" {:?}  ", session.waveform),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "A {:.0}ms D {:.0}ms S {:.2} R {:.0}ms  ",
                env.attack * 1000.0,
                env.decay * 1000.0,
                env.sustain,
                env.release * 1000.0
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "Voices {}/{} held, {} sounding  ",
                snapshot.held, session.voices, snapshot.sounding
            ),
            Style::default().fg(if snapshot.held as usize >= session.voices {
                Color::Yellow
            } else {
                Color::Green
            }),
        ),
        Span::styled(
            format!("Keys from {}  ", note_name(keyboard_base)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz {}ch  ", session.sample_rate / 1000.0, session.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_square_wave() {
        let stats = AudioStats::from_buffer(&[0.5, -0.5, 0.5, -0.5]);
        assert_eq!(stats.peak, 0.5);
        assert!((stats.rms - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stats_of_empty_buffer() {
        let stats = AudioStats::from_buffer(&[]);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.rms, 0.0);
    }
}
