//! Waveform oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Vertical half-range for the scope: at least 1.0, wider when the unclipped
/// mix goes past full scale.
fn y_bound(audio_buffer: &[f32]) -> f64 {
    audio_buffer
        .iter()
        .fold(1.0f32, |acc, &x| acc.max(x.abs())) as f64
}

/// Render the mixed output before the device clamp. The pool sums voices, so
/// the vertical range grows with the peak instead of clipping the trace at ±1.
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL);

    let peak = y_bound(audio_buffer);

    // Convert audio samples to chart data points
    let data: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / audio_buffer.len() as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-peak, peak])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
