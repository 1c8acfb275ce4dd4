//! Voice slot table - which note each pool slot is playing

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use saavy_voice::dsp::envelope::EnvelopeStage;

use super::{SlotState, VoiceSnapshot};
use crate::keyboard::note_name;

const METER_WIDTH: usize = 16;

fn stage_label(stage: Option<EnvelopeStage>) -> (&'static str, Color) {
    match stage {
        None | Some(EnvelopeStage::Idle) => ("idle", Color::DarkGray),
        Some(EnvelopeStage::Attack) => ("attack", Color::Green),
        Some(EnvelopeStage::Decay) => ("decay", Color::LightGreen),
        Some(EnvelopeStage::Sustain) => ("sustain", Color::Cyan),
        Some(EnvelopeStage::Release) => ("release", Color::Yellow),
    }
}

fn meter(level: f32) -> String {
    let filled = ((level.clamp(0.0, 1.0) * METER_WIDTH as f32).round()) as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(METER_WIDTH - filled))
}

fn slot_row(slot: usize, state: &SlotState) -> Row<'static> {
    let (stage, color) = stage_label(state.stage);
    let note = state
        .note
        .map(|n| format!("{n:>3} {}", note_name(n)))
        .unwrap_or_else(|| "  -".to_string());
    let order = match state.press_rank {
        Some(0) => "newest".to_string(),
        Some(rank) => format!("#{rank}"),
        None => String::new(),
    };

    Row::new(vec![
        Cell::from(format!("{slot:>2}")),
        Cell::from(note),
        Cell::from(stage).style(Style::default().fg(color)),
        Cell::from(meter(state.level)).style(Style::default().fg(color)),
        Cell::from(order),
    ])
}

/// Render the pool slots, oldest held note marked as next to be stolen
pub fn render_voices(frame: &mut Frame, area: Rect, snapshot: &VoiceSnapshot) {
    let count = snapshot.num_slots as usize;
    let oldest = snapshot.held.checked_sub(1);

    let rows = snapshot.slots[..count]
        .iter()
        .enumerate()
        .map(|(slot, state)| {
            let row = slot_row(slot, state);
            if state.press_rank.is_some() && state.press_rank == oldest && count > 1 {
                row.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                row
            }
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(METER_WIDTH as u16 + 1),
            Constraint::Min(6),
        ],
    )
    .header(
        Row::new(vec!["slot", "note", "stage", "level", "order"])
            .style(Style::default().fg(Color::DarkGray)),
    )
    .block(Block::default().title(" Voices ").borders(Borders::ALL));

    frame.render_widget(table, area);
}
