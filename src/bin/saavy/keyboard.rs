//! Computer keyboard to note mapping
//!
//! Terminals report key presses but not releases, so every key latches:
//! first press starts the note, second press releases it.

use saavy_voice::synth::SynthMessage;

/// Two rows laid out like a piano, starting at C.
///
///   w e   t y u   o p
///  a s d f g h j k l ; '
const LAYOUT: [(char, i32); 18] = [
    ('a', 0),
    ('w', 1),
    ('s', 2),
    ('e', 3),
    ('d', 4),
    ('f', 5),
    ('t', 6),
    ('g', 7),
    ('y', 8),
    ('h', 9),
    ('u', 10),
    ('j', 11),
    ('k', 12),
    ('o', 13),
    ('l', 14),
    ('p', 15),
    (';', 16),
    ('\'', 17),
];

const NOTE_COUNT: usize = 128;
const LOWEST_BASE: i32 = 12;
const HIGHEST_BASE: i32 = 108;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Note name with octave, middle C (60) = C4.
pub fn note_name(note: i32) -> String {
    let name = NAMES[note.rem_euclid(12) as usize];
    let octave = note.div_euclid(12) - 1;
    format!("{name}{octave}")
}

pub struct Keyboard {
    base: i32,
    latched: [bool; NOTE_COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            base: 60,
            latched: [false; NOTE_COUNT],
        }
    }

    /// Message that toggles the note under `key`, if the key is mapped.
    ///
    /// Does not change the latch; call [`Keyboard::apply`] once the message
    /// has actually been queued.
    pub fn message_for(&self, key: char) -> Option<SynthMessage> {
        let offset = LAYOUT
            .iter()
            .find(|(k, _)| *k == key.to_ascii_lowercase())
            .map(|&(_, offset)| offset)?;
        let note = self.base + offset;
        let held = *self.latched.get(usize::try_from(note).ok()?)?;

        Some(if held {
            SynthMessage::NoteOff { note }
        } else {
            SynthMessage::NoteOn { note, velocity: 100 }
        })
    }

    /// Record a message that reached the audio thread.
    pub fn apply(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, .. } => self.set_latch(note, true),
            SynthMessage::NoteOff { note } => self.set_latch(note, false),
            SynthMessage::AllNotesOff => self.latched = [false; NOTE_COUNT],
        }
    }

    fn set_latch(&mut self, note: i32, held: bool) {
        if let Some(latch) = usize::try_from(note)
            .ok()
            .and_then(|n| self.latched.get_mut(n))
        {
            *latch = held;
        }
    }

    pub fn octave_up(&mut self) {
        self.base = (self.base + 12).min(HIGHEST_BASE);
    }

    pub fn octave_down(&mut self) {
        self.base = (self.base - 12).max(LOWEST_BASE);
    }

    /// Lowest note on the keyboard (the `a` key).
    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn held_count(&self) -> usize {
        self.latched.iter().filter(|&&held| held).count()
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Press a key and pretend the queue accepted the message.
    fn press(kb: &mut Keyboard, key: char) -> Option<SynthMessage> {
        let msg = kb.message_for(key)?;
        kb.apply(msg);
        Some(msg)
    }

    #[test]
    fn keys_latch() {
        let mut kb = Keyboard::new();
        assert_eq!(
            press(&mut kb, 'a'),
            Some(SynthMessage::NoteOn { note: 60, velocity: 100 })
        );
        assert_eq!(press(&mut kb, 'h'), Some(SynthMessage::NoteOn { note: 69, velocity: 100 }));
        assert_eq!(kb.held_count(), 2);
        assert_eq!(press(&mut kb, 'A'), Some(SynthMessage::NoteOff { note: 60 }));
        assert_eq!(kb.held_count(), 1);
    }

    #[test]
    fn unsent_message_leaves_latch_alone() {
        let mut kb = Keyboard::new();
        // queue full: message built but never applied
        assert_eq!(
            kb.message_for('a'),
            Some(SynthMessage::NoteOn { note: 60, velocity: 100 })
        );
        assert_eq!(kb.held_count(), 0);
        // the retry is still a note on
        assert_eq!(
            kb.message_for('a'),
            Some(SynthMessage::NoteOn { note: 60, velocity: 100 })
        );

        press(&mut kb, 'a');
        assert_eq!(kb.message_for('a'), Some(SynthMessage::NoteOff { note: 60 }));
        assert_eq!(kb.held_count(), 1);
    }

    #[test]
    fn unmapped_key_is_ignored() {
        let mut kb = Keyboard::new();
        assert_eq!(press(&mut kb, 'm'), None);
        assert_eq!(kb.held_count(), 0);
    }

    #[test]
    fn octave_shift_is_clamped() {
        let mut kb = Keyboard::new();
        for _ in 0..10 {
            kb.octave_up();
        }
        assert_eq!(kb.base(), HIGHEST_BASE);
        assert_eq!(
            press(&mut kb, '\''),
            Some(SynthMessage::NoteOn { note: 125, velocity: 100 })
        );
        for _ in 0..10 {
            kb.octave_down();
        }
        assert_eq!(kb.base(), LOWEST_BASE);
    }

    #[test]
    fn all_notes_off_clears_latches() {
        let mut kb = Keyboard::new();
        press(&mut kb, 'a');
        press(&mut kb, 'd');
        kb.apply(SynthMessage::AllNotesOff);
        assert_eq!(kb.held_count(), 0);
        assert_eq!(press(&mut kb, 'a'), Some(SynthMessage::NoteOn { note: 60, velocity: 100 }));
    }

    #[test]
    fn names() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(-1), "B-2");
    }
}
