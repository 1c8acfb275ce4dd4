use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::synth::{factory::VoiceFactory, voice::Voice};

/*
Voice Pool
==========

A fixed set of N voices shared by every incoming note. The pool decides which
voice plays which note, and which sounding note to sacrifice when more notes
are held than there are voices.

Bookkeeping
-----------

Three structures, each sized N at construction and never grown:

  notes[i]     note assigned to voice i, or None when the slot is free

  pressed      slots currently held, newest at the FRONT
                 [ newest ... oldest ]

  available    free slots, most recently freed at the BACK
                 [ ... freed-last ]
               A fresh pool starts as [N-1, ..., 1, 0] so slot 0 goes first.

Every slot is in exactly one of `pressed` / `available`.

Pressing a note
---------------

  1. No free slot? Steal: pop the BACK of `pressed` (the longest-held note),
     clear its note and push it onto the FRONT of `available`.
  2. Pop a slot from the BACK of `available`, so the voice freed most
     recently is reused first.
  3. Push that slot onto the FRONT of `pressed`.
  4. Record the note, then set_frequency → trigger → gate(true).

The victim in step 1 is not sent gate(false). Its envelope is simply
retriggered in step 4, which can click. That is the accepted cost of
hard stealing.

Releasing a note
----------------

Every slot holding the note gets gate(false), loses its note, moves to the
FRONT of `available` and leaves `pressed`. The slot is reusable immediately,
while its release tail may still be sounding: reuse under pressure cuts the
tail short.

Example with N = 2:

    (start)      pressed []       available [1, 0]     notes [ -, -]
    press 60     pressed [0]      available [1]        notes [60, -]
    press 64     pressed [1, 0]   available []         notes [60, 64]
    release 60   pressed [1]      available [0]        notes [ -, 64]
    press 67     pressed [0, 1]   available []         notes [67, 64]
    press 72     steal slot 1 (64 is the oldest held)  notes [67, 72]

Mixing
------

`generate` sums every voice whose `is_done()` is false. O(N), no allocation,
no branching on note identity.
*/

/// A4 = 440 Hz at note 69, twelve equal steps per octave.
///
/// Any integer is accepted; far out-of-range notes give inaudible or absurd
/// frequencies.
#[inline]
pub fn note_to_freq(note: i32) -> f64 {
    440.0 * 2.0_f64.powf((note - 69) as f64 / 12.0)
}

/// Result of a successful [`VoicePool::note_press`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressOutcome {
    /// Slot now playing the note.
    pub slot: usize,
    /// Note that was evicted to make room, if the pool was full.
    pub stolen: Option<i32>,
}

pub struct VoicePool<V: Voice> {
    voices: Vec<V>,
    notes: Vec<Option<i32>>,
    pressed: VecDeque<usize>,
    available: VecDeque<usize>,
}

impl<V: Voice + Default> VoicePool<V> {
    /// Create a pool of `capacity` default-constructed voices.
    pub fn new(capacity: usize) -> Self {
        Self::with_voices((0..capacity).map(|_| V::default()).collect())
    }
}

impl<V: Voice> VoicePool<V> {
    /// Create a pool of `capacity` voices built by `factory`.
    pub fn from_factory<F>(capacity: usize, factory: F) -> Self
    where
        F: VoiceFactory<Voice = V>,
    {
        Self::with_voices((0..capacity).map(|_| factory.create_voice()).collect())
    }

    /// Take ownership of pre-built voices; capacity is `voices.len()`.
    pub fn with_voices(voices: Vec<V>) -> Self {
        let capacity = voices.len();
        // reversed so a fresh pool hands out slot 0 first
        let mut available = VecDeque::with_capacity(capacity);
        available.extend((0..capacity).rev());

        Self {
            voices,
            notes: vec![None; capacity],
            pressed: VecDeque::with_capacity(capacity),
            available,
        }
    }

    /// Assign `note` to a voice and start it.
    ///
    /// Returns `None` only for a zero-capacity pool.
    pub fn note_press(&mut self, note: i32) -> Option<PressOutcome> {
        let mut stolen = None;

        if self.available.is_empty() {
            if let Some(victim) = self.pressed.pop_back() {
                stolen = self.notes[victim].take();
                self.available.push_front(victim);
                debug!(victim, ?stolen, note, "stealing longest-held voice");
            }
        }

        let slot = self.available.pop_back()?;
        self.pressed.push_front(slot);
        self.notes[slot] = Some(note);

        let voice = &mut self.voices[slot];
        voice.set_frequency(note_to_freq(note));
        voice.trigger();
        voice.gate(true);

        trace!(note, slot, "note pressed");
        Some(PressOutcome { slot, stolen })
    }

    /// Release every voice holding `note`. Returns how many were released.
    pub fn note_release(&mut self, note: i32) -> usize {
        let mut released = 0;

        while let Some(slot) = self.slot_of(note) {
            self.voices[slot].gate(false);
            self.notes[slot] = None;
            self.available.push_front(slot);
            if let Some(pos) = self.pressed.iter().position(|&s| s == slot) {
                self.pressed.remove(pos);
            }
            released += 1;
        }

        trace!(note, released, "note released");
        released
    }

    /// Release every held note, longest-held first.
    pub fn all_notes_off(&mut self) {
        let mut count = 0;
        while let Some(&slot) = self.pressed.back() {
            match self.notes[slot] {
                Some(note) => count += self.note_release(note),
                // a pressed slot always carries a note; drop it if not
                None => {
                    self.pressed.pop_back();
                    self.available.push_front(slot);
                }
            }
        }
        debug!(count, "all notes off");
    }

    /// Mix one sample from every sounding voice.
    #[inline]
    pub fn generate(&mut self) -> f32 {
        let mut mix = 0.0;
        for voice in self.voices.iter_mut() {
            if !voice.is_done() {
                mix += voice.generate();
            }
        }
        mix
    }

    /// Fill a block, one `generate` per sample.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.generate();
        }
    }

    /// Forward a host sample-rate change to every voice.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        for voice in self.voices.iter_mut() {
            voice.set_sample_rate(sample_rate);
        }
    }

    pub fn capacity(&self) -> usize {
        self.voices.len()
    }

    /// Note per slot, `None` for free slots.
    pub fn notes(&self) -> &[Option<i32>] {
        &self.notes
    }

    pub fn note_at(&self, slot: usize) -> Option<i32> {
        self.notes.get(slot).copied().flatten()
    }

    /// First slot holding `note`.
    pub fn slot_of(&self, note: i32) -> Option<usize> {
        self.notes.iter().position(|&n| n == Some(note))
    }

    /// Held slots, newest first.
    pub fn pressed(&self) -> impl Iterator<Item = usize> + '_ {
        self.pressed.iter().copied()
    }

    /// Free slots; the last one is handed out next.
    pub fn available(&self) -> impl Iterator<Item = usize> + '_ {
        self.available.iter().copied()
    }

    /// Voices still producing sound (held or in their release tail).
    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| !v.is_done()).count()
    }

    pub fn voice(&self, slot: usize) -> Option<&V> {
        self.voices.get(slot)
    }

    pub fn voice_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.voices.get_mut(slot)
    }

    pub fn voices(&self) -> &[V] {
        &self.voices
    }
}
