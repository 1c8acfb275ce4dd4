//! Simple polyphony walkthrough: chord, voice stealing, release tail.
//!
//! Run with: cargo run --example simple_poly

use rtrb::RingBuffer;
use saavy_voice::{
    dsp::{envelope::AdsrParams, wavetable::Wavetable},
    synth::{PolySynth, SynthMessage, SynthVoice, VoicePool},
};

fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

fn main() {
    println!("=== Simple Polyphony Example ===\n");

    let sample_rate = 48_000.0;
    let max_voices = 3;

    // Create message queue
    let (mut tx, rx) = RingBuffer::<SynthMessage>::new(64);

    // Every slot gets the same patch: saw through a 50ms/100ms/60%/200ms ADSR
    let params = AdsrParams::linear(0.05, 0.1, 0.6, 0.2);
    let factory = || SynthVoice::with_params(Wavetable::Saw, params, sample_rate);

    let pool = VoicePool::from_factory(max_voices, factory);
    let mut poly = PolySynth::new(pool, rx);
    println!("Created pool with {} voices\n", max_voices);

    println!("Playing C major chord:");
    for note in [60, 64, 67] {
        println!("  Note On: {}", note);
        let _ = tx.push(SynthMessage::NoteOn { note, velocity: 100 });
    }

    let mut buffer = vec![0.0; 4800];
    poly.render_block(&mut buffer);
    println!("\nRendered {} samples, peak {:.3}", buffer.len(), peak(&buffer));
    println!("Slots: {:?}", poly.pool().notes());

    // Pool is full, the oldest held note gives up its slot
    println!("\nNote On: 72 (pool full)");
    let _ = tx.push(SynthMessage::NoteOn { note: 72, velocity: 100 });
    poly.render_block(&mut buffer);
    println!("Slots: {:?}", poly.pool().notes());

    println!("\nReleasing 64");
    let _ = tx.push(SynthMessage::NoteOff { note: 64 });
    poly.render_block(&mut buffer);
    println!(
        "Slots: {:?}, {} voices still sounding",
        poly.pool().notes(),
        poly.pool().active_count()
    );

    println!("\nAll notes off");
    let _ = tx.push(SynthMessage::AllNotesOff);
    for _ in 0..3 {
        poly.render_block(&mut buffer);
    }
    println!(
        "Peak after release: {:.3}, {} voices sounding",
        peak(&buffer),
        poly.pool().active_count()
    );
}
