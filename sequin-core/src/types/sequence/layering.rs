//! Melody and chord layering over a rhythm.

use super::core::Sequence;
use crate::error::{Result, SequenceError};
use crate::types::event::{Note, NoteGroup, NoteNumber, MAX_INTENSITY};
use crate::types::pattern::Pattern;
use crate::types::ramp::saturating_cast;

/// Highest MIDI channel number (channels are 0-15)
const MAX_CHANNEL: u8 = 15;

/// One looked-up step of a rhythm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhythmStep {
    /// Where the step starts, including loop offsets
    pub position: f64,
    /// How long the step is held; zero is a rest
    pub length: f64,
    /// Velocity for the notes placed on this step
    pub velocity: Option<u8>,
}

/// Anything that can drive melody layering with a looping list of steps
pub trait Rhythm {
    /// The step at logical index `i`, looping as the rhythm repeats
    fn rhythm_step(&self, i: usize) -> Result<RhythmStep>;
}

impl Rhythm for Sequence {
    fn rhythm_step(&self, i: usize) -> Result<RhythmStep> {
        let event = self.get(i)?;
        Ok(RhythmStep {
            position: event.position(),
            length: event.length(),
            velocity: event.event.intensity(),
        })
    }
}

impl Rhythm for Pattern {
    fn rhythm_step(&self, i: usize) -> Result<RhythmStep> {
        let pulse = self.get(i)?;
        let velocity: u8 = saturating_cast(pulse.value as f64);
        Ok(RhythmStep {
            position: pulse.start,
            length: pulse.duration,
            velocity: Some(velocity.min(MAX_INTENSITY)),
        })
    }
}

fn check_channel(channel: u8) -> Result<u8> {
    if channel <= MAX_CHANNEL {
        Ok(channel)
    } else {
        Err(SequenceError::invalid_argument(format!(
            "channel must be within 0-{}, got {}",
            MAX_CHANNEL, channel
        )))
    }
}

impl Sequence {
    /// Layer a melody over a rhythm.
    ///
    /// Pitch `i` is played on rhythm step `i` (looping the rhythm as needed):
    /// a note-on at the step position and a note-off when the step ends, at
    /// the step's velocity. Rests (zero-length steps) consume a pitch without
    /// sounding it.
    pub fn add_rhythmic_melody<R: Rhythm + ?Sized>(
        &mut self,
        rhythm: &R,
        pitches: &[NoteNumber],
        channel: u8,
    ) -> Result<&mut Self> {
        let chords: Vec<NoteGroup> = pitches.iter().map(|&pitch| vec![pitch]).collect();
        self.add_rhythmic_chords(rhythm, &chords, channel)
    }

    /// Layer a chord progression over a rhythm. Every pitch of chord `i`
    /// sounds on rhythm step `i`.
    pub fn add_rhythmic_chords<R: Rhythm + ?Sized>(
        &mut self,
        rhythm: &R,
        chords: &[NoteGroup],
        channel: u8,
    ) -> Result<&mut Self> {
        let channel = check_channel(channel)?;

        // Look up every step first so a failure leaves the sequence untouched
        let steps = (0..chords.len())
            .map(|i| rhythm.rhythm_step(i))
            .collect::<Result<Vec<_>>>()?;

        for (step, chord) in steps.iter().zip(chords) {
            let velocity = match step.velocity {
                Some(velocity) if step.length > 0.0 => velocity,
                _ => continue,
            };
            let on = step.position;
            let off = step.position + step.length;
            for &pitch in chord {
                self.add(on, Note::on(pitch, channel, velocity))?;
                self.add(off, Note::off(pitch, channel))?;
            }
        }
        Ok(self)
    }
}
