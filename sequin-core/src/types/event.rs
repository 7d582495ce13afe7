//! Event payloads stored in sequences.
//!
//! The set of payloads is closed: note messages, rhythm pulses and opaque
//! markers. Ramps and melody layering only need to read or rewrite an
//! optional intensity, exposed through [`Event::intensity`] and
//! [`Event::set_intensity`].

use std::fmt;

/// MIDI-style pitch number (60 = middle C)
pub type NoteNumber = u8;

/// An ordered group of pitches, e.g. a melody line or a chord voicing
pub type NoteGroup = Vec<NoteNumber>;

/// Velocity given to pulses generated by subdivision helpers
pub const DEFAULT_VELOCITY: u8 = 100;

/// Highest value an intensity can take (7-bit MIDI range)
pub const MAX_INTENSITY: u8 = 127;

/// A note-on or note-off message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Pitch number (0-127)
    pub note: NoteNumber,
    /// Channel (0-15)
    pub channel: u8,
    /// Velocity (0-127)
    pub velocity: u8,
    /// true for note-on, false for note-off
    pub on: bool,
}

impl Note {
    /// Create a note-on message
    pub fn on(note: NoteNumber, channel: u8, velocity: u8) -> Self {
        Note {
            note,
            channel,
            velocity,
            on: true,
        }
    }

    /// Create a note-off message
    pub fn off(note: NoteNumber, channel: u8) -> Self {
        Note {
            note,
            channel,
            velocity: 0,
            on: false,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.on {
            write!(
                f,
                "note-on {} ch{} vel{}",
                self.note, self.channel, self.velocity
            )
        } else {
            write!(f, "note-off {} ch{}", self.note, self.channel)
        }
    }
}

/// A payload placed in a sequence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A note-on or note-off message
    Note(Note),
    /// A rhythm pulse carrying a velocity
    Pulse(u8),
    /// Opaque caller payload without an intensity
    Marker(String),
}

impl Event {
    /// Rhythm pulse at the default velocity
    pub fn pulse() -> Self {
        Event::Pulse(DEFAULT_VELOCITY)
    }

    /// Opaque marker payload
    pub fn marker(label: impl Into<String>) -> Self {
        Event::Marker(label.into())
    }

    /// The intensity (velocity) field, if this payload has one
    pub fn intensity(&self) -> Option<u8> {
        match self {
            Event::Note(note) => Some(note.velocity),
            Event::Pulse(velocity) => Some(*velocity),
            Event::Marker(_) => None,
        }
    }

    /// Overwrite the intensity field. Returns false when the payload has none.
    pub fn set_intensity(&mut self, value: u8) -> bool {
        match self {
            Event::Note(note) => {
                note.velocity = value;
                true
            }
            Event::Pulse(velocity) => {
                *velocity = value;
                true
            }
            Event::Marker(_) => false,
        }
    }

    /// Borrow the note message, if this is one
    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Event::Note(note) => Some(note),
            _ => None,
        }
    }
}

impl From<Note> for Event {
    fn from(note: Note) -> Self {
        Event::Note(note)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Note(note) => write!(f, "{}", note),
            Event::Pulse(velocity) => write!(f, "pulse vel{}", velocity),
            Event::Marker(label) => write!(f, "marker {:?}", label),
        }
    }
}
