//! # Sequin
//!
//! Sequin is a Rust library for generative composition: it builds sequences
//! of notes and rhythm pulses at dimensionless positions and plays them back
//! in real time, converting positions into wall-clock deadlines.
//!
//! ## Modules
//!
//! - `playback`: The producer thread that emits events on a bounded channel
//!   at their deadlines, with cancellation and skew reporting.
//! - The sequencing types (`Sequence`, `Pattern`, `Event`, ...) live in
//!   `sequin-core` and are re-exported here.
//!
//! ## Example
//!
//! ```no_run
//! use sequin::{Event, Play, Sequence};
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut seq = Sequence::new(1.0)?;
//! seq.add_subdivisions(4, 1.0, 0.5)?;
//! seq.add(0.0, Event::marker("bar"))?;
//!
//! let playback = seq.play(Duration::from_secs(2))?;
//! for event in playback.iter() {
//!     println!("{}", event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod playback;

// Re-export commonly used types and functions for convenience
pub use crate::playback::{play, play_with_config, Play, Playback, PlaybackConfig, PlaybackReport};
pub use sequin_core::{
    Event, Note, NoteGroup, NoteNumber, Pattern, PatternEvent, Rhythm, RhythmStep, Sequence,
    SequenceError, SequenceEvent, TimedEvent, DEFAULT_VELOCITY,
};
