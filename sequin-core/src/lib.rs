//! # Sequin Core
//!
//! Thread-free core of the Sequin sequencing toolkit. Provides positioned
//! event containers, looping lookups, rhythmic patterns and value ramps,
//! without any playback or I/O dependencies.
//!
//! ## Features
//!
//! - **serde**: Derive `Serialize`/`Deserialize` on the data types
//! - **colored**: Enable colored terminal output for sequence listings
//!
//! ## Example
//!
//! ```
//! use sequin_core::{Event, Pattern, Sequence};
//!
//! # fn main() -> sequin_core::Result<()> {
//! let rhythm = Sequence::from_pattern(&Pattern::subdivisions(4, 0.5)?)?;
//! let mut melody = Sequence::new(1.0)?;
//! melody.add_rhythmic_melody(&rhythm, &[60, 62, 64, 65], 0)?;
//! assert_eq!(melody.len(), 8);
//!
//! melody.add(0.0, Event::marker("downbeat"))?;
//! let first = melody.get(0)?;
//! assert_eq!(first.position(), 0.0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SequenceError};
pub use types::{
    Event, Note, NoteGroup, NoteNumber, Pattern, PatternEvent, Rhythm, RhythmStep, Sequence,
    SequenceEvent, TimedEvent, DEFAULT_VELOCITY,
};
