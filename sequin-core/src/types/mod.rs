// sequin-core/src/types/mod.rs

pub mod cursor;
pub mod event;
pub mod pattern;
pub mod ramp;
pub mod sequence;
pub mod time;

pub use cursor::{loop_index, LoopIndex};
pub use event::{Event, Note, NoteGroup, NoteNumber, DEFAULT_VELOCITY};
pub use pattern::{Pattern, PatternEvent};
pub use ramp::Ramp;
pub use sequence::{Rhythm, RhythmStep, Sequence, SequenceEvent};
pub use time::{position_to_offset, TimedEvent};
