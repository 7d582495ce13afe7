//! Sequence - positioned events with stable ordering and looped lookup.
//!
//! Events are appended with a dimensionless position and an insertion order.
//! A sorted view ordered by (position, insertion order) is rebuilt lazily
//! after any mutation, and [`Sequence::get`] reads that view as an endless
//! loop of `loop_length` position units.

mod core;
mod layering;


pub use self::core::{Sequence, SequenceEvent};
pub use layering::{Rhythm, RhythmStep};
