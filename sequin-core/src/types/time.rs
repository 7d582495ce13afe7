//! Conversion from dimensionless positions to wall-clock offsets.

use super::sequence::SequenceEvent;
use std::time::Duration;

/// A sequence event with its position resolved to an offset from playback start
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    /// Delay from playback start
    pub offset: Duration,
    /// The positioned event this offset was computed from
    pub event: SequenceEvent,
}

/// Scale a position by `unit`, the duration of one position unit.
///
/// Positions are validated on insertion, so the only failure left is an
/// offset too large to represent, which saturates at `Duration::MAX`.
pub fn position_to_offset(position: f64, unit: Duration) -> Duration {
    Duration::try_from_secs_f64(position * unit.as_secs_f64()).unwrap_or(Duration::MAX)
}
