//! Playback configuration
//!
//! Pure data describing how the producer thread schedules and hands off
//! events. Builder methods follow the `with_*` style used across the crate.

use std::time::Duration;

/// Events buffered between producer and consumer before the producer blocks
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// How often a waiting producer checks for a stop request
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Lateness above which an emission is logged and counted as late
pub const DEFAULT_LATE_TOLERANCE: Duration = Duration::from_millis(10);

/// Smallest accepted poll interval
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for a single playback run
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackConfig {
    /// Capacity of the bounded output queue (0 = hand off directly)
    pub queue_capacity: usize,
    /// Granularity of sleeps and blocked sends, bounding stop latency
    pub poll_interval: Duration,
    /// Skew beyond this is reported through `log::warn!`
    pub late_tolerance: Duration,
    /// Name given to the producer thread
    pub thread_name: String,
}

impl PlaybackConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            late_tolerance: DEFAULT_LATE_TOLERANCE,
            thread_name: "sequin-playback".to_string(),
        }
    }

    /// Set the output queue capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the poll interval (at least 1ms)
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Set the lateness tolerance
    pub fn with_late_tolerance(mut self, tolerance: Duration) -> Self {
        self.late_tolerance = tolerance;
        self
    }

    /// Set the producer thread name. NUL bytes are removed.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = strip_nul(&name.into());
        self
    }
}

/// Thread names cannot contain NUL bytes
pub(crate) fn strip_nul(name: &str) -> String {
    name.replace('\0', "")
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::new()
    }
}
