//! Real-time playback of sequences
//!
//! A single producer thread walks the timed event list and sends each payload
//! on a bounded channel when its deadline arrives. Deadlines are absolute,
//! measured from one start instant, so sleeps never accumulate drift. The
//! consumer reads from the returned [`Playback`] handle on its own thread.

use super::config::{strip_nul, PlaybackConfig};
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender};
use sequin_core::{Event, Pattern, Sequence, TimedEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Summary of a finished playback run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackReport {
    /// Events handed to the consumer
    pub emitted: usize,
    /// Emissions that landed later than the configured tolerance
    pub late: usize,
    /// Largest lateness observed
    pub max_skew: Duration,
    /// Playback ended before the last event (stop request or consumer gone)
    pub cancelled: bool,
}

/// Handle to a running playback
///
/// Dropping the handle stops the producer and waits for it to exit.
pub struct Playback {
    events: Receiver<Event>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<PlaybackReport>>,
}

impl Playback {
    /// The output queue. It closes after the last event.
    pub fn receiver(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Block until the next event, or `None` once playback is over
    pub fn recv(&self) -> Option<Event> {
        self.events.recv().ok()
    }

    /// Iterate events as they are emitted
    pub fn iter(&self) -> crossbeam_channel::Iter<'_, Event> {
        self.events.iter()
    }

    /// Ask the producer to stop before its next sleep or send
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Check if the producer has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Stop receiving and wait for the producer's report.
    ///
    /// Events not yet received are discarded; drain [`Playback::iter`] first
    /// to consume a complete run.
    pub fn join(mut self) -> Result<PlaybackReport> {
        // A producer sleeping toward a future deadline only sees the stop flag
        self.stop();
        drop(std::mem::replace(&mut self.events, crossbeam_channel::never()));
        let thread = self
            .thread
            .take()
            .ok_or_else(|| anyhow!("playback thread already joined"))?;
        thread
            .join()
            .map_err(|_| anyhow!("playback thread panicked"))
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Play a sequence with the default configuration. `unit` is the duration of
/// one position unit.
pub fn play(sequence: &Sequence, unit: Duration) -> Result<Playback> {
    play_with_config(sequence, unit, PlaybackConfig::default())
}

/// Play a sequence. The timed event list is computed before this returns, so
/// later edits to `sequence` do not affect the running playback.
pub fn play_with_config(
    sequence: &Sequence,
    unit: Duration,
    config: PlaybackConfig,
) -> Result<Playback> {
    let timed = sequence.event_list(unit);
    let (tx, rx) = bounded(config.queue_capacity);
    let stop = Arc::new(AtomicBool::new(false));

    log::debug!(
        "starting playback of {} events ({:?} per unit)",
        timed.len(),
        unit
    );

    let producer = Producer {
        timed,
        tx,
        stop: stop.clone(),
        start: Instant::now(),
        config: config.clone(),
    };
    let thread = thread::Builder::new()
        .name(strip_nul(&config.thread_name))
        .spawn(move || producer.run())
        .context("Failed to spawn playback thread")?;

    Ok(Playback {
        events: rx,
        stop,
        thread: Some(thread),
    })
}

/// Playback entry points as methods
pub trait Play {
    /// Play with the default configuration
    fn play(&self, unit: Duration) -> Result<Playback> {
        self.play_with_config(unit, PlaybackConfig::default())
    }

    /// Play with an explicit configuration
    fn play_with_config(&self, unit: Duration, config: PlaybackConfig) -> Result<Playback>;
}

impl Play for Sequence {
    fn play_with_config(&self, unit: Duration, config: PlaybackConfig) -> Result<Playback> {
        play_with_config(self, unit, config)
    }
}

impl Play for Pattern {
    fn play_with_config(&self, unit: Duration, config: PlaybackConfig) -> Result<Playback> {
        let sequence = Sequence::from_pattern(self)?;
        play_with_config(&sequence, unit, config)
    }
}

/// Producer side, owned by the playback thread
struct Producer {
    timed: Vec<TimedEvent>,
    tx: Sender<Event>,
    stop: Arc<AtomicBool>,
    start: Instant,
    config: PlaybackConfig,
}

impl Producer {
    fn run(self) -> PlaybackReport {
        let mut report = PlaybackReport::default();
        let total = self.timed.len();

        for timed in &self.timed {
            let Some(deadline) = self.start.checked_add(timed.offset) else {
                log::warn!(
                    "event at position {} is too far in the future, ending playback",
                    timed.event.position()
                );
                report.cancelled = true;
                break;
            };

            if !self.sleep_until(deadline) || !self.send(timed.event.event.clone()) {
                report.cancelled = true;
                break;
            }

            let skew = Instant::now().saturating_duration_since(deadline);
            report.max_skew = report.max_skew.max(skew);
            if skew > self.config.late_tolerance {
                report.late += 1;
                log::warn!(
                    "event at position {} emitted {:?} late",
                    timed.event.position(),
                    skew
                );
            }
            report.emitted += 1;
        }

        if report.cancelled {
            log::debug!("playback cancelled after {} of {} events", report.emitted, total);
        } else {
            log::debug!(
                "playback finished: {} events, {} late, max skew {:?}",
                report.emitted,
                report.late,
                report.max_skew
            );
        }
        // Dropping `self.tx` closes the consumer's queue
        report
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Sleep until `deadline`, checking for a stop request between sleeps.
    /// Returns immediately when the deadline has already passed.
    fn sleep_until(&self, deadline: Instant) -> bool {
        loop {
            if self.stopped() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(self.config.poll_interval));
        }
    }

    /// Hand an event to the consumer, waiting while the queue is full
    fn send(&self, mut event: Event) -> bool {
        loop {
            if self.stopped() {
                return false;
            }
            match self.tx.send_timeout(event, self.config.poll_interval) {
                Ok(()) => return true,
                Err(SendTimeoutError::Timeout(returned)) => event = returned,
                Err(SendTimeoutError::Disconnected(_)) => {
                    log::debug!("playback consumer hung up");
                    return false;
                }
            }
        }
    }
}
