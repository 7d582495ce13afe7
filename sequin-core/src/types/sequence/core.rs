//! Core Sequence struct and implementation.

use crate::error::{check_length, check_loop_length, check_position, Result, SequenceError};
use crate::types::cursor::loop_index;
use crate::types::event::{Event, MAX_INTENSITY};
use crate::types::pattern::{check_duty, Pattern};
use crate::types::ramp::{saturating_cast, Ramp};
use crate::types::time::{position_to_offset, TimedEvent};
use rand::Rng;
use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

#[cfg(feature = "colored")]
use colored::*;

/// An event placed at a position in a sequence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceEvent {
    position: f64,
    order: u64,
    length: f64,
    /// The payload
    pub event: Event,
}

impl SequenceEvent {
    /// Dimensionless position relative to the start of the sequence
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Insertion order, used to break ties between simultaneous events
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Sustained events have a non-zero length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Where a sustained event ends
    pub fn end(&self) -> f64 {
        self.position + self.length
    }

    fn playback_cmp(&self, other: &Self) -> Ordering {
        self.position
            .partial_cmp(&other.position)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// An ordered collection of positioned events
///
/// The loop length is fixed at construction and is where [`Sequence::get`]
/// wraps back to position 0. Authoring and playback must not overlap: the
/// sorted view is an unsynchronized cache, so a `Sequence` is `Send` but
/// not `Sync`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    /// Events in the order they were added
    events: Vec<SequenceEvent>,
    loop_length: f64,
    next_order: u64,
    /// Indices into `events` in playback order; empty cell = dirty
    #[cfg_attr(feature = "serde", serde(skip))]
    sorted: OnceCell<Vec<usize>>,
}

impl Sequence {
    /// Create an empty sequence that loops every `loop_length`
    pub fn new(loop_length: f64) -> Result<Self> {
        Ok(Sequence {
            events: Vec::new(),
            loop_length: check_loop_length("loop length", loop_length)?,
            next_order: 0,
            sorted: OnceCell::new(),
        })
    }

    /// Build a sequence of `Pulse` sustain events from a pattern. The
    /// sequence loops at the pattern's duration.
    pub fn from_pattern(pattern: &Pattern) -> Result<Self> {
        let mut sequence = Sequence::new(pattern.duration())?;
        for pulse in pattern.events() {
            let velocity: u8 = saturating_cast(pulse.value as f64);
            sequence.push(
                pulse.start,
                pulse.duration,
                Event::Pulse(velocity.min(MAX_INTENSITY)),
            );
        }
        Ok(sequence)
    }

    fn push(&mut self, position: f64, length: f64, event: Event) {
        self.events.push(SequenceEvent {
            position,
            order: self.next_order,
            length,
            event,
        });
        self.next_order += 1;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.sorted.take();
    }

    /// Add an event at `position`. Chainable.
    pub fn add(&mut self, position: f64, event: impl Into<Event>) -> Result<&mut Self> {
        let position = check_position(position)?;
        self.push(position, 0.0, event.into());
        Ok(self)
    }

    /// Add an event held for `length` position units. Chainable.
    pub fn add_sustain(
        &mut self,
        position: f64,
        length: f64,
        event: impl Into<Event>,
    ) -> Result<&mut Self> {
        let position = check_position(position)?;
        let length = check_length(length)?;
        self.push(position, length, event.into());
        Ok(self)
    }

    /// Add `n` pulses equally spaced over `total_length`, each held for
    /// `duty` of its region.
    pub fn add_subdivisions(&mut self, n: usize, total_length: f64, duty: f64) -> Result<&mut Self> {
        if n == 0 {
            return Err(SequenceError::invalid_argument(
                "subdivisions require at least one region",
            ));
        }
        let total_length = check_loop_length("subdivision total length", total_length)?;
        let duty = check_duty(duty)?;

        let spacing = total_length / n as f64;
        let length = spacing * duty;
        for i in 0..n {
            self.push(i as f64 * spacing, length, Event::pulse());
        }
        Ok(self)
    }

    /// Copy every event from each source, keeping positions and lengths.
    /// Copied events are ordered after existing ones, in copy order.
    pub fn copy_from(&mut self, sources: &[&Sequence]) -> &mut Self {
        for source in sources {
            for event in &source.events {
                self.push(event.position, event.length, event.event.clone());
            }
        }
        self
    }

    /// Copy every event from each source, shifted forward by `offset`.
    pub fn copy_from_offset(&mut self, offset: f64, sources: &[&Sequence]) -> Result<&mut Self> {
        let offset = check_position(offset)?;
        for source in sources {
            for event in &source.events {
                self.push(event.position + offset, event.length, event.event.clone());
            }
        }
        Ok(self)
    }

    /// Keep each event independently with probability `keep_chance`.
    ///
    /// 0 removes everything, 1 keeps everything. Note-on and note-off events
    /// are thinned independently, so calling this on a melody can leave
    /// orphaned halves of a note; thin a rhythm before layering instead.
    pub fn random_remove<R: Rng>(
        &mut self,
        keep_chance: f64,
        rng: &mut R,
    ) -> Result<&mut Self> {
        if !(0.0..=1.0).contains(&keep_chance) {
            return Err(SequenceError::invalid_argument(format!(
                "keep chance must be within [0, 1], got {}",
                keep_chance
            )));
        }

        let before = self.events.len();
        self.events.retain(|_| rng.gen::<f64>() < keep_chance);
        log::debug!(
            "random_remove kept {} of {} events (keep chance {})",
            self.events.len(),
            before,
            keep_chance
        );
        self.invalidate();
        Ok(self)
    }

    fn sorted_indices(&self) -> &[usize] {
        self.sorted.get_or_init(|| {
            let mut indices: Vec<usize> = (0..self.events.len()).collect();
            indices.sort_by(|&a, &b| self.events[a].playback_cmp(&self.events[b]));
            indices
        })
    }

    /// Get the event at logical index `i` in playback order, looping every
    /// `loop_length`. Index `i + k * len()` returns the same event shifted
    /// forward by `k * loop_length`.
    pub fn get(&self, i: usize) -> Result<SequenceEvent> {
        let idx = loop_index(i, self.events.len(), self.loop_length)?;
        let mut event = self.events[self.sorted_indices()[idx.physical]].clone();
        event.position += idx.offset;
        Ok(event)
    }

    /// Rewrite the intensity of every event that has one, ramping linearly
    /// from `start` at position 0 toward `end` at `loop_length` without
    /// passing `end`.
    pub fn ramp_value(&mut self, start: u8, end: u8) -> Result<&mut Self> {
        let ramp = Ramp::new(start as f64, end as f64, self.loop_length)?;
        for event in &mut self.events {
            if event.event.intensity().is_some() {
                let value: u8 = ramp.value_as(event.position);
                event.event.set_intensity(value.min(MAX_INTENSITY));
            }
        }
        self.invalidate();
        Ok(self)
    }

    /// Every event in playback order with its position scaled by `unit`
    pub fn event_list(&self, unit: Duration) -> Vec<TimedEvent> {
        self.sorted()
            .map(|event| TimedEvent {
                offset: position_to_offset(event.position, unit),
                event: event.clone(),
            })
            .collect()
    }

    /// Iterate events in playback order
    pub fn sorted(&self) -> impl Iterator<Item = &SequenceEvent> + '_ {
        self.sorted_indices().iter().map(move |&i| &self.events[i])
    }

    /// Events in the order they were added
    pub fn events(&self) -> &[SequenceEvent] {
        &self.events
    }

    pub fn loop_length(&self) -> f64 {
        self.loop_length
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(feature = "colored")]
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{}", "(empty sequence)".bright_black());
        }
        writeln!(
            f,
            "{} {}",
            "sequence loop".bold(),
            self.loop_length.to_string().yellow()
        )?;
        for event in self.sorted() {
            let span = if event.length > 0.0 {
                format!("+{}", event.length).bright_black().to_string()
            } else {
                String::new()
            };
            writeln!(
                f,
                "  {}{} {}",
                event.position.to_string().cyan(),
                span,
                event.event
            )?;
        }
        Ok(())
    }
}

// Plain Display impl for non-colored builds
#[cfg(not(feature = "colored"))]
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty sequence)");
        }
        writeln!(f, "sequence loop {}", self.loop_length)?;
        for event in self.sorted() {
            let span = if event.length > 0.0 {
                format!("+{}", event.length)
            } else {
                String::new()
            };
            writeln!(f, "  {}{} {}", event.position, span, event.event)?;
        }
        Ok(())
    }
}
