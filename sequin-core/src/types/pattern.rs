//! Pattern - a lightweight rhythmic loop of valued pulses.
//!
//! Pulses are placed at an authoring cursor with [`Pattern::push`] and the
//! cursor is moved with [`Pattern::advance`]. Because the cursor only moves
//! forward, pulses are stored in position order and lookups need no sort.

use super::cursor::loop_index;
use super::event::DEFAULT_VELOCITY;
use super::ramp::Ramp;
use crate::error::{check_length, check_loop_length, Result, SequenceError};
use std::fmt;

/// A single pulse in a pattern
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternEvent {
    /// Where the pulse begins
    pub start: f64,
    /// How long the pulse is held (0 = rest)
    pub duration: f64,
    /// Plain integer intensity
    pub value: i32,
}

/// A rhythmic loop of `duration` position units
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    duration: f64,
    cursor: f64,
    events: Vec<PatternEvent>,
}

impl Pattern {
    /// Create an empty pattern that loops every `duration`
    pub fn new(duration: f64) -> Result<Self> {
        Ok(Pattern {
            duration: check_loop_length("pattern duration", duration)?,
            cursor: 0.0,
            events: Vec::new(),
        })
    }

    /// Create a pattern of duration 1 divided into `n` equally spaced regions.
    /// `duty` is the fraction of each region that is held.
    pub fn subdivisions(n: usize, duty: f64) -> Result<Self> {
        if n == 0 {
            return Err(SequenceError::invalid_argument(
                "pattern subdivisions require at least one region",
            ));
        }
        check_duty(duty)?;

        let mut pattern = Pattern::new(1.0)?;
        let spacing = 1.0 / n as f64;
        let length = spacing * duty;
        for i in 0..n {
            pattern.events.push(PatternEvent {
                start: i as f64 * spacing,
                duration: length,
                value: DEFAULT_VELOCITY as i32,
            });
        }
        pattern.cursor = 1.0;
        Ok(pattern)
    }

    /// Append a pulse at the cursor. Chainable.
    pub fn push(&mut self, duration: f64, value: i32) -> Result<&mut Self> {
        let duration = check_length(duration)?;
        self.events.push(PatternEvent {
            start: self.cursor,
            duration,
            value,
        });
        Ok(self)
    }

    /// Move the cursor forward by `amount`. Chainable.
    pub fn advance(&mut self, amount: f64) -> Result<&mut Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(SequenceError::invalid_argument(format!(
                "pattern cursor can only advance by a finite non-negative amount, got {}",
                amount
            )));
        }
        self.cursor += amount;
        Ok(self)
    }

    /// Get the pulse at logical index `i`, looping every `duration`
    pub fn get(&self, i: usize) -> Result<PatternEvent> {
        let idx = loop_index(i, self.events.len(), self.duration)?;
        let mut event = self.events[idx.physical];
        event.start += idx.offset;
        Ok(event)
    }

    /// Linearly rewrite every value from `start` at position 0 toward `end`
    /// at `duration`, never passing `end`.
    pub fn ramp_value(&mut self, start: i32, end: i32) -> Result<&mut Self> {
        let ramp = Ramp::new(start as f64, end as f64, self.duration)?;
        for event in &mut self.events {
            event.value = ramp.value_as(event.start);
        }
        Ok(self)
    }

    /// Loop length
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Where the next pushed pulse will start
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Stored pulses in position order
    pub fn events(&self) -> &[PatternEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

pub(crate) fn check_duty(duty: f64) -> Result<f64> {
    if duty.is_finite() && duty >= 0.0 {
        Ok(duty)
    } else {
        Err(SequenceError::invalid_argument(format!(
            "duty must be finite and non-negative, got {}",
            duty
        )))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pulses: Vec<String> = self
            .events
            .iter()
            .map(|e| format!("{}+{}:{}", e.start, e.duration, e.value))
            .collect();
        write!(f, "pattern({}) [{}]", self.duration, pulses.join(" "))
    }
}
