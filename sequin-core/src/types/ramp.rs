//! Clamped linear interpolation of an intensity across positions.

use crate::error::{check_loop_length, Result, SequenceError};
use num_traits::{Bounded, NumCast};

/// A linear ramp from `start` at position 0 to `end` at position `span`.
///
/// Values never pass `end`: a rising ramp is capped at `end`, a falling ramp
/// is floored at `end`. Positions past the span therefore hold the end value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    start: f64,
    end: f64,
    slope: f64,
}

impl Ramp {
    /// Create a ramp spanning `span` position units.
    pub fn new(start: f64, end: f64, span: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SequenceError::invalid_argument(format!(
                "ramp endpoints must be finite, got {} and {}",
                start, end
            )));
        }
        let span = check_loop_length("ramp span", span)?;
        Ok(Ramp {
            start,
            end,
            slope: (end - start) / span,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Raw ramp value at `position`, clamped toward `end`
    pub fn value_at(&self, position: f64) -> f64 {
        let value = self.start + self.slope * position;
        if self.slope >= 0.0 {
            value.min(self.end)
        } else {
            value.max(self.end)
        }
    }

    /// Ramp value truncated toward zero and saturated into `T`'s range
    pub fn value_as<T>(&self, position: f64) -> T
    where
        T: NumCast + Bounded,
    {
        saturating_cast(self.value_at(position).trunc())
    }
}

/// Convert to `T`, saturating at its bounds instead of failing.
pub(crate) fn saturating_cast<T>(value: f64) -> T
where
    T: NumCast + Bounded,
{
    match <T as NumCast>::from(value) {
        Some(converted) => converted,
        None if value < 0.0 => T::min_value(),
        None => T::max_value(),
    }
}
