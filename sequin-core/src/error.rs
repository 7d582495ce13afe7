//! Error taxonomy for sequence authoring.
//!
//! Every error is a caller-input error raised by the call that introduced it,
//! before that call commits any mutation.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, SequenceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    #[error("invalid position {0}: positions must be finite and non-negative")]
    InvalidPosition(f64),

    #[error("invalid length {0}: lengths must be finite and non-negative")]
    InvalidLength(f64),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot index into an empty sequence")]
    EmptyStore,
}

impl SequenceError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        SequenceError::InvalidArgument(message.into())
    }
}

/// Reject anything that is not a finite, non-negative position.
pub(crate) fn check_position(position: f64) -> Result<f64> {
    if position.is_finite() && position >= 0.0 {
        Ok(position)
    } else {
        Err(SequenceError::InvalidPosition(position))
    }
}

/// Reject anything that is not a finite, non-negative length.
pub(crate) fn check_length(length: f64) -> Result<f64> {
    if length.is_finite() && length >= 0.0 {
        Ok(length)
    } else {
        Err(SequenceError::InvalidLength(length))
    }
}

/// Loop lengths and pattern durations must be strictly positive.
pub(crate) fn check_loop_length(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SequenceError::invalid_argument(format!(
            "{} must be finite and greater than zero, got {}",
            what, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_position() {
        assert_eq!(check_position(0.0), Ok(0.0));
        assert_eq!(check_position(2.5), Ok(2.5));
        assert_eq!(check_position(-1.0), Err(SequenceError::InvalidPosition(-1.0)));
        assert!(check_position(f64::NAN).is_err());
        assert!(check_position(f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_loop_length_rejects_zero() {
        assert!(matches!(
            check_loop_length("loop length", 0.0),
            Err(SequenceError::InvalidArgument(_))
        ));
        assert_eq!(check_loop_length("loop length", 4.0), Ok(4.0));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SequenceError::EmptyStore.to_string(),
            "cannot index into an empty sequence"
        );
        assert_eq!(
            SequenceError::InvalidLength(-0.5).to_string(),
            "invalid length -0.5: lengths must be finite and non-negative"
        );
    }
}
