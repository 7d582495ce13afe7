//! Modular looping over a finite list of stored events.
//!
//! A logical index `i` over `n` stored events wraps back to the start every
//! `n` steps. Each wrap pushes positions forward by one loop length, so a
//! finite sequence can be read as if it repeated forever.

use crate::error::{check_loop_length, Result, SequenceError};

/// Result of mapping a logical index onto stored events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopIndex {
    /// Index into the stored (physical) list
    pub physical: usize,
    /// How many complete loops precede this index
    pub repetition: usize,
    /// Position offset to add to the stored position
    pub offset: f64,
}

/// Map logical index `i` onto `len` stored events looping every `loop_length`.
///
/// Fails with `EmptyStore` when there is nothing to loop over and with
/// `InvalidArgument` when the loop length is not strictly positive.
pub fn loop_index(i: usize, len: usize, loop_length: f64) -> Result<LoopIndex> {
    if len == 0 {
        return Err(SequenceError::EmptyStore);
    }
    let loop_length = check_loop_length("loop length", loop_length)?;

    let repetition = i / len;
    Ok(LoopIndex {
        physical: i % len,
        repetition,
        offset: repetition as f64 * loop_length,
    })
}
