//! Circular history buffer of produced output

use crate::{AdcError, Result, WINDOW_SIZE};

/// Fixed-capacity circular buffer holding the most recent 64KB of output
#[derive(Debug)]
pub struct SlidingWindow {
    buffer: Box<[u8]>,
    /// Next write position
    cursor: usize,
    /// Bytes of valid history, saturating at the capacity
    filled: usize,
}

impl SlidingWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self {
            buffer: vec![0u8; WINDOW_SIZE].into_boxed_slice(),
            cursor: 0,
            filled: 0,
        }
    }

    /// Bytes of history that may be referenced
    pub fn available(&self) -> usize {
        self.filled
    }

    /// Append bytes at the write cursor, wrapping at capacity
    pub fn insert(&mut self, bytes: &[u8]) {
        // Only the last WINDOW_SIZE bytes can ever be referenced
        let skipped = bytes.len().saturating_sub(WINDOW_SIZE);
        let bytes = &bytes[skipped..];
        self.cursor = (self.cursor + skipped) % WINDOW_SIZE;

        let first = bytes.len().min(WINDOW_SIZE - self.cursor);
        self.buffer[self.cursor..self.cursor + first].copy_from_slice(&bytes[..first]);
        self.buffer[..bytes.len() - first].copy_from_slice(&bytes[first..]);

        self.cursor = (self.cursor + bytes.len()) % WINDOW_SIZE;
        self.filled = (self.filled + bytes.len()).min(WINDOW_SIZE);
    }

    /// Append `length` bytes found `distance` bytes behind the write cursor to `out`
    ///
    /// The cursor does not move. `length` must not exceed `distance`; longer
    /// self-overlapping copies are split by the caller.
    pub fn read_back(&self, distance: usize, length: usize, out: &mut Vec<u8>) -> Result<()> {
        if distance == 0 || distance > self.filled {
            return Err(AdcError::WindowUnderflow {
                distance,
                available: self.filled,
            });
        }
        debug_assert!(length <= distance);

        let start = (self.cursor + WINDOW_SIZE - distance) % WINDOW_SIZE;
        let first = length.min(WINDOW_SIZE - start);
        out.extend_from_slice(&self.buffer[start..start + first]);
        out.extend_from_slice(&self.buffer[..length - first]);
        Ok(())
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new()
    }
}
