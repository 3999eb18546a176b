//! Budgeted input cursor over the compressed stream

use crate::{AdcError, Result};
use std::io::{ErrorKind, Read};

/// Read-once cursor over a compressed stream of known length
///
/// Every read is checked against the remaining budget before touching the
/// underlying reader, so the cursor never consumes bytes past the region.
#[derive(Debug)]
pub struct ByteCursor<R: Read> {
    reader: R,
    remaining: u64,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    /// Create a cursor allowed to consume `budget` bytes from `reader`
    pub fn new(reader: R, budget: u64) -> Self {
        Self {
            reader,
            remaining: budget,
            position: 0,
        }
    }

    /// Compressed bytes not yet consumed
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Compressed bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the whole budget has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Fail unless `needed` bytes remain in the budget
    pub fn require(&self, needed: u64) -> Result<()> {
        if needed > self.remaining {
            return Err(self.truncated(needed));
        }
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Read a big-endian u16
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Fill `buf` completely from the stream
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.read_exact(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let needed = buf.len() as u64;
        self.require(needed)?;

        match self.reader.read_exact(buf) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(self.truncated(needed));
            }
            Err(e) => return Err(e.into()),
        }

        self.remaining -= needed;
        self.position += needed;
        Ok(())
    }

    fn truncated(&self, needed: u64) -> AdcError {
        AdcError::TruncatedStream {
            position: self.position,
            needed,
        }
    }
}
