//! ADC decode loop
//!
//! The decoder reads opcodes until the compressed budget is spent, writing
//! every produced byte to the output sink and into the sliding window.

use super::{ByteCursor, Opcode, SlidingWindow};
use crate::{DecodeStats, Result, MAX_LITERAL_LENGTH};
use std::io::{Read, Write};

/// Single-session ADC decoder over a compressed region
#[derive(Debug)]
pub struct AdcDecoder<R: Read> {
    cursor: ByteCursor<R>,
    window: SlidingWindow,
    /// Bytes produced by the current opcode
    scratch: Vec<u8>,
    stats: DecodeStats,
}

impl<R: Read> AdcDecoder<R> {
    /// Create a decoder that consumes exactly `compressed_size` bytes from `input`
    pub fn new(input: R, compressed_size: u64) -> Self {
        Self {
            cursor: ByteCursor::new(input, compressed_size),
            window: SlidingWindow::new(),
            scratch: Vec::with_capacity(MAX_LITERAL_LENGTH),
            stats: DecodeStats::default(),
        }
    }

    /// Decode the whole region into a new buffer
    pub fn decode(mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.decode_to(&mut output)?;
        Ok(output)
    }

    /// Decode the whole region, streaming the output to `output`
    pub fn decode_to<W: Write>(&mut self, output: &mut W) -> Result<DecodeStats> {
        while !self.cursor.is_exhausted() {
            let opcode = Opcode::read(&mut self.cursor)?;
            log::trace!(
                "opcode at compressed offset {}: {opcode:?}",
                self.cursor.position()
            );

            self.scratch.clear();
            match opcode {
                Opcode::Literal { length } => {
                    self.scratch.resize(length, 0);
                    self.cursor.read_bytes(&mut self.scratch)?;
                    self.window.insert(&self.scratch);
                    self.stats.literal_count += 1;
                }
                Opcode::Match { length, distance } => {
                    self.copy_match(length, distance)?;
                    self.stats.match_count += 1;
                    self.stats.longest_match = self.stats.longest_match.max(length);
                    if distance < length {
                        self.stats.overlap_match_count += 1;
                    }
                }
            }

            output.write_all(&self.scratch)?;
            self.stats.bytes_out += self.scratch.len() as u64;
        }

        self.stats.bytes_in = self.cursor.position();
        log::debug!(
            "decoded {} compressed bytes into {} ({} literals, {} matches)",
            self.stats.bytes_in,
            self.stats.bytes_out,
            self.stats.literal_count,
            self.stats.match_count
        );

        Ok(self.stats.clone())
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Produce a match into `scratch`, feeding the window as it goes
    ///
    /// When the distance is shorter than the length, the source overlaps the
    /// bytes being produced: copy one distance-sized chunk at a time, making
    /// each chunk visible in the window before the next read.
    fn copy_match(&mut self, mut length: usize, distance: usize) -> Result<()> {
        while distance < length {
            let chunk_start = self.scratch.len();
            self.window.read_back(distance, distance, &mut self.scratch)?;
            self.window.insert(&self.scratch[chunk_start..]);
            length -= distance;
        }

        let chunk_start = self.scratch.len();
        self.window.read_back(distance, length, &mut self.scratch)?;
        self.window.insert(&self.scratch[chunk_start..]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdcError;

    fn decode(data: &[u8]) -> Result<Vec<u8>> {
        AdcDecoder::new(data, data.len() as u64).decode()
    }

    #[test]
    fn test_all_opcode_classes() {
        // literal FE ED FA CE, small match len 3 dist 1, large match len 4 dist 7
        let input = [0x83, 0xFE, 0xED, 0xFA, 0xCE, 0x00, 0x00, 0x40, 0x00, 0x06];
        let expected = [
            0xFE, 0xED, 0xFA, 0xCE, 0xCE, 0xCE, 0xCE, 0xFE, 0xED, 0xFA, 0xCE,
        ];
        assert_eq!(decode(&input).unwrap(), expected);
    }

    #[test]
    fn test_empty_budget() {
        assert!(decode(&[]).unwrap().is_empty());

        // Budget of zero ignores whatever the reader holds
        let data: &[u8] = &[0x80, 0x41];
        assert!(AdcDecoder::new(data, 0).decode().unwrap().is_empty());
    }

    #[test]
    fn test_overlap_single_byte_run() {
        // 'A' then large match length 10 distance 1
        let out = decode(&[0x80, 0x41, 0x46, 0x00, 0x00]).unwrap();
        assert_eq!(out, vec![0x41; 11]);
    }

    #[test]
    fn test_overlap_multi_byte_period() {
        // "abc" then small match length 8 distance 3
        let out = decode(&[0x82, b'a', b'b', b'c', 0x14, 0x02]).unwrap();
        assert_eq!(out, b"abcabcabcab");
    }

    #[test]
    fn test_window_underflow() {
        assert!(matches!(
            decode(&[0x00, 0x00]),
            Err(AdcError::WindowUnderflow {
                distance: 1,
                available: 0
            })
        ));

        // Two bytes of history, distance 3
        assert!(matches!(
            decode(&[0x81, 1, 2, 0x00, 0x02]),
            Err(AdcError::WindowUnderflow {
                distance: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn test_stats() {
        let input = [0x80, 0x41, 0x46, 0x00, 0x00, 0x81, 0x42, 0x43];
        let mut decoder = AdcDecoder::new(&input[..], input.len() as u64);
        let mut out = Vec::new();
        let stats = decoder.decode_to(&mut out).unwrap();

        assert_eq!(stats.literal_count, 2);
        assert_eq!(stats.match_count, 1);
        assert_eq!(stats.overlap_match_count, 1);
        assert_eq!(stats.longest_match, 10);
        assert_eq!(stats.bytes_in, 8);
        assert_eq!(stats.bytes_out, 13);
        assert_eq!(decoder.stats(), &stats);
    }

    #[test]
    fn test_long_output_wraps_window() {
        // 128-byte literal, then matches at distance 128 until past 64KB
        let pattern: Vec<u8> = (0..128u8).collect();
        let mut input = vec![0xFF];
        input.extend_from_slice(&pattern);
        let matches = 1100;
        for _ in 0..matches {
            input.extend_from_slice(&[0x7F, 0x00, 0x7F]);
        }

        let out = decode(&input).unwrap();
        assert_eq!(out.len(), 128 + matches * 67);
        for (i, byte) in out.iter().enumerate() {
            assert_eq!(*byte, (i % 128) as u8, "mismatch at {i}");
        }
    }
}
