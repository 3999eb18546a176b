//! Opcode classification

use super::{ByteCursor, LARGE_OFFSET_FLAG, LITERAL_FLAG};
use crate::Result;
use std::io::Read;

/// One decoded unit of the compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `length` raw bytes follow the control byte
    Literal {
        /// Run length, 1..=128
        length: usize,
    },
    /// Copy `length` bytes from `distance` bytes back in the output
    Match {
        /// Bytes to produce
        length: usize,
        /// Distance behind the current output position, at least 1
        distance: usize,
    },
}

impl Opcode {
    /// Read the next control byte and any offset bytes from `cursor`
    ///
    /// For a literal, the payload is left in the stream but its length is
    /// already checked against the remaining budget.
    pub fn read<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Self> {
        let control = cursor.read_u8()?;

        if control & LITERAL_FLAG != 0 {
            let length = usize::from(control & 0x7F) + 1;
            cursor.require(length as u64)?;
            return Ok(Opcode::Literal { length });
        }

        if control & LARGE_OFFSET_FLAG != 0 {
            let offset = cursor.read_u16_be()?;
            return Ok(Opcode::Match {
                length: usize::from(control & 0x3F) + 4,
                distance: usize::from(offset) + 1,
            });
        }

        let low = cursor.read_u8()?;
        let offset = (usize::from(control & 0x03) << 8) | usize::from(low);
        Ok(Opcode::Match {
            length: usize::from((control & 0x3C) >> 2) + 3,
            distance: offset + 1,
        })
    }

    /// Number of output bytes this opcode produces
    pub fn output_len(&self) -> usize {
        match *self {
            Opcode::Literal { length } | Opcode::Match { length, .. } => length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdcError;

    fn read_one(data: &[u8]) -> Result<Opcode> {
        Opcode::read(&mut ByteCursor::new(data, data.len() as u64))
    }

    #[test]
    fn test_literal() {
        assert_eq!(read_one(&[0x80, 0x41]).unwrap(), Opcode::Literal { length: 1 });

        let mut data = vec![0xFF];
        data.extend_from_slice(&[0u8; 128]);
        assert_eq!(read_one(&data).unwrap(), Opcode::Literal { length: 128 });
    }

    #[test]
    fn test_large_offset_match() {
        assert_eq!(
            read_one(&[0x40, 0x00, 0x03]).unwrap(),
            Opcode::Match {
                length: 4,
                distance: 4
            }
        );
        assert_eq!(
            read_one(&[0x7F, 0xFF, 0xFF]).unwrap(),
            Opcode::Match {
                length: 67,
                distance: 65536
            }
        );
    }

    #[test]
    fn test_small_offset_match() {
        assert_eq!(
            read_one(&[0x00, 0x00]).unwrap(),
            Opcode::Match {
                length: 3,
                distance: 1
            }
        );
        // length bits 1111, offset high bits 11
        assert_eq!(
            read_one(&[0x3F, 0xFF]).unwrap(),
            Opcode::Match {
                length: 18,
                distance: 1024
            }
        );
        assert_eq!(
            read_one(&[0x1D, 0x10]).unwrap(),
            Opcode::Match {
                length: 10,
                distance: 0x111
            }
        );
    }

    #[test]
    fn test_literal_payload_checked_against_budget() {
        // Claims 4 bytes, only 3 follow
        assert!(matches!(
            read_one(&[0x83, 1, 2, 3]),
            Err(AdcError::TruncatedStream {
                position: 1,
                needed: 4
            })
        ));
    }

    #[test]
    fn test_partial_match_operands() {
        assert!(matches!(
            read_one(&[0x40, 0x00]),
            Err(AdcError::TruncatedStream { needed: 2, .. })
        ));
        assert!(matches!(
            read_one(&[0x00]),
            Err(AdcError::TruncatedStream { needed: 1, .. })
        ));
    }

    #[test]
    fn test_output_len() {
        assert_eq!(Opcode::Literal { length: 9 }.output_len(), 9);
        assert_eq!(
            Opcode::Match {
                length: 5,
                distance: 1
            }
            .output_len(),
            5
        );
    }
}
