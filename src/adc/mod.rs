//! ADC (Apple Data Compression) decoder
//!
//! ADC is a byte-oriented LZ77 scheme with three opcode classes. The top bits
//! of each control byte select the class:
//!
//! | Control byte | Opcode             | Extra bytes | Length  | Distance             |
//! |--------------|--------------------|-------------|---------|----------------------|
//! | `1nnnnnnn`   | literal run        | `n + 1`     | `n + 1` | -                    |
//! | `01llllll`   | large-offset match | 2           | `l + 4` | `u16_be + 1`         |
//! | `00llllhh`   | small-offset match | 1           | `l + 3` | `hh * 256 + b + 1`   |
//!
//! Matches copy from a 64KB window of previously produced output.

mod cursor;
mod decoder;
mod opcode;
mod window;

pub use cursor::ByteCursor;
pub use decoder::AdcDecoder;
pub use opcode::Opcode;
pub use window::SlidingWindow;

use crate::Result;

/// Literal flag in the control byte
pub const LITERAL_FLAG: u8 = 0x80;

/// Large-offset match flag in the control byte
pub const LARGE_OFFSET_FLAG: u8 = 0x40;

/// Convenience function to decode a whole compressed buffer in memory
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    AdcDecoder::new(data, data.len() as u64).decode()
}
