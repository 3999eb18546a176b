//! Common types and constants for ADC disk-image decoding
//!
//! This module defines the error type, format constants and statistics shared by
//! the volume header resolver and the ADC decoder.

use thiserror::Error;

/// Error type for header resolution and ADC decoding
#[derive(Debug, Error)]
pub enum AdcError {
    /// The trailing block does not carry the volume signature
    #[error("Not a volume image: expected signature {expected:02X?}, found {found:02X?}")]
    NotAVolumeImage {
        /// Signature bytes found at the start of the header block
        found: [u8; 2],
        /// Signature the header block must carry
        expected: [u8; 2],
    },

    /// Input is too short to hold a trailing header block
    #[error("Image too small: {size} bytes (need at least 512)")]
    ImageTooSmall {
        /// Total input size in bytes
        size: u64,
    },

    /// Computed compressed region violates `start <= end <= file size`
    #[error("Invalid region bounds: start {start}, end {end}, file size {file_size}")]
    InvalidRegionBounds {
        /// Computed start of the compressed region
        start: u64,
        /// Computed end of the compressed region
        end: u64,
        /// Total input size in bytes
        file_size: u64,
    },

    /// An opcode needs more compressed bytes than the budget or the input holds
    #[error("Truncated stream: {needed} more byte(s) needed at compressed offset {position}")]
    TruncatedStream {
        /// Compressed bytes consumed before the failing read
        position: u64,
        /// Bytes the failing read required
        needed: u64,
    },

    /// A match refers further back than the output produced so far
    #[error("Window underflow: distance {distance} exceeds {available} byte(s) of history")]
    WindowUnderflow {
        /// Back-reference distance requested by the match
        distance: usize,
        /// Bytes of history available in the window
        available: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ADC operations
pub type Result<T> = std::result::Result<T, AdcError>;

/// Capacity of the sliding history window (64KB)
pub const WINDOW_SIZE: usize = 0x10000;

/// Size of the trailing volume header block
pub const HEADER_BLOCK_SIZE: usize = 0x200;

/// Signature of the legacy volume header ("BD")
pub const VOLUME_SIGNATURE: [u8; 2] = *b"BD";

/// Longest literal run a single opcode can carry
pub const MAX_LITERAL_LENGTH: usize = 0x80;

/// Longest match a single opcode can request
pub const MAX_MATCH_LENGTH: usize = 0x43; // 67 bytes

/// Statistics gathered during one decode session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodeStats {
    /// Number of literal opcodes decoded
    pub literal_count: usize,
    /// Number of match opcodes decoded
    pub match_count: usize,
    /// Matches whose distance was shorter than their length
    pub overlap_match_count: usize,
    /// Longest match decoded
    pub longest_match: usize,
    /// Compressed bytes consumed
    pub bytes_in: u64,
    /// Decompressed bytes produced
    pub bytes_out: u64,
}

impl DecodeStats {
    /// Ratio of compressed to decompressed size, as a percentage
    pub fn ratio(&self) -> f64 {
        if self.bytes_out == 0 {
            return 0.0;
        }
        (self.bytes_in as f64 / self.bytes_out as f64) * 100.0
    }
}
