//! hfs-adc - Apple Data Compression decoder for raw HFS disk images
//!
//! Some legacy disk images store their volume data ADC-compressed between an
//! uncompressed prefix and a trailing 512-byte volume header block. This crate
//! locates the compressed region from that header and expands it.
//!
//! # Features
//!
//! - Volume header parsing with strict region bounds checking
//! - Decoding of all three ADC opcode classes, including self-overlapping matches
//! - Budgeted input: the decoder never reads past the compressed region
//! - Streaming API via Read/Write traits
//!
//! Compression is not implemented; the crate is decode-only.
//!
//! # Example - Expanding an image
//!
//! ```no_run
//! use hfs_adc::expand_image_bytes;
//!
//! let image = std::fs::read("disk.img")?;
//! let expanded = expand_image_bytes(&image)?;
//! std::fs::write("disk.expanded.img", expanded)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Decoding a bare ADC stream
//!
//! ```
//! use hfs_adc::{decode_bytes, AdcDecoder};
//!
//! // 'A' followed by a match of length 10 at distance 1
//! let compressed = [0x80, 0x41, 0x46, 0x00, 0x00];
//! assert_eq!(decode_bytes(&compressed)?, vec![0x41; 11]);
//!
//! // Or stream into any writer
//! let mut output = Vec::new();
//! let stats = AdcDecoder::new(&compressed[..], 5).decode_to(&mut output)?;
//! assert_eq!(stats.bytes_out, 11);
//! # Ok::<(), hfs_adc::AdcError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod adc;
pub mod common;
pub mod error;
pub mod image;
pub mod volume;

// Re-export commonly used types
pub use adc::{decode_bytes, AdcDecoder, ByteCursor, Opcode, SlidingWindow};
pub use common::{
    AdcError, DecodeStats, Result, HEADER_BLOCK_SIZE, MAX_LITERAL_LENGTH, MAX_MATCH_LENGTH,
    VOLUME_SIGNATURE, WINDOW_SIZE,
};
pub use image::{expand_image, expand_image_bytes, ImageStats};
pub use volume::{resolve, resolve_bytes, CompressedRegion, VolumeHeader};

/// Decode `compressed_size` bytes of ADC data from `input`
///
/// # Arguments
/// * `input` - Reader positioned at the start of the compressed data
/// * `compressed_size` - Exact number of compressed bytes to consume
///
/// # Returns
/// A vector containing the decompressed data
pub fn decode<R: std::io::Read>(input: R, compressed_size: u64) -> Result<Vec<u8>> {
    AdcDecoder::new(input, compressed_size).decode()
}
