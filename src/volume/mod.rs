//! Volume header resolution
//!
//! A raw image ends with a 512-byte block laid out like a classic HFS master
//! directory block. This module parses that block and derives the byte range
//! holding the ADC-compressed data.

mod header;

pub use header::{resolve, resolve_bytes, CompressedRegion, VolumeHeader};

/// Offset of the allocation block count (u16, big-endian)
pub const ALLOCATION_BLOCK_COUNT_OFFSET: usize = 18;

/// Offset of the allocation block size (u32, big-endian)
pub const ALLOCATION_BLOCK_SIZE_OFFSET: usize = 20;

/// Offset of the first allocation block (u16, big-endian)
pub const FIRST_ALLOCATION_BLOCK_OFFSET: usize = 28;
