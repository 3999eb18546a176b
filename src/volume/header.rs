//! Volume header parsing and compressed region computation

use super::{
    ALLOCATION_BLOCK_COUNT_OFFSET, ALLOCATION_BLOCK_SIZE_OFFSET, FIRST_ALLOCATION_BLOCK_OFFSET,
};
use crate::{AdcError, Result, HEADER_BLOCK_SIZE, VOLUME_SIGNATURE};
use std::io::{Read, Seek, SeekFrom};

/// Parsed trailing volume header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeHeader {
    /// Two-byte volume signature
    pub signature: [u8; 2],
    /// Number of allocation blocks on the volume
    pub allocation_block_count: u16,
    /// Size of one allocation block in bytes
    pub allocation_block_size: u32,
    /// First allocation block, counted in allocation blocks
    pub first_allocation_block: u16,
}

impl VolumeHeader {
    /// Parse a header block, validating its signature
    pub fn parse(block: &[u8; HEADER_BLOCK_SIZE]) -> Result<Self> {
        let signature = [block[0], block[1]];
        if signature != VOLUME_SIGNATURE {
            return Err(AdcError::NotAVolumeImage {
                found: signature,
                expected: VOLUME_SIGNATURE,
            });
        }

        Ok(Self {
            signature,
            allocation_block_count: read_u16_be(block, ALLOCATION_BLOCK_COUNT_OFFSET),
            allocation_block_size: read_u32_be(block, ALLOCATION_BLOCK_SIZE_OFFSET),
            first_allocation_block: read_u16_be(block, FIRST_ALLOCATION_BLOCK_OFFSET),
        })
    }

    /// Byte offset at which the compressed data begins
    pub fn compressed_start(&self) -> u64 {
        // u16 * u32 always fits in u64
        u64::from(self.first_allocation_block) * u64::from(self.allocation_block_size)
    }
}

/// Byte range `[start, end)` of the compressed data inside an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedRegion {
    /// First compressed byte
    pub start: u64,
    /// One past the last compressed byte (start of the trailing header block)
    pub end: u64,
    /// The header the region was derived from
    pub header: VolumeHeader,
}

impl CompressedRegion {
    /// Number of compressed bytes in the region
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the region holds no compressed bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn from_header(header: VolumeHeader, file_size: u64) -> Result<Self> {
        let start = header.compressed_start();
        let end = file_size - HEADER_BLOCK_SIZE as u64;

        if start > end {
            return Err(AdcError::InvalidRegionBounds {
                start,
                end,
                file_size,
            });
        }

        log::debug!(
            "resolved compressed region [{start}, {end}) from {} blocks of {} bytes, first block {}",
            header.allocation_block_count,
            header.allocation_block_size,
            header.first_allocation_block
        );

        Ok(Self { start, end, header })
    }
}

/// Read the trailing header block of `input` and compute the compressed region
///
/// `file_size` is the total length of the input. The stream position is left
/// just past the header block.
pub fn resolve<R: Read + Seek>(input: &mut R, file_size: u64) -> Result<CompressedRegion> {
    if file_size < HEADER_BLOCK_SIZE as u64 {
        return Err(AdcError::ImageTooSmall { size: file_size });
    }

    let mut block = [0u8; HEADER_BLOCK_SIZE];
    input.seek(SeekFrom::Start(file_size - HEADER_BLOCK_SIZE as u64))?;
    input.read_exact(&mut block)?;

    let header = VolumeHeader::parse(&block)?;
    CompressedRegion::from_header(header, file_size)
}

/// Compute the compressed region of an in-memory image
pub fn resolve_bytes(image: &[u8]) -> Result<CompressedRegion> {
    let file_size = image.len() as u64;
    let block: &[u8; HEADER_BLOCK_SIZE] = image
        .len()
        .checked_sub(HEADER_BLOCK_SIZE)
        .and_then(|at| image[at..].try_into().ok())
        .ok_or(AdcError::ImageTooSmall { size: file_size })?;

    let header = VolumeHeader::parse(block)?;
    CompressedRegion::from_header(header, file_size)
}

fn read_u16_be(block: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([block[offset], block[offset + 1]])
}

fn read_u32_be(block: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        block[offset],
        block[offset + 1],
        block[offset + 2],
        block[offset + 3],
    ])
}
