//! Whole-image expansion
//!
//! Copies the uncompressed prefix verbatim, expands the compressed region and
//! appends the trailing header block unchanged.

use crate::adc::AdcDecoder;
use crate::volume::{resolve, CompressedRegion};
use crate::{DecodeStats, Result, HEADER_BLOCK_SIZE};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Summary of one image expansion
#[derive(Debug, Clone)]
pub struct ImageStats {
    /// The resolved compressed region
    pub region: CompressedRegion,
    /// Bytes copied verbatim before the region
    pub prefix_len: u64,
    /// Decoder statistics for the region
    pub decode: DecodeStats,
    /// Bytes of the trailing header block copied
    pub trailer_len: u64,
    /// Total bytes written
    pub total_out: u64,
}

/// Expand the ADC region of an image read from `input`
///
/// `file_size` is the total length of `input`. Nothing written to `output`
/// should be kept if this returns an error.
pub fn expand_image<R, W>(input: &mut R, file_size: u64, output: &mut W) -> Result<ImageStats>
where
    R: Read + Seek,
    W: Write,
{
    let region = resolve(input, file_size)?;

    input.seek(SeekFrom::Start(0))?;
    let prefix_len = io::copy(&mut input.by_ref().take(region.start), output)?;
    if prefix_len != region.start {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }

    let decode = {
        let mut decoder = AdcDecoder::new(input.by_ref(), region.len());
        decoder.decode_to(output)?
    };

    input.seek(SeekFrom::Start(region.end))?;
    let mut trailer = [0u8; HEADER_BLOCK_SIZE];
    input.read_exact(&mut trailer)?;
    output.write_all(&trailer)?;
    output.flush()?;

    let trailer_len = HEADER_BLOCK_SIZE as u64;
    Ok(ImageStats {
        region,
        prefix_len,
        total_out: prefix_len + decode.bytes_out + trailer_len,
        decode,
        trailer_len,
    })
}

/// Expand the ADC region of an in-memory image
pub fn expand_image_bytes(image: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(image.len());
    expand_image(
        &mut io::Cursor::new(image),
        image.len() as u64,
        &mut output,
    )?;
    Ok(output)
}
