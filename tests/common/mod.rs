//! Shared fixtures for integration tests
//!
//! The crate is decode-only, so tests build compressed streams with a small
//! greedy encoder and hand-assembled opcodes.

#![allow(dead_code)]

/// Emit literal opcodes for `data`, at most `chunk` bytes per opcode
pub fn literals(data: &[u8], chunk: usize) -> Vec<u8> {
    assert!((1..=128).contains(&chunk));
    let mut out = Vec::new();
    for run in data.chunks(chunk) {
        out.push(0x80 | (run.len() as u8 - 1));
        out.extend_from_slice(run);
    }
    out
}

/// Large-offset match opcode
pub fn large_match(length: usize, distance: usize) -> [u8; 3] {
    assert!((4..=67).contains(&length));
    assert!((1..=65536).contains(&distance));
    let offset = (distance - 1) as u16;
    let [hi, lo] = offset.to_be_bytes();
    [0x40 | (length - 4) as u8, hi, lo]
}

/// Small-offset match opcode
pub fn small_match(length: usize, distance: usize) -> [u8; 2] {
    assert!((3..=18).contains(&length));
    assert!((1..=1024).contains(&distance));
    let offset = distance - 1;
    [
        (((length - 3) as u8) << 2) | (offset >> 8) as u8,
        (offset & 0xFF) as u8,
    ]
}

/// Greedy ADC encoder used to produce round-trip fixtures
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut pending = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let (length, distance) = longest_match(data, i);
        let small = distance <= 1024;

        if length >= 4 || (length == 3 && small) {
            out.extend_from_slice(&literals(&pending, 128));
            pending.clear();

            if small && length <= 18 {
                out.extend_from_slice(&small_match(length, distance));
            } else {
                out.extend_from_slice(&large_match(length, distance));
            }
            i += length;
        } else {
            pending.push(data[i]);
            i += 1;
        }
    }

    out.extend_from_slice(&literals(&pending, 128));
    out
}

fn longest_match(data: &[u8], pos: usize) -> (usize, usize) {
    let mut best = (0, 0);
    for distance in 1..=pos.min(65536) {
        let mut length = 0;
        while pos + length < data.len()
            && length < 67
            && data[pos + length] == data[pos + length - distance]
        {
            length += 1;
        }
        if length > best.0 {
            best = (length, distance);
        }
    }
    best
}

/// Trailing volume header block pointing at `first_block * block_size`
pub fn header_block(first_block: u16, block_size: u32, block_count: u16) -> Vec<u8> {
    let mut block = vec![0u8; 512];
    block[0..2].copy_from_slice(b"BD");
    block[18..20].copy_from_slice(&block_count.to_be_bytes());
    block[20..24].copy_from_slice(&block_size.to_be_bytes());
    block[28..30].copy_from_slice(&first_block.to_be_bytes());
    block
}
