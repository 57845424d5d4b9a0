//! PackBits run-length decoding, as used by packed bitmap scanlines
//!
//! Each run starts with a control byte `n`:
//! - `0..=127`: copy the next `n + 1` bytes verbatim
//! - `129..=255`: repeat the next byte `257 - n` times
//! - `128`: no-op

const PACKBITS_NOP: u8 = 0x80;

/// Decodes one scanline of `row_bytes` bytes from `input`, starting at `offset`
///
/// Returns the decoded bytes and the number of input bytes consumed. Decoding
/// stops when `input` runs out, so the row may come back shorter than
/// `row_bytes`; it is never longer.
pub fn unpack_row(input: &[u8], offset: usize, row_bytes: usize) -> (Vec<u8>, usize) {
    // a control byte and one data byte yield at most 128 output bytes
    let mut output: Vec<u8> = Vec::with_capacity(row_bytes.min(input.len().saturating_sub(offset) * 64));
    let mut pos = offset;
    while output.len() < row_bytes && pos < input.len() {
        let n = input[pos];
        pos += 1;
        match n {
            0..=0x7f => {
                let end = (pos + n as usize + 1).min(input.len());
                output.extend_from_slice(&input[pos..end]);
                pos = end;
            },
            PACKBITS_NOP => { },
            _ => {
                if pos >= input.len() { break; }
                let count = 257 - n as usize;
                output.extend(std::iter::repeat(input[pos]).take(count));
                pos += 1;
            }
        }
    }
    output.truncate(row_bytes);
    (output, pos.max(offset) - offset)
}
