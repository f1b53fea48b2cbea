use crate::error::{Error, Result};

const WINDOW_SIZE: usize = 0x1000;
const WINDOW_MASK: usize = WINDOW_SIZE - 1;
const MAX_MATCH: usize = 18;
const THRESHOLD: usize = 2;

/// 4 KiB window LZSS as used by most DOS-era games: one flag byte per eight items, bit set =
/// literal, bit clear = 12-bit window position + 4-bit length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzssParams {
    /// Initial window content.
    pub fill: u8,
    /// First window write position.
    pub start: usize,
}

impl Default for LzssParams {
    fn default() -> Self {
        Self { fill: 0, start: WINDOW_SIZE - MAX_MATCH }
    }
}

impl LzssParams {
    pub fn with_fill(fill: u8) -> Self {
        Self { fill, ..Self::default() }
    }
}

/// Decodes the whole of `data`. A back-reference cut in half by the end of the input is a
/// truncation error; a stream simply ending after a flag byte is not.
pub fn decompress(data: &[u8], params: LzssParams) -> Result<Vec<u8>> {
    let mut window = [params.fill; WINDOW_SIZE];
    let mut dst = Vec::with_capacity(data.len() * 2);
    let mut src_i = 0;
    let mut win_pos = params.start & WINDOW_MASK;
    let mut flags = 0u16;

    while src_i < data.len() {
        flags >>= 1;
        if (flags & 0x100) == 0 {
            flags = data[src_i] as u16 | 0xFF00;
            src_i += 1;
        }

        if (flags & 1) == 1 {
            // literal
            let Some(&c) = data.get(src_i) else { break };
            src_i += 1;
            dst.push(c);
            window[win_pos] = c;
            win_pos = (win_pos + 1) & WINDOW_MASK;
        } else {
            // back-reference
            let Some(&b1) = data.get(src_i) else { break };
            let Some(&b2) = data.get(src_i + 1) else {
                return Err(Error::TruncatedInput {
                    what: "LZSS back-reference".to_string(),
                    offset: src_i as u64,
                    length: 2,
                    available: data.len() as u64,
                });
            };
            src_i += 2;

            let mut offset = (b1 as usize) | (((b2 & 0xF0) as usize) << 4);
            let length = ((b2 & 0x0F) as usize) + THRESHOLD + 1;

            for _ in 0..length {
                let c = window[offset];
                dst.push(c);
                window[win_pos] = c;
                win_pos = (win_pos + 1) & WINDOW_MASK;
                offset = (offset + 1) & WINDOW_MASK;
            }
        }
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_only() {
        let data = b"\xffABCDEFGH\x03IJ";
        assert_eq!(decompress(data, LzssParams::default()).unwrap(), b"ABCDEFGHIJ");
    }

    #[test]
    fn back_reference_overlaps_output() {
        // A, B, then copy 4 from 0xFEE
        let data = [0x03, b'A', b'B', 0xEE, 0xF1];
        assert_eq!(decompress(&data, LzssParams::default()).unwrap(), b"ABABAB");
    }

    #[test]
    fn window_fill_is_used() {
        // copy 3 from position 0 of an untouched window
        let data = [0x00, 0x00, 0x00];
        assert_eq!(decompress(&data, LzssParams::with_fill(b' ')).unwrap(), b"   ");
        assert_eq!(decompress(&data, LzssParams::default()).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn half_reference_is_truncation() {
        let data = [0x01, b'A', 0xEE];
        assert!(matches!(decompress(&data, LzssParams::default()), Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn trailing_flag_byte_is_fine() {
        let data = b"\xffABCDEFGH\x00";
        assert_eq!(decompress(data, LzssParams::default()).unwrap(), b"ABCDEFGH");
    }
}
