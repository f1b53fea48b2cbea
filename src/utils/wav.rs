use std::io::Cursor;

use binrw::BinWrite;

use crate::error::{Error, Result};

/// Layout of headerless PCM sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub channels: u16,
    pub bits: u16,
    pub rate: u32,
}

impl PcmFormat {
    pub fn mono16(rate: u32) -> Self {
        Self { channels: 1, bits: 16, rate }
    }

    fn block_align(&self) -> u16 {
        self.channels.saturating_mul(self.bits.div_ceil(8))
    }
}

#[derive(BinWrite)]
#[bw(little, magic = b"RIFF")]
struct WavHeader {
    riff_size: u32,
    wave_fmt: [u8; 8],
    fmt_size: u32,
    format_tag: u16,
    channels: u16,
    rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits: u16,
    data_tag: [u8; 4],
    data_size: u32,
}

fn too_large(what: &str, value: u64) -> Error {
    Error::CorruptStream { codec: "PCM", reason: format!("{} of {} does not fit a RIFF header", what, value) }
}

/// Wraps raw PCM samples in a canonical 44-byte RIFF/WAVE header.
pub fn wrap_pcm(samples: &[u8], format: PcmFormat) -> Result<Vec<u8>> {
    let block_align = format.block_align();
    let data_size = u32::try_from(samples.len())
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or_else(|| too_large("sample data", samples.len() as u64))?;
    let byte_rate = format
        .rate
        .checked_mul(block_align as u32)
        .ok_or_else(|| too_large("byte rate", format.rate as u64 * block_align as u64))?;

    let header = WavHeader {
        riff_size: data_size + 36,
        wave_fmt: *b"WAVEfmt ",
        fmt_size: 16,
        format_tag: 1,
        channels: format.channels,
        rate: format.rate,
        byte_rate,
        block_align,
        bits: format.bits,
        data_tag: *b"data",
        data_size,
    };

    let mut out = Cursor::new(Vec::with_capacity(44 + samples.len()));
    header.write(&mut out)?;
    let mut out = out.into_inner();
    out.extend_from_slice(samples);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniff::Sniffer;

    #[test]
    fn header_layout() {
        let wav = wrap_pcm(&[0u8; 10], PcmFormat::mono16(11025)).unwrap();
        assert_eq!(wav.len(), 54);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 46);
        assert_eq!(&wav[8..16], b"WAVEfmt ");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 11025);
        assert_eq!(u32::from_le_bytes(wav[28..32].try_into().unwrap()), 22050);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 10);
        assert_eq!(Sniffer::default().detect(&wav), ".wav");
    }

    #[test]
    fn oversized_rate_is_rejected() {
        let format = PcmFormat { channels: 8, bits: 32, rate: u32::MAX / 2 };
        let err = wrap_pcm(&[0; 4], format).unwrap_err();
        assert!(matches!(err, Error::CorruptStream { codec: "PCM", .. }), "{err}");
    }

    #[test]
    fn stereo_8bit() {
        let format = PcmFormat { channels: 2, bits: 8, rate: 22050 };
        let wav = wrap_pcm(&[0x80; 4], format).unwrap();
        assert_eq!(u16::from_le_bytes([wav[32], wav[33]]), 2);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 8);
    }
}
