use log::debug;

use crate::archive::directory::{Codec, ResolvedEntry};
use crate::error::{Error, Result};
use crate::utils::lzss;

const LZV_MAGIC: &[u8] = b"LZV\x1a";

fn read_size_prefix<'a>(data: &'a [u8], what: &str) -> Result<(u64, &'a [u8])> {
    match data.split_first_chunk::<4>() {
        Some((size, rest)) => Ok((u32::from_le_bytes(*size) as u64, rest)),
        None => Err(Error::TruncatedInput {
            what: what.to_string(),
            offset: 0,
            length: 4,
            available: data.len() as u64,
        }),
    }
}

/// Turns the raw bytes of an entry into its payload, according to the entry's codec.
///
/// When the decompressed size is known (from the directory or from a size prefix in the
/// stream) the result must match it exactly.
pub fn decode(entry: &ResolvedEntry, raw: Vec<u8>) -> Result<Vec<u8>> {
    let (data, expected) = match entry.codec {
        Codec::Stored => (raw, entry.expected_size),
        Codec::StoredAfter(header_len) => {
            if raw.len() < header_len {
                return Err(Error::TruncatedInput {
                    what: format!("header of {}", entry.label()),
                    offset: entry.offset,
                    length: header_len as u64,
                    available: raw.len() as u64,
                });
            }
            (raw[header_len..].to_vec(), entry.expected_size)
        }
        Codec::Lzss(params) => (lzss::decompress(&raw, params)?, entry.expected_size),
        Codec::SizedLzss(params) => {
            let (size, stream) = read_size_prefix(&raw, "LZSS size prefix")?;
            (lzss::decompress(stream, params)?, Some(entry.expected_size.unwrap_or(size)))
        }
        Codec::Dcl => {
            let data = explode::explode(&raw).map_err(|err| Error::CorruptStream {
                codec: "DCL implode",
                reason: format!("{} in {}", err, entry.label()),
            })?;
            (data, entry.expected_size)
        }
        Codec::Sniff => {
            if raw.starts_with(LZV_MAGIC) {
                let (size, stream) = read_size_prefix(&raw[LZV_MAGIC.len()..], "LZV size prefix")?;
                debug!("{}: LZV stream, {} bytes unpacked", entry.label(), size);
                (lzss::decompress(stream, lzss::LzssParams::with_fill(b' '))?, Some(size))
            } else {
                (raw, entry.expected_size)
            }
        }
    };

    check_size(entry, &data, expected)?;
    Ok(data)
}

fn check_size(entry: &ResolvedEntry, data: &[u8], expected: Option<u64>) -> Result<()> {
    match expected {
        Some(expected) if expected != data.len() as u64 => Err(Error::DecompressionIntegrity {
            entry: entry.label(),
            expected,
            actual: data.len() as u64,
        }),
        _ => Ok(()),
    }
}
