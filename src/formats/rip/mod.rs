mod include;
use std::any::Any;

use log::{debug, warn};

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::Format;
use crate::utils::common::find_signature;
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "rip",
        description: "Embedded WAV/XMI/MIDI/HMP scan",
        detector_func: None,
        directory_func: read_rip_directory,
    }
}

/// Length of a stream starting at `at`, from its own headers.
fn stream_length(kind: RipKind, data: &[u8], at: usize) -> Option<u64> {
    match kind {
        RipKind::Wav => le_u32(data, at + 4).map(|size| size as u64 + 8),
        RipKind::Xmi => be_u32(data, at + XMI_SIZE_OFFSET).map(|size| size as u64 + XMI_HEADER_LEN),
        RipKind::Mid => midi_length(data, at),
        RipKind::Hmp => le_u32(data, at + HMP_SIZE_OFFSET).map(u64::from),
    }
}

/// `MThd` chunk plus every `MTrk` chunk it announces.
fn midi_length(data: &[u8], at: usize) -> Option<u64> {
    let header_len = be_u32(data, at + 4)? as usize;
    let tracks = u16::from_be_bytes([*data.get(at + 10)?, *data.get(at + 11)?]);
    let mut pos = at + 8 + header_len;
    for _ in 0..tracks {
        if data.get(pos..pos + 4)? != MIDI_TRACK_MAGIC {
            return None;
        }
        pos += 8 + be_u32(data, pos + 4)? as usize;
    }
    Some((pos - at) as u64)
}

/// Text of the first marker event in the first track, if any.
fn midi_marker(data: &[u8], at: usize) -> Option<&[u8]> {
    let header_len = be_u32(data, at + 4)? as usize;
    let track = at + 8 + header_len;
    let track_len = be_u32(data, track + 4)? as usize;
    let events = data.get(track + 8..track + 8 + track_len)?;
    let marker = find_signature(events, MIDI_MARKER, 0)?;
    let len = *events.get(marker + 2)? as usize;
    events.get(marker + 3..marker + 3 + len).filter(|text| !text.is_empty())
}

/// No directory at all: the whole input is scanned for stream signatures. The search resumes
/// one byte after each hit, so streams nested in other streams are found too. Hits whose
/// headers announce more data than the input holds are reported and dropped.
pub fn read_rip_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let data = reader.read_all()?;
    let base = app_ctx.input.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

    let mut kinds: Vec<RipKind> = RipKind::ALL.into_iter().filter(|k| app_ctx.has_option("rip", k.option())).collect();
    if kinds.is_empty() {
        kinds = RipKind::ALL.to_vec();
    }

    let mut hits = Vec::new();
    for kind in kinds {
        let mut from = 0;
        while let Some(at) = find_signature(&data, kind.magic(), from) {
            from = at + 1;
            match stream_length(kind, &data, at) {
                Some(length) if at as u64 + length <= data.len() as u64 => hits.push((at, length, kind)),
                _ => warn!("{:?} signature at {:#x} does not hold a complete stream", kind, at),
            }
        }
    }
    hits.sort_by_key(|&(at, ..)| at);
    println!("Streams found: {}", hits.len());

    let mut directory = Directory::new().keep_zero_offsets();
    for (i, &(at, length, kind)) in hits.iter().enumerate() {
        debug!("{:?} at {:#x}, {} bytes", kind, at, length);
        let stem = match kind {
            RipKind::Mid => midi_marker(&data, at).map(|name| text::decode_name(name, app_ctx.codepage)),
            _ => None,
        };
        let entry = DirectoryEntry::new(i, at as u64, length);
        directory.push(match stem {
            Some(name) => entry.stem(name),
            None => entry.stem(format!("{}-{:03}", base, i + 1)),
        });
    }

    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midi(tracks: &[&[u8]]) -> Vec<u8> {
        let mut out = b"MThd\x00\x00\x00\x06\x00\x01".to_vec();
        out.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
        out.extend_from_slice(&[0x00, 0x60]);
        for track in tracks {
            out.extend_from_slice(b"MTrk");
            out.extend_from_slice(&(track.len() as u32).to_be_bytes());
            out.extend_from_slice(track);
        }
        out
    }

    #[test]
    fn midi_length_covers_all_tracks() {
        let song = midi(&[b"\x00\xff\x2f\x00", b"\x00\x90\x3c\x40\x00\xff\x2f\x00"]);
        assert_eq!(midi_length(&song, 0), Some(song.len() as u64));
    }

    #[test]
    fn midi_marker_names_song() {
        let song = midi(&[b"\x00\xff\x06\x05intro\x00\xff\x2f\x00"]);
        assert_eq!(midi_marker(&song, 0), Some(&b"intro"[..]));
        let plain = midi(&[b"\x00\xff\x2f\x00"]);
        assert_eq!(midi_marker(&plain, 0), None);
    }

    #[test]
    fn xmi_and_wav_lengths() {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(b"RIFF");
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(b"WAVE");
        assert_eq!(stream_length(RipKind::Wav, &data, 4), Some(12));

        let mut xmi = XMI_MAGIC.to_vec();
        xmi.resize(XMI_SIZE_OFFSET, 0);
        xmi.extend_from_slice(&10u32.to_be_bytes());
        assert_eq!(stream_length(RipKind::Xmi, &xmi, 0), Some(0x2A));
    }

    #[test]
    fn hmp_scan_uses_stored_size() {
        let mut song = HMP_MAGIC.to_vec();
        song.extend_from_slice(&0x30u32.to_le_bytes());
        song.resize(0x30, 0x11);

        let mut data = b"padding".to_vec();
        data.extend_from_slice(&song);
        data.extend_from_slice(b"trailer");

        let mut app_ctx = AppContext::new("SOUND.EXE".into(), "out".into());
        app_ctx.options.push("rip:hmp".to_string());
        let mut reader = ArchiveReader::from_bytes(data);
        let directory = read_rip_directory(&app_ctx, &mut reader, Box::new(())).unwrap();
        let resolved = directory.resolve(reader.len()).unwrap();

        assert_eq!(resolved.entries.len(), 1);
        assert_eq!((resolved.entries[0].offset, resolved.entries[0].length), (7, 0x30));
        assert_eq!(resolved.entries[0].label(), "SOUND.EXE-001");
        assert_eq!(app_ctx.sniffer.detect(&song), ".hmp");
    }
}
