pub const RIFF_MAGIC: &[u8] = b"RIFF";
pub const XMI_MAGIC: &[u8] = b"FORM\x00\x00\x00\x0eXDIR";
pub const MIDI_MAGIC: &[u8] = b"MThd";
pub const MIDI_TRACK_MAGIC: &[u8] = b"MTrk";
pub const HMP_MAGIC: &[u8] = b"HMIMIDIP013195\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0";

/// Offset of the little-endian total file size in an HMP header.
pub const HMP_SIZE_OFFSET: usize = 0x20;

/// Offset of the big-endian size of the CAT chunk following the XDIR form.
pub const XMI_SIZE_OFFSET: usize = 0x1A;
pub const XMI_HEADER_LEN: u64 = 0x20;

/// Marker meta event, used by some games to carry the song's file name.
pub const MIDI_MARKER: &[u8] = b"\xff\x06";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RipKind {
    Wav,
    Xmi,
    Mid,
    Hmp,
}

impl RipKind {
    pub const ALL: [RipKind; 4] = [RipKind::Wav, RipKind::Xmi, RipKind::Mid, RipKind::Hmp];

    pub fn option(&self) -> &'static str {
        match self {
            RipKind::Wav => "wav",
            RipKind::Xmi => "xmi",
            RipKind::Mid => "mid",
            RipKind::Hmp => "hmp",
        }
    }

    pub fn magic(&self) -> &'static [u8] {
        match self {
            RipKind::Wav => RIFF_MAGIC,
            RipKind::Xmi => XMI_MAGIC,
            RipKind::Mid => MIDI_MAGIC,
            RipKind::Hmp => HMP_MAGIC,
        }
    }
}

pub fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4).map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

pub fn le_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4).map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}
