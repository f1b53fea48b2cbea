use binrw::BinRead;

use crate::utils::common;

pub const MUSIC_TOC_COUNT: usize = 4;
pub const SOUND_TOC_COUNT: usize = 9;
pub const ENTRY_LEN: u32 = 0x20;

/// One table of contents; `-1` in any field marks an unused slot.
#[derive(BinRead)]
#[br(little)]
pub struct TocRef {
    pub offset: i32,
    pub data_offset: i32,
    pub toc_size: i32,
    _pad: u32,
}
impl TocRef {
    pub fn is_used(&self) -> bool {
        self.offset != -1 && self.data_offset != -1 && self.toc_size != -1
    }
}

/// Offsets are relative to the data area of the owning TOC.
#[derive(BinRead)]
#[br(little)]
pub struct TocEntry {
    name_bytes: [u8; 18],
    pub offset: i32,
    _pad1: u32,
    pub size: i32,
    _pad2: u16,
}
impl TocEntry {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }

    pub fn is_used(&self) -> bool {
        self.offset != -1 && self.size != -1
    }
}
