use binrw::BinRead;

use crate::utils::common;

#[derive(BinRead)]
#[br(little)]
pub struct PkfHeader {
    pub file_count: u16,
    _magic: [u8; 6], //FILPAC
    version_bytes: [u8; 8],
}
impl PkfHeader {
    pub fn version(&self) -> String {
        common::string_from_bytes(&self.version_bytes)
    }
}

/// Sizes and offsets are split into two u16 halves, high half first.
#[derive(BinRead)]
#[br(little)]
pub struct PkfEntry {
    name_bytes: [u8; 12],
    size_hi: u16,
    size_lo: u16,
    offset_hi: u16,
    offset_lo: u16,
    _reserved: [u8; 12],
}
impl PkfEntry {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
    pub fn size(&self) -> u64 {
        (self.size_hi as u64) << 16 | self.size_lo as u64
    }
    pub fn offset(&self) -> u64 {
        (self.offset_hi as u64) << 16 | self.offset_lo as u64
    }
}
