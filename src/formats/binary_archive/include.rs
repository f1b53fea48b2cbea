use binrw::BinRead;

use crate::utils::common;

pub const MAGIC: &[u8] = b"binary.archive00";
pub const RECORD_LEN: u64 = 64;

/// Follows the magic.
#[derive(BinRead)]
#[br(little)]
pub struct BinaryArchiveHeader {
    _reserved: [u8; 8],
    pub directory_offset: u32,
}

#[derive(BinRead)]
#[br(little)]
pub struct BinaryArchiveRecord {
    name_bytes: [u8; 16],
    type_bytes: [u8; 4],
    pub length: i32,
    pub offset: i32,
    _reserved: [u8; 36],
}
impl BinaryArchiveRecord {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
    /// Stored as a reversed four-character code.
    pub fn file_type(&self) -> String {
        let mut bytes = self.type_bytes;
        bytes.reverse();
        common::string_from_bytes(&bytes)
    }
}
