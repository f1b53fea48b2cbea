use binrw::BinRead;

use crate::utils::common;

/// Magic plus record.
pub const RECORD_LEN: u64 = 4 + 0x90;

/// Follows the `XFLE` magic of each record.
#[derive(BinRead)]
#[br(little)]
pub struct XfleRecord {
    name_bytes: [u8; 0x80],
    pub data_offset: u32,
    pub size: u32,
    _unk: u32,
    _size_copy: u32,
}
impl XfleRecord {
    /// The stored name is a Windows path behind one flag byte and a drive prefix (`C:\...`).
    pub fn path_bytes(&self) -> &[u8] {
        let name = common::bytes_until_nul(&self.name_bytes[1..]);
        let start = name.iter().position(|&b| b != b'\\').unwrap_or(name.len());
        let name = &name[start..];
        name.get(2..).unwrap_or(&[])
    }
}
