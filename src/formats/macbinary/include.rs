use binrw::BinRead;

pub const HEADER_LEN: u64 = 128;
pub const CRC_OFFSET: usize = 124;

#[derive(BinRead)]
#[br(big)]
pub struct MacBinaryHeader {
    pub old_version: u8,
    pub name_len: u8,
    pub name_bytes: [u8; 63],
    pub file_type: [u8; 4],
    pub creator: [u8; 4],
    _finder_flags: u8,
    pub zero1: u8,
    _vertical: u16,
    _horizontal: u16,
    _folder_id: u16,
    _protected: u8,
    pub zero2: u8,
    pub data_len: u32,
    pub rsrc_len: u32,
    _created: u32,
    _modified: u32,
    _get_info_len: u16,
    _finder_flags2: u8,
    pub signature: [u8; 4],
    _reserved: [u8; 10],
    _total_len: u32,
    pub secondary_header_len: u16,
    pub version: u8,
    _min_version: u8,
    pub crc: u16,
    _pad: u16,
}
impl MacBinaryHeader {
    pub fn name(&self) -> &[u8] {
        &self.name_bytes[..(self.name_len as usize).min(63)]
    }
}
