use binrw::BinRead;

use crate::utils::common;

pub const RECORD_LEN: u64 = 0x15;

#[derive(BinRead)]
#[br(little)]
pub struct ShadowRecord {
    pub size: u32,
    pub offset: u32,
    name_bytes: [u8; 13],
}
impl ShadowRecord {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
}
