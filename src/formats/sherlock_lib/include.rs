use binrw::BinRead;

use crate::utils::common;

#[derive(BinRead)]
#[br(little)]
pub struct LibHeader {
    pub file_count: u16,
}

#[derive(BinRead)]
#[br(little)]
pub struct LibEntry {
    name_bytes: [u8; 13],
    pub offset: u32,
}
impl LibEntry {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
}
