use binrw::BinRead;

use crate::utils::common;

#[derive(BinRead)]
#[br(little)]
pub struct FpkHeader {
    pub file_count: u32,
}

#[derive(BinRead)]
#[br(little)]
pub struct FpkEntry {
    name_bytes: [u8; 16],
    pub offset: u32,
    pub size: u32,
}
impl FpkEntry {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
}
