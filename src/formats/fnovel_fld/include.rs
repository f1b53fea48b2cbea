use binrw::BinRead;

use crate::utils::common;

#[derive(BinRead)]
#[br(little)]
pub struct FldHeader {
    version_bytes: [u8; 4],
    pub header_len: u32,
    pub file_count: u32,
}
impl FldHeader {
    pub fn version(&self) -> String {
        common::string_from_bytes(&self.version_bytes)
    }
}

#[derive(BinRead)]
#[br(little)]
pub struct FldEntry {
    name_bytes: [u8; 12],
    pub offset: u32,
    pub size: u32,
}
impl FldEntry {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
}
