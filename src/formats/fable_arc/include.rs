use binrw::BinRead;

use crate::utils::common;

/// Follows the `ARC1` magic.
#[derive(BinRead)]
#[br(little)]
pub struct ArcHeader {
    pub file_count: u16,
}

#[derive(BinRead)]
#[br(little)]
pub struct ArcEntry {
    name_bytes: [u8; 14],
    pub offset: u32,
    pub size: u32,
}
impl ArcEntry {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
}
