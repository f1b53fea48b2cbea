use binrw::BinRead;

use crate::utils::common;

#[derive(BinRead)]
#[br(little)]
pub struct NexusEntry {
    pub offset: u32,
    name_bytes: [u8; 13],
}
impl NexusEntry {
    pub fn name(&self) -> &[u8] {
        common::bytes_until_nul(&self.name_bytes)
    }
}
