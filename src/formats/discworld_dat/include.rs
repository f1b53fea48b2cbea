use binrw::BinRead;

#[derive(BinRead)]
#[br(little)]
pub struct DiscworldHeader {
    pub unknown: u32,
}
