use binrw::BinRead;

#[derive(BinRead)]
#[br(little)]
pub struct XldHeader {
    pub file_count: u16,
    #[br(count = file_count)]
    pub sizes: Vec<u32>,
}
