use binrw::BinRead;

#[derive(BinRead)]
#[br(little)]
pub struct AxiaHeader {
    pub file_count: u32,
    #[br(count = file_count)]
    pub offsets: Vec<u32>,
}
