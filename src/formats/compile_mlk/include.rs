use binrw::BinRead;

#[derive(BinRead)]
#[br(little)]
pub struct MlkHeader {
    pub file_count: u8,
    #[br(count = file_count)]
    pub entries: Vec<MlkEntry>,
}

#[derive(BinRead)]
#[br(little)]
pub struct MlkEntry {
    _flag: u8,
    pub offset: u32,
    pub size: u32,
}
