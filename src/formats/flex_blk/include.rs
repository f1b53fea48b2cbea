use binrw::BinRead;

pub const RECORDS_OFFSET: u64 = 10;

#[derive(BinRead)]
#[br(little)]
pub struct FlexHeader {
    _unk1: u16,
    pub count: u16,
    _unk2: u16,
    _magic: [u8; 4], //FLEX
}

#[derive(BinRead)]
#[br(little)]
pub struct FlexRecord {
    pub offset: u32,
    pub unk: u32,
    pub size: u32,
}

/// Layout used by picture blocks.
#[derive(BinRead)]
#[br(little)]
pub struct FlexPicRecord {
    pub offset: u32,
    _unk1: u32,
    pub size_copy: u16,
    _unk2: u16,
    pub size: u16,
    _unk3: u16,
}
