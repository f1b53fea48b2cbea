use binrw::BinRead;

pub const HEADER_LEN: u32 = 0x1D;

#[derive(BinRead)]
#[br(little)]
pub struct CfsHeader {
    pub header_len: u32,
    pub file_count: u32,
}

/// `name_len` counts the two u32 fields after it and the name's terminator.
#[derive(BinRead)]
#[br(little)]
pub struct CfsRecord {
    pub name_len: u32,
    _unk: u32,
    pub offset: u32,
    #[br(count = name_len.saturating_sub(8))]
    pub name_bytes: Vec<u8>,
}

#[derive(BinRead)]
#[br(little)]
pub struct CfsFileHeader {
    pub header_len: u32,
    pub data_offset: u32,
    _unk1: u32,
    _unk2: u32,
    _unk3: [u8; 8],
}
