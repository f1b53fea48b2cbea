use binrw::BinRead;

#[derive(BinRead)]
#[br(little)]
pub struct WadHeader {
    _unk: u32,
    pub file_count: u8,
}

/// Followed by the NUL-terminated name.
#[derive(BinRead)]
#[br(little)]
pub struct WadEntry {
    pub offset: u32,
    pub size: u32,
}
