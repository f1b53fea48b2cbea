use binrw::BinRead;

pub const APPLE_SINGLE_MAGIC: u32 = 0x0005_1600;
pub const APPLE_DOUBLE_MAGIC: u32 = 0x0005_1607;
pub const VERSIONS: [u32; 2] = [0x0001_0000, 0x0002_0000];

pub const ENTRY_DATA_FORK: u32 = 1;
pub const ENTRY_RESOURCE_FORK: u32 = 2;
pub const ENTRY_REAL_NAME: u32 = 3;

#[derive(BinRead)]
#[br(big)]
pub struct AppleHeader {
    pub magic: u32,
    pub version: u32,
    _filler: [u8; 16],
    pub entry_count: u16,
    #[br(count = entry_count)]
    pub entries: Vec<AppleEntry>,
}

#[derive(BinRead)]
#[br(big)]
pub struct AppleEntry {
    pub id: u32,
    pub offset: u32,
    pub length: u32,
}
