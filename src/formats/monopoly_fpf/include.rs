use binrw::BinRead;

pub const STORED_FLAG: u32 = 0x4000_0000;
pub const OFFSET_MASK: u32 = 0x3FFF_FFFF;
/// Every payload starts with its u32 unpacked size.
pub const SIZE_PREFIX_LEN: usize = 4;

#[derive(BinRead)]
#[br(little)]
pub struct FpfHeader {
    pub file_count: u32,
    _unk: u16,
    #[br(count = file_count)]
    pub offsets: Vec<u32>,
}
