use binrw::BinRead;

#[derive(BinRead)]
#[br(little)]
pub struct FotaqHeader {
    pub file_count: u16,
    #[br(count = file_count)]
    pub offsets: Vec<SplitOffset>,
}

/// Real-mode style address: byte offset plus 16-byte paragraph.
#[derive(BinRead)]
#[br(little)]
pub struct SplitOffset {
    low: u16,
    paragraph: u16,
}
impl SplitOffset {
    pub fn offset(&self) -> u64 {
        (self.paragraph as u64) << 4 | self.low as u64
    }
}
