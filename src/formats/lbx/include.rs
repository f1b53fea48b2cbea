use binrw::BinRead;

pub const NAME_TABLE_OFFSET: u64 = 0x200;
pub const DEAF_HEADER_LEN: usize = 0x10;

#[derive(BinRead)]
#[br(little)]
pub struct LbxHeader {
    pub file_count: u16,
    _magic: [u8; 2], //AD FE
    _unk: u32,
    /// One more than `file_count`; the last is the end of the final file.
    #[br(count = file_count as usize + 1)]
    pub offsets: Vec<u32>,
}

#[derive(BinRead)]
#[br(little)]
pub struct LbxName {
    name_bytes: [u8; 9],
    comment_bytes: [u8; 23],
}
impl LbxName {
    /// `NAME.EXT` with the NUL between the parts turned into a dot, plus `_comment` when set.
    pub fn name(&self) -> Vec<u8> {
        let mut name = trim_nul_end(&self.name_bytes).to_vec();
        for byte in name.iter_mut() {
            if *byte == 0 {
                *byte = b'.';
            }
        }
        let comment = trim_nul_end(&self.comment_bytes);
        if !comment.is_empty() {
            name.push(b'_');
            name.extend(comment.iter().map(|&b| if b == 0 { b'.' } else { b }));
        }
        name
    }
}

fn trim_nul_end(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map(|p| p + 1).unwrap_or(0);
    &bytes[..end]
}

/// Sub-header some LBX payloads carry in front of the real data.
#[derive(BinRead)]
#[br(little)]
pub struct DeafHeader {
    pub magic: u16,
    pub version: u16,
}
impl DeafHeader {
    pub fn is_valid(&self) -> bool {
        self.magic == 0xDEAF && matches!(self.version, 1 | 2)
    }
}
