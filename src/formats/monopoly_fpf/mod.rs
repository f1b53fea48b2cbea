mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Codec, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::Format;
use crate::utils::lzss::LzssParams;
use include::*;

pub fn format() -> Format {
    Format {
        name: "monopoly_fpf",
        description: "Monopoly FPF archive",
        detector_func: None,
        directory_func: read_monopoly_fpf_directory,
    }
}

/// Offsets carry a "stored" flag in bit 30. Everything else is LZSS behind a size prefix.
pub fn read_monopoly_fpf_directory(_app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let header: FpfHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for (i, &raw) in header.offsets.iter().enumerate() {
        let codec = if raw & STORED_FLAG != 0 {
            Codec::StoredAfter(SIZE_PREFIX_LEN)
        } else {
            Codec::SizedLzss(LzssParams::with_fill(b' '))
        };
        directory.push(DirectoryEntry::open_ended(i, (raw & OFFSET_MASK) as u64).codec(codec));
    }

    Ok(directory)
}
