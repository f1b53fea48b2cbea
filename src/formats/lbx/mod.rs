mod include;
use std::any::Any;

use log::debug;

use crate::AppContext;
use crate::archive::{ArchiveReader, Codec, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::{Format, has_magic};
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "lbx",
        description: "LBX archive",
        detector_func: Some(is_lbx_file),
        directory_func: read_lbx_directory,
    }
}

pub fn is_lbx_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 2, b"\xAD\xFE")? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

pub fn read_lbx_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.skip(2)?;
    reader.expect_magic(b"\xAD\xFE", "lbx")?;
    reader.seek(0)?;
    let header: LbxHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let first_offset = header.offsets[0] as u64;
    let name_count = (first_offset.saturating_sub(NAME_TABLE_OFFSET) / 32) as usize;
    let mut names = Vec::new();
    if name_count > 0 {
        reader.seek(NAME_TABLE_OFFSET)?;
        for _ in 0..name_count.min(header.file_count as usize) {
            let record: LbxName = reader.read_le()?;
            names.push(record.name());
        }
    }

    let keep_deaf = app_ctx.has_option("lbx", "keep_deaf");

    let mut directory = Directory::new();
    for (i, pair) in header.offsets.windows(2).enumerate() {
        let (start, end) = (pair[0] as u64, pair[1] as u64);
        let length = end.checked_sub(start).ok_or_else(|| {
            Error::mismatch("lbx", format!("offset of file {} ({:#x}) is past the next one ({:#x})", i, start, end))
        })?;

        let mut entry = DirectoryEntry::new(i, start, length);
        if let Some(name) = names.get(i).filter(|n| !n.is_empty()) {
            entry = entry.named(text::decode_name(name, app_ctx.codepage));
        }

        if !keep_deaf && length >= DEAF_HEADER_LEN as u64 && start + 4 <= reader.len() {
            reader.seek(start)?;
            let deaf: DeafHeader = reader.read_le()?;
            if deaf.is_valid() {
                debug!("file {} has a DEAF v{} header", i, deaf.version);
                entry = entry.codec(Codec::StoredAfter(DEAF_HEADER_LEN));
            }
        }

        directory.push(entry);
    }

    Ok(directory)
}
