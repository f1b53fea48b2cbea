mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry, EntryName};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "cfs",
        description: "CFS (FSH2) archive",
        detector_func: Some(is_cfs_file),
        directory_func: read_cfs_directory,
    }
}

pub fn is_cfs_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    let header = reader.peek(0, 8)?;
    if header.len() == 8 && &header[..4] == b"FSH2" && header[4..8] == HEADER_LEN.to_le_bytes() {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// Records are unsorted and carry only offsets. Each file then starts with its own header
/// pointing at the data.
pub fn read_cfs_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(b"FSH2", "cfs")?;
    let header: CfsHeader = reader.read_le()?;
    if header.header_len != HEADER_LEN {
        return Err(Error::mismatch("cfs", format!("header length {:#x}, expected {:#x}", header.header_len, HEADER_LEN)));
    }
    println!("Files: {}", header.file_count);

    // the count is part of the header length
    reader.skip(header.header_len as u64 - 4)?;

    let mut files = Directory::new();
    for i in 0..header.file_count as usize {
        let record: CfsRecord = reader.read_le()?;
        let name = text::decode_name(&record.name_bytes, app_ctx.codepage);
        files.push(DirectoryEntry::open_ended(i, record.offset as u64).named(name));
    }
    let files = files.resolve(reader.len())?;

    let mut directory = Directory::new();
    for file in files.entries {
        reader.seek(file.offset)?;
        let file_header: CfsFileHeader = reader.read_le()?;
        let length = file
            .length
            .checked_sub(file_header.header_len as u64 + 4)
            .ok_or_else(|| Error::mismatch("cfs", format!("header of {} is longer than the file", file.label())))?;

        let mut entry = DirectoryEntry::new(file.index, file_header.data_offset as u64, length);
        entry.name = file.name;
        if entry.name == EntryName::Embedded(String::new()) {
            entry.name = EntryName::Synthesized;
        }
        directory.push(entry);
    }

    Ok(directory)
}
