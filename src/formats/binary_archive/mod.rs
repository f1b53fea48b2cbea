mod include;
use std::any::Any;

use log::debug;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::{Format, has_magic};
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "binary_archive",
        description: "binary.archive00 container",
        detector_func: Some(is_binary_archive_file),
        directory_func: read_binary_archive_directory,
    }
}

pub fn is_binary_archive_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, MAGIC)? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// The directory runs from its offset to the end of the file; a partial record at the end is
/// ignored.
pub fn read_binary_archive_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(MAGIC, "binary_archive")?;
    let header: BinaryArchiveHeader = reader.read_le()?;
    reader.seek(header.directory_offset as u64)?;

    let mut directory = Directory::new();
    let mut index = 0;
    while reader.remaining() >= RECORD_LEN {
        let record: BinaryArchiveRecord = reader.read_le()?;
        if record.offset < 0 || record.length < 0 {
            return Err(Error::mismatch("binary_archive", format!("record {} has a negative offset or length", index)));
        }
        let name = text::decode_name(record.name(), app_ctx.codepage);
        debug!("{} ({})", name, record.file_type());

        let entry = DirectoryEntry::new(index, record.offset as u64, record.length as u64);
        directory.push(if name.is_empty() { entry } else { entry.named(name) });
        index += 1;
    }
    println!("Directory offset: {:#x}, Files: {}", header.directory_offset, index);

    Ok(directory)
}
