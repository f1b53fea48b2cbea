mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "shadowcaster_lib",
        description: "ShadowCaster LIB archive",
        detector_func: None,
        directory_func: read_shadowcaster_lib_directory,
    }
}

/// The directory sits at the end: a u16 count in the last two bytes, the records right
/// before it.
pub fn read_shadowcaster_lib_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    if reader.len() < 2 {
        return Err(Error::mismatch("shadowcaster_lib", "no room for the file count"));
    }
    reader.seek(reader.len() - 2)?;
    let count: u16 = reader.read_le()?;
    println!("Files: {}", count);

    let table_len = count as u64 * RECORD_LEN;
    let table_start = (reader.len() - 2)
        .checked_sub(table_len)
        .ok_or_else(|| Error::mismatch("shadowcaster_lib", format!("{} records do not fit in the file", count)))?;
    reader.seek(table_start)?;

    let mut directory = Directory::new();
    for i in 0..count as usize {
        let record: ShadowRecord = reader.read_le()?;
        let name = text::decode_name(record.name(), app_ctx.codepage);
        directory.push(DirectoryEntry::new(i, record.offset as u64, record.size as u64).named(name));
    }

    Ok(directory)
}
