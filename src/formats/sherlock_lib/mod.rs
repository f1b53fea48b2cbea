mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Codec, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::{Format, has_magic};
use crate::utils::text;
use include::*;

const MAGIC: &[u8] = b"LIB\x1a";

pub fn format() -> Format {
    Format {
        name: "sherlock_lib",
        description: "Sherlock Holmes LIB archive",
        detector_func: Some(is_sherlock_lib_file),
        directory_func: read_sherlock_lib_directory,
    }
}

pub fn is_sherlock_lib_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, MAGIC)? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// Lengths run to the next offset. Payloads starting with `LZV\x1a` are LZSS packed.
pub fn read_sherlock_lib_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(MAGIC, "sherlock_lib")?;
    let header: LibHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for i in 0..header.file_count as usize {
        let entry: LibEntry = reader.read_le()?;
        let name = text::decode_name(entry.name(), app_ctx.codepage);
        directory.push(DirectoryEntry::open_ended(i, entry.offset as u64).named(name).codec(Codec::Sniff));
    }

    Ok(directory)
}
