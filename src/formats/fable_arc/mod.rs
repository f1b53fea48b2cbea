mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::{Format, has_magic};
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "fable_arc",
        description: "Fable ARC1 archive",
        detector_func: Some(is_fable_arc_file),
        directory_func: read_fable_arc_directory,
    }
}

pub fn is_fable_arc_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, b"ARC1")? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

pub fn read_fable_arc_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(b"ARC1", "fable_arc")?;
    let header: ArcHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for i in 0..header.file_count as usize {
        let entry: ArcEntry = reader.read_le()?;
        let name = text::decode_name(entry.name(), app_ctx.codepage);
        directory.push(DirectoryEntry::new(i, entry.offset as u64, entry.size as u64).named(name));
    }

    Ok(directory)
}
