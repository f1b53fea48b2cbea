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
        name: "fnovel_fld",
        description: "FLDF archive",
        detector_func: Some(is_fnovel_fld_file),
        directory_func: read_fnovel_fld_directory,
    }
}

pub fn is_fnovel_fld_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, b"FLDF")? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

pub fn read_fnovel_fld_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(b"FLDF", "fnovel_fld")?;
    let header: FldHeader = reader.read_le()?;
    println!("Version: {}, Files: {}", header.version(), header.file_count);

    reader.seek(header.header_len as u64)?;

    let mut directory = Directory::new();
    for i in 0..header.file_count as usize {
        let entry: FldEntry = reader.read_le()?;
        let name = text::decode_name(entry.name(), app_ctx.codepage);
        directory.push(DirectoryEntry::new(i, entry.offset as u64, entry.size as u64).named(name));
    }

    Ok(directory)
}
