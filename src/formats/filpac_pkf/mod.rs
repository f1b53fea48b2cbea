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
        name: "filpac_pkf",
        description: "FILPAC PKF archive",
        detector_func: Some(is_filpac_pkf_file),
        directory_func: read_filpac_pkf_directory,
    }
}

pub fn is_filpac_pkf_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 2, b"FILPAC")? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

pub fn read_filpac_pkf_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.skip(2)?;
    reader.expect_magic(b"FILPAC", "filpac_pkf")?;
    reader.seek(0)?;
    let header: PkfHeader = reader.read_le()?;
    println!("Version: {}, Files: {}", header.version(), header.file_count);

    let mut directory = Directory::new();
    for i in 0..header.file_count as usize {
        let entry: PkfEntry = reader.read_le()?;
        let name = text::decode_name(entry.name(), app_ctx.codepage);
        directory.push(DirectoryEntry::new(i, entry.offset(), entry.size()).named(name));
    }

    Ok(directory)
}
