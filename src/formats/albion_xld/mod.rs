mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::{Format, has_magic};
use include::*;

const MAGIC: &[u8] = b"XLD0I\0";

pub fn format() -> Format {
    Format {
        name: "albion_xld",
        description: "Albion XLD library",
        detector_func: Some(is_albion_xld_file),
        directory_func: read_albion_xld_directory,
    }
}

pub fn is_albion_xld_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, MAGIC)? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// Only sizes are stored; payloads follow the size table back to back.
pub fn read_albion_xld_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(MAGIC, "albion_xld")?;
    let header: XldHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let stem = app_ctx.input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

    let mut directory = Directory::new();
    let mut offset = reader.position();
    for (i, &size) in header.sizes.iter().enumerate() {
        directory.push(DirectoryEntry::new(i, offset, size as u64).stem(format!("{}_{:04x}", stem, i)));
        offset += size as u64;
    }

    Ok(directory)
}
