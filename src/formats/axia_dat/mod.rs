mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::{Format, has_magic};
use include::*;

const MAGIC: &[u8] = b"Axia DAT";

pub fn format() -> Format {
    Format {
        name: "axia_dat",
        description: "Axia DAT archive",
        detector_func: Some(is_axia_dat_file),
        directory_func: read_axia_dat_directory,
    }
}

pub fn is_axia_dat_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, MAGIC)? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

pub fn read_axia_dat_directory(_app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(MAGIC, "axia_dat")?;
    let header: AxiaHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for (i, &offset) in header.offsets.iter().enumerate() {
        directory.push(DirectoryEntry::open_ended(i, offset as u64));
    }

    Ok(directory)
}
