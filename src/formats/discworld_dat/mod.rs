mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::Format;
use include::*;

pub fn format() -> Format {
    Format {
        name: "discworld_dat",
        description: "Discworld sample data",
        detector_func: None,
        directory_func: read_discworld_dat_directory,
    }
}

/// A chain of blobs, each behind its u32 size, up to the end of the file.
pub fn read_discworld_dat_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let header: DiscworldHeader = reader.read_le()?;
    println!("Unknown: {:04x}", header.unknown);

    let stem = app_ctx.input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

    let mut directory = Directory::new();
    while !reader.at_end() {
        let size: u32 = reader.read_le()?;
        let offset = reader.position();
        directory.push(DirectoryEntry::new(directory.len(), offset, size as u64).stem(format!("{}-{:08x}", stem, offset)));
        reader.skip(size as u64)?;
    }
    println!("Files: {}", directory.len());

    Ok(directory)
}
