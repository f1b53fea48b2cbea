mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::Format;
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "cnw_wad",
        description: "Conquest of the New World WAD archive",
        detector_func: None,
        directory_func: read_cnw_wad_directory,
    }
}

pub fn read_cnw_wad_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let header: WadHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for i in 0..header.file_count as usize {
        let entry: WadEntry = reader.read_le()?;
        let name = text::decode_name(&reader.read_cstring()?, app_ctx.codepage);
        directory.push(DirectoryEntry::new(i, entry.offset as u64, entry.size as u64).named(name));
    }

    Ok(directory)
}
