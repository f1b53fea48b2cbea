mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::Format;
use include::*;

pub fn format() -> Format {
    Format {
        name: "compile_mlk",
        description: "Compile MLK archive",
        detector_func: None,
        directory_func: read_compile_mlk_directory,
    }
}

pub fn read_compile_mlk_directory(_app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let header: MlkHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for (i, entry) in header.entries.iter().enumerate() {
        directory.push(DirectoryEntry::new(i, entry.offset as u64, entry.size as u64).stem(format!("{:08X}", entry.offset)));
    }

    Ok(directory)
}
