mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::Format;
use include::*;

pub fn format() -> Format {
    Format {
        name: "fotaq_music",
        description: "Flight of the Amazon Queen music library",
        detector_func: None,
        directory_func: read_fotaq_music_directory,
    }
}

pub fn read_fotaq_music_directory(_app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let header: FotaqHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for (i, offset) in header.offsets.iter().enumerate() {
        directory.push(DirectoryEntry::open_ended(i, offset.offset()));
    }

    Ok(directory)
}
