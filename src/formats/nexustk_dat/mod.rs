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
        name: "nexustk_dat",
        description: "NexusTK DAT archive",
        detector_func: None,
        directory_func: read_nexustk_dat_directory,
    }
}

/// The stored count includes a final sentinel record holding the file size, which is not read;
/// the last real file runs to the end of the input instead.
pub fn read_nexustk_dat_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let stored_count: u32 = reader.read_le()?;
    let count = stored_count.saturating_sub(1);
    println!("Files: {}", count);

    let mut directory = Directory::new();
    for i in 0..count as usize {
        let entry: NexusEntry = reader.read_le()?;
        let name = text::decode_name(entry.name(), app_ctx.codepage);
        directory.push(DirectoryEntry::open_ended(i, entry.offset as u64).named(name));
    }

    Ok(directory)
}
