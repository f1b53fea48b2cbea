mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::{Format, has_magic};
use crate::utils::text;
use include::*;

// "FPAK" stored as a little-endian u32
const MAGIC: &[u8] = b"KAPF";

pub fn format() -> Format {
    Format {
        name: "piece_fpk",
        description: "Piece FPAK archive",
        detector_func: Some(is_piece_fpk_file),
        directory_func: read_piece_fpk_directory,
    }
}

pub fn is_piece_fpk_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, MAGIC)? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

pub fn read_piece_fpk_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.expect_magic(MAGIC, "piece_fpk")?;
    let header: FpkHeader = reader.read_le()?;
    println!("Files: {}", header.file_count);

    let mut directory = Directory::new();
    for i in 0..header.file_count as usize {
        let entry: FpkEntry = reader.read_le()?;
        let name = text::decode_name(entry.name(), app_ctx.codepage);
        directory.push(DirectoryEntry::new(i, entry.offset as u64, entry.size as u64).named(name));
    }

    Ok(directory)
}
