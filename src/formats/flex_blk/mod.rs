mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::{Format, has_magic};
use include::*;

pub fn format() -> Format {
    Format {
        name: "flex_blk",
        description: "Mohawk FLEX resource block",
        detector_func: Some(is_flex_blk_file),
        directory_func: read_flex_blk_directory,
    }
}

pub fn is_flex_blk_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 6, b"FLEX")? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

fn is_picture_block(app_ctx: &AppContext) -> bool {
    app_ctx.has_option("flex_blk", "pics")
        || app_ctx
            .input
            .file_name()
            .is_some_and(|n| n.to_string_lossy().to_ascii_lowercase().ends_with("pics.blk"))
}

/// Slots with a zero offset or size are unused and come out as skipped.
pub fn read_flex_blk_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    reader.skip(6)?;
    reader.expect_magic(b"FLEX", "flex_blk")?;
    reader.seek(0)?;
    let header: FlexHeader = reader.read_le()?;

    let pictures = is_picture_block(app_ctx);
    println!("Resources: {}, Picture block: {}", header.count, pictures);

    reader.seek(RECORDS_OFFSET)?;
    let mut directory = Directory::new();
    for i in 0..header.count as usize {
        let (offset, size) = if pictures {
            let record: FlexPicRecord = reader.read_le()?;
            if record.size_copy != record.size {
                return Err(Error::mismatch("flex_blk", format!("picture record {} has sizes {} and {}", i, record.size_copy, record.size)));
            }
            (record.offset as u64, record.size as u64)
        } else {
            let record: FlexRecord = reader.read_le()?;
            if record.unk != 0 {
                return Err(Error::mismatch("flex_blk", format!("record {} has unexpected value {:#x}", i, record.unk)));
            }
            (record.offset as u64, record.size as u64)
        };
        directory.push(DirectoryEntry::new(i, offset, size).stem(format!("{:03}", i)));
    }

    Ok(directory)
}
