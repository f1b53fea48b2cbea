mod include;
use std::any::Any;

use log::debug;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::{Format, has_magic};
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "harvester_xfle",
        description: "Harvester XFLE data file",
        detector_func: Some(is_harvester_xfle_file),
        directory_func: read_harvester_xfle_directory,
    }
}

pub fn is_harvester_xfle_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    if has_magic(reader, 0, b"XFLE")? {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// There is no count: records are read back to back until the end of the file. A record may
/// point at data stored right behind it, in which case the next record follows that data.
/// Records without a name or without data are placeholders.
pub fn read_harvester_xfle_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let mut directory = Directory::new();
    let mut records = 0;

    while !reader.at_end() {
        reader.expect_magic(b"XFLE", "harvester_xfle")?;
        let record: XfleRecord = reader.read_le()?;
        records += 1;

        let path = text::decode_name(record.path_bytes(), app_ctx.codepage);
        if path.is_empty() || record.size == 0 {
            debug!("placeholder record at {:#x}", reader.position() - RECORD_LEN);
            continue;
        }

        let (offset, size) = (record.data_offset as u64, record.size as u64);
        directory.push(DirectoryEntry::new(directory.len(), offset, size).path(path));
        if offset == reader.position() {
            reader.skip(size)?;
        }
    }
    println!("Records: {}, Files: {}", records, directory.len());

    Ok(directory)
}
