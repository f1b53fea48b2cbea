mod include;
use std::any::Any;

use log::debug;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::utils::text;
use include::*;

pub fn format() -> Format {
    Format {
        name: "synwar_dat",
        description: "Syndicate Wars sound and music data",
        detector_func: None,
        directory_func: read_synwar_dat_directory,
    }
}

/// The number of TOC slots is not stored; it depends on which file this is.
fn toc_count(app_ctx: &AppContext) -> Result<usize> {
    if app_ctx.has_option("synwar_dat", "music") {
        return Ok(MUSIC_TOC_COUNT);
    }
    if app_ctx.has_option("synwar_dat", "sound") {
        return Ok(SOUND_TOC_COUNT);
    }
    let name = app_ctx.input.file_name().map(|s| s.to_string_lossy().to_ascii_lowercase()).unwrap_or_default();
    match name.as_str() {
        "music.dat" => Ok(MUSIC_TOC_COUNT),
        "sound.dat" | "syncreds.dat" => Ok(SOUND_TOC_COUNT),
        _ => Err(Error::mismatch("synwar_dat", format!("cannot tell the TOC count of '{}', use -o synwar_dat:music or synwar_dat:sound", name))),
    }
}

fn offset_of(value: i32, what: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::mismatch("synwar_dat", format!("negative {} {}", what, value)))
}

/// A pointer in the last four bytes leads to a list of TOCs, each a table of 32-byte records.
/// The first record of every TOC is a dummy.
pub fn read_synwar_dat_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let toc_count = toc_count(app_ctx)?;
    if reader.len() < 4 {
        return Err(Error::mismatch("synwar_dat", "file is shorter than its TOC pointer"));
    }
    reader.seek(reader.len() - 4)?;
    let toc_offset: u32 = reader.read_le()?;

    // one flag word per slot precedes the slots
    reader.seek(toc_offset as u64)?;
    reader.skip(2 * toc_count as u64)?;
    let mut tocs = Vec::new();
    for _ in 0..toc_count {
        let toc: TocRef = reader.read_le()?;
        if toc.is_used() {
            tocs.push(toc);
        }
    }
    println!("TOCs: {}", tocs.len());

    let mut directory = Directory::new();
    for toc in &tocs {
        let data_offset = offset_of(toc.data_offset, "data offset")?;
        reader.seek(offset_of(toc.offset, "TOC offset")?)?;
        let count = offset_of(toc.toc_size, "TOC size")? / ENTRY_LEN as u64;
        debug!("TOC at {:#x}: {} records, data at {:#x}", toc.offset, count, data_offset);

        for j in 0..count {
            let entry: TocEntry = reader.read_le()?;
            if j == 0 || !entry.is_used() {
                continue;
            }
            let offset = data_offset + offset_of(entry.offset, "file offset")?;
            let size = offset_of(entry.size, "file size")?;
            let name = text::decode_name(entry.name(), app_ctx.codepage);
            directory.push(DirectoryEntry::new(directory.len(), offset, size).named(name));
        }
    }

    Ok(directory)
}
