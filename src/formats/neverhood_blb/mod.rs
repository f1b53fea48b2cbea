mod include;
use std::any::Any;

use log::debug;

use crate::AppContext;
use crate::archive::{ArchiveReader, Codec, Conversion, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::utils::wav::PcmFormat;
use include::*;

pub fn format() -> Format {
    Format {
        name: "neverhood_blb",
        description: "The Neverhood BLB archive",
        detector_func: Some(is_neverhood_blb_file),
        directory_func: read_neverhood_blb_directory,
    }
}

pub fn is_neverhood_blb_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    let header = reader.peek(0, 12)?;
    if header.len() == 12
        && header[0..4] == ID1.to_le_bytes()
        && header[4..6] == ID2.to_le_bytes()
        && header[8..12] == (reader.len() as u32).to_le_bytes()
    {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// Entries are named by hash. Type 3 entries are DCL imploded and must unpack to the stored
/// size; music entries are wrapped as WAV.
pub fn read_neverhood_blb_directory(_app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let header: BlbHeader = reader.read_le()?;
    if header.id1 != ID1 || header.id2 != ID2 {
        return Err(Error::mismatch("neverhood_blb", format!("ids {:#x}/{} are not {:#x}/{}", header.id1, header.id2, ID1, ID2)));
    }
    if header.file_size as u64 != reader.len() {
        return Err(Error::mismatch("neverhood_blb", format!("header says {} bytes, file has {}", header.file_size, reader.len())));
    }
    println!("Files: {}, Extra data size: {:#x}", header.file_count, header.ext_data_size);

    let mut directory = Directory::new();
    for (i, &hash) in header.hashes.iter().enumerate() {
        let record: BlbRecord = reader.read_le()?;
        debug!("{:08x}: type {}, compression {}", hash, record.file_type, record.compression);

        let mut entry = DirectoryEntry::new(i, record.offset as u64, record.disk_size as u64);
        entry = match known_name(hash) {
            Some(name) => entry.stem(name),
            None => entry.stem(format!("{:08x}", hash)),
        };
        if record.compression == COMPRESSION_DCL {
            entry = entry.codec(Codec::Dcl).expect_size(record.size as u64);
        }
        if MUSIC_HASHES.contains(&hash) {
            entry = entry.convert(Conversion::PcmToWav(PcmFormat::mono16(MUSIC_RATE)));
        }
        directory.push(entry);
    }

    Ok(directory)
}
