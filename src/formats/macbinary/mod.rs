mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::{Format, rsrc};
use crate::utils::common::{align_up, fourcc};
use crate::utils::crc16;
use crate::utils::text::decode_mac_roman;
use include::*;

pub fn format() -> Format {
    Format {
        name: "macbinary",
        description: "MacBinary file",
        detector_func: Some(is_macbinary_file),
        directory_func: read_macbinary_directory,
    }
}

fn header_is_plausible(header: &[u8], file_len: u64) -> bool {
    if header.len() < HEADER_LEN as usize || header[0] != 0 || header[74] != 0 || header[82] != 0 {
        return false;
    }
    if !(1..=63).contains(&header[1]) {
        return false;
    }
    let data_len = u32::from_be_bytes([header[83], header[84], header[85], header[86]]) as u64;
    let rsrc_len = u32::from_be_bytes([header[87], header[88], header[89], header[90]]) as u64;
    if HEADER_LEN + align_up(data_len, 128) + rsrc_len > file_len + 127 {
        return false;
    }

    let crc = u16::from_be_bytes([header[CRC_OFFSET], header[CRC_OFFSET + 1]]);
    // MacBinary I has no CRC, everything past the resource fork length is zero
    crc16::xmodem(&header[..CRC_OFFSET]) == crc || header[99..126].iter().all(|&b| b == 0)
}

pub fn is_macbinary_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    let header = reader.peek(0, HEADER_LEN as usize)?;
    if header_is_plausible(&header, reader.len()) {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// Data fork, raw resource fork (`name.rsrc`) and every resource below `name.rsrc.d/`.
pub fn read_macbinary_directory(_app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let raw = reader.peek(0, HEADER_LEN as usize)?;
    if !header_is_plausible(&raw, reader.len()) {
        return Err(Error::mismatch("macbinary", "header fields or CRC do not match"));
    }
    let header: MacBinaryHeader = reader.read_be()?;

    let name = decode_mac_roman(header.name());
    let version = if &header.signature == b"mBIN" { 3 } else if header.version >= 129 { 2 } else { 1 };
    println!("File info:\nName: {}\nType: {}, Creator: {}\nMacBinary version: {}",
            name, fourcc(&header.file_type), fourcc(&header.creator), version);

    let data_offset = HEADER_LEN + align_up(header.secondary_header_len as u64, 128);
    let data_len = header.data_len as u64;
    let rsrc_offset = data_offset + align_up(data_len, 128);
    let rsrc_len = header.rsrc_len as u64;

    let mut directory = Directory::new();
    directory.push(DirectoryEntry::new(0, data_offset, data_len).named(name.clone()));
    directory.push(DirectoryEntry::new(1, rsrc_offset, rsrc_len).named(format!("{}.rsrc", name)));
    if rsrc_len > 0 {
        rsrc::push_resources(&mut directory, reader, rsrc_offset, rsrc_len, &format!("{}.rsrc.d", name))?;
    }

    Ok(directory)
}
