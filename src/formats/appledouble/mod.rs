mod include;
use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::{Error, Result};
use crate::formats::{Format, rsrc};
use crate::utils::text::decode_mac_roman;
use include::*;

pub fn format() -> Format {
    Format {
        name: "appledouble",
        description: "AppleDouble/AppleSingle file",
        detector_func: Some(is_appledouble_file),
        directory_func: read_appledouble_directory,
    }
}

pub fn is_appledouble_file(_app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<Option<Box<dyn Any>>> {
    let header = reader.peek(0, 8)?;
    if header.len() < 8 {
        return Ok(None);
    }
    let magic = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
    let version = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
    if matches!(magic, APPLE_SINGLE_MAGIC | APPLE_DOUBLE_MAGIC) && VERSIONS.contains(&version) {
        Ok(Some(Box::new(())))
    } else {
        Ok(None)
    }
}

/// Name for the output files when the container does not store one: the input's name without
/// the `._` prefix and `.rsrc` suffix AppleDouble companions usually carry.
fn fallback_name(app_ctx: &AppContext) -> String {
    let name = app_ctx.input.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = name.strip_prefix("._").unwrap_or(&name);
    let name = name.strip_suffix(".rsrc").unwrap_or(name);
    if name.is_empty() { "file".to_string() } else { name.to_string() }
}

pub fn read_appledouble_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let header: AppleHeader = reader.read_be()?;
    if !matches!(header.magic, APPLE_SINGLE_MAGIC | APPLE_DOUBLE_MAGIC) {
        return Err(Error::mismatch("appledouble", format!("magic {:#010x}", header.magic)));
    }
    if !VERSIONS.contains(&header.version) {
        return Err(Error::mismatch("appledouble", format!("version {:#010x}", header.version)));
    }
    let kind = if header.magic == APPLE_SINGLE_MAGIC { "AppleSingle" } else { "AppleDouble" };
    println!("{} version {}, entries: {}", kind, header.version >> 16, header.entry_count);

    let find = |id: u32| header.entries.iter().find(|e| e.id == id);

    let name = match find(ENTRY_REAL_NAME) {
        Some(entry) if entry.length > 0 => decode_mac_roman(&reader.read_at(entry.offset as u64, entry.length as u64)?),
        _ => fallback_name(app_ctx),
    };

    let mut directory = Directory::new();
    if let Some(data) = find(ENTRY_DATA_FORK) {
        directory.push(DirectoryEntry::new(0, data.offset as u64, data.length as u64).named(name.clone()));
    }
    if let Some(fork) = find(ENTRY_RESOURCE_FORK) {
        let index = directory.len();
        directory.push(DirectoryEntry::new(index, fork.offset as u64, fork.length as u64).named(format!("{}.rsrc", name)));
        if fork.length > 0 {
            rsrc::push_resources(&mut directory, reader, fork.offset as u64, fork.length as u64, &format!("{}.rsrc.d", name))?;
        }
    }

    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(entries: &[(u32, &[u8])]) -> Vec<u8> {
        let mut out = APPLE_DOUBLE_MAGIC.to_be_bytes().to_vec();
        out.extend_from_slice(&0x0002_0000u32.to_be_bytes());
        out.extend_from_slice(&[0; 16]);
        out.extend_from_slice(&(entries.len() as u16).to_be_bytes());
        let mut offset = 26 + entries.len() * 12;
        for (id, data) in entries {
            out.extend_from_slice(&id.to_be_bytes());
            out.extend_from_slice(&(offset as u32).to_be_bytes());
            out.extend_from_slice(&(data.len() as u32).to_be_bytes());
            offset += data.len();
        }
        for (_, data) in entries {
            out.extend_from_slice(data);
        }
        out
    }

    #[test]
    fn uses_stored_name() {
        let file = build(&[(ENTRY_REAL_NAME, &b"Caf\x8e"[..]), (ENTRY_DATA_FORK, &b"data"[..])]);
        let app_ctx = AppContext::new("._x".into(), "out".into());
        let mut reader = ArchiveReader::from_bytes(file);
        assert!(is_appledouble_file(&app_ctx, &mut reader).unwrap().is_some());

        let directory = read_appledouble_directory(&app_ctx, &mut reader, Box::new(())).unwrap();
        let resolved = directory.resolve(reader.len()).unwrap();
        assert_eq!(resolved.entries.len(), 1);
        assert_eq!(resolved.entries[0].label(), "Café");
        assert_eq!(resolved.entries[0].length, 4);
    }

    #[test]
    fn expands_resource_fork() {
        let fork = crate::utils::macres::tests::build_fork(&[(b"ICON", 1, Some("Icon"), &[0xAAu8; 8][..])]);
        let file = build(&[(ENTRY_RESOURCE_FORK, &fork[..])]);
        let app_ctx = AppContext::new("._Game.rsrc".into(), "out".into());
        let mut reader = ArchiveReader::from_bytes(file);

        let directory = read_appledouble_directory(&app_ctx, &mut reader, Box::new(())).unwrap();
        let resolved = directory.resolve(reader.len()).unwrap();
        let labels: Vec<String> = resolved.entries.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["Game.rsrc", "Game.rsrc.d/ICON/1 Icon"]);
        assert_eq!(resolved.entries[1].length, 8);
    }
}
