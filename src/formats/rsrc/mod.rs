use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory, DirectoryEntry};
use crate::error::Result;
use crate::formats::Format;
use crate::sanitize::punyencode;
use crate::utils::macres;

pub fn format() -> Format {
    Format {
        name: "rsrc",
        description: "Mac resource fork",
        detector_func: None,
        directory_func: read_rsrc_directory,
    }
}

/// Adds one entry per resource of the fork found at `fork_offset`. Output paths are
/// `<folder>/<TYPE>/<id> <name>`.
pub fn push_resources(
    directory: &mut Directory,
    reader: &mut ArchiveReader,
    fork_offset: u64,
    fork_len: u64,
    folder: &str,
) -> Result<usize> {
    let fork = reader.read_at(fork_offset, fork_len)?;
    let refs = macres::parse_refs(&fork)?;
    let folder = punyencode(folder);

    for resource in &refs {
        let index = directory.len();
        directory.push(
            DirectoryEntry::new(index, fork_offset + resource.offset, resource.length)
                .path(format!("{}/{}", folder, resource.relative_path())),
        );
    }

    Ok(refs.len())
}

pub fn read_rsrc_directory(app_ctx: &AppContext, reader: &mut ArchiveReader, _ctx: Box<dyn Any>) -> Result<Directory> {
    let folder = app_ctx.input.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let folder = if folder.is_empty() { "resources".to_string() } else { format!("{}.d", folder) };

    let mut directory = Directory::new();
    let count = push_resources(&mut directory, reader, 0, reader.len(), &folder)?;
    println!("Resources: {}", count);

    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::macres::tests::build_fork;

    #[test]
    fn resources_go_below_input_name() {
        let fork = build_fork(&[
            (b"snd ", 1, Some("Beep"), &b"beep"[..]),
            (b"PICT", 128, None, &b"picture"[..]),
        ]);
        let app_ctx = AppContext::new("Sounds.rsrc".into(), "out".into());
        let mut reader = ArchiveReader::from_bytes(fork);

        let directory = read_rsrc_directory(&app_ctx, &mut reader, Box::new(())).unwrap();
        let resolved = directory.resolve(reader.len()).unwrap();
        let labels: Vec<String> = resolved.entries.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["Sounds.rsrc.d/xn--snd -/1 Beep", "Sounds.rsrc.d/PICT/128"]);
        assert_eq!(resolved.entries[1].length, 7);
    }

    #[test]
    fn empty_input_is_rejected() {
        let app_ctx = AppContext::new("x".into(), "out".into());
        let mut reader = ArchiveReader::from_bytes(Vec::new());
        assert!(read_rsrc_directory(&app_ctx, &mut reader, Box::new(())).is_err());
    }
}
