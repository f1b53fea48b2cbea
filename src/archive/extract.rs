use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use log::debug;

use crate::AppContext;
use crate::archive::directory::{Conversion, Directory, ResolvedEntry};
use crate::archive::names::NameAllocator;
use crate::archive::reader::ArchiveReader;
use crate::error::Result;
use crate::utils::{compression, hash, wav};

/// One entry turned into its final bytes and output path (relative to the output directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub index: usize,
    pub path: PathBuf,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub index: usize,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub files: Vec<WrittenFile>,
    pub skipped: usize,
}

/// Reads, decodes, converts and names one resolved entry. Nothing is written.
pub fn materialize(
    app_ctx: &AppContext,
    reader: &mut ArchiveReader,
    entry: &ResolvedEntry,
    names: &mut NameAllocator,
) -> Result<Materialized> {
    let raw = reader.read_at(entry.offset, entry.length)?;
    let mut data = compression::decode(entry, raw)?;

    if let Some(Conversion::PcmToWav(format)) = entry.conversion {
        data = wav::wrap_pcm(&data, format)?;
    }

    let ext = app_ctx.sniffer.detect(&data);
    let path = names.allocate(entry, ext);
    debug!("entry {} -> {} ({} bytes)", entry.index, path.display(), data.len());

    Ok(Materialized { index: entry.index, path, data })
}

/// Resolves `directory` against the input and writes every entry below the output directory.
/// With `list_only` set the directory is printed and nothing touches the disk.
pub fn extract_directory(
    app_ctx: &AppContext,
    reader: &mut ArchiveReader,
    directory: Directory,
) -> Result<ExtractReport> {
    let resolved = directory.resolve(reader.len())?;
    let count = resolved.entries.len();

    println!("File info:\nEntries: {}, Skipped: {}, Size: {}", count, resolved.skipped, reader.len());

    let mut report = ExtractReport { files: Vec::with_capacity(count), skipped: resolved.skipped };

    if app_ctx.list_only {
        for (i, entry) in resolved.entries.iter().enumerate() {
            println!("- Entry {}/{} - Name: {}, Offset: {}, Size: {}, Codec: {:?}",
                    i + 1, count, entry.label(), entry.offset, entry.length, entry.codec);
        }
        return Ok(report);
    }

    let mut names = NameAllocator::new();

    for (i, entry) in resolved.entries.iter().enumerate() {
        let file = materialize(app_ctx, reader, entry, &mut names)?;
        println!("- Entry {}/{} - Name: {}, Offset: {}, Size: {}",
                i + 1, count, file.path.display(), entry.offset, entry.length);

        let output_path = app_ctx.output_dir.join(&file.path);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = File::create(&output_path)?;
        out_file.write_all(&file.data)?;

        println!("-- Saved file!");
        for kind in &app_ctx.hashes {
            println!("-- {}: {}", kind.name(), hash::digest(*kind, &file.data));
        }

        report.files.push(WrittenFile { index: file.index, path: file.path, size: file.data.len() as u64 });
    }

    println!("\nExtraction finished!");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::directory::{Codec, DirectoryEntry};
    use crate::error::Error;
    use crate::utils::wav::PcmFormat;
    use std::path::Path;

    fn context(output_dir: &Path) -> AppContext {
        AppContext::new(PathBuf::from("test.bin"), output_dir.to_path_buf())
    }

    #[test]
    fn writes_named_and_sniffed_entries() {
        let dir = tempfile::tempdir().unwrap();
        let app_ctx = context(dir.path());

        let mut data = vec![0u8; 8];
        data.extend_from_slice(b"hello");
        data.extend_from_slice(b"RIFF\0\0\0\0WAVE");
        let mut reader = ArchiveReader::from_bytes(data);

        let mut directory = Directory::new();
        directory.push(DirectoryEntry::new(0, 8, 5).named("HELLO.TXT"));
        directory.push(DirectoryEntry::open_ended(1, 13));
        let report = extract_directory(&app_ctx, &mut reader, directory).unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(fs::read(dir.path().join("HELLO.TXT")).unwrap(), b"hello");
        assert_eq!(report.files[1].path, Path::new("file_0001.wav"));
        assert_eq!(fs::read(dir.path().join("file_0001.wav")).unwrap().len(), 12);
    }

    #[test]
    fn list_only_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app_ctx = context(&dir.path().join("out"));
        app_ctx.list_only = true;

        let mut reader = ArchiveReader::from_bytes(vec![1; 32]);
        let mut directory = Directory::new();
        directory.push(DirectoryEntry::new(0, 4, 4));
        let report = extract_directory(&app_ctx, &mut reader, directory).unwrap();

        assert!(report.files.is_empty());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn pcm_conversion_and_size_check() {
        let dir = tempfile::tempdir().unwrap();
        let app_ctx = context(dir.path());
        let mut reader = ArchiveReader::from_bytes(vec![7; 20]);
        let mut names = NameAllocator::new();

        let entry = ResolvedEntry {
            index: 3,
            name: crate::archive::directory::EntryName::Stem("music".into()),
            offset: 4,
            length: 8,
            codec: Codec::Stored,
            expected_size: Some(8),
            conversion: Some(Conversion::PcmToWav(PcmFormat::mono16(11025))),
        };
        let file = materialize(&app_ctx, &mut reader, &entry, &mut names).unwrap();
        assert_eq!(file.path, Path::new("music.wav"));
        assert_eq!(file.data.len(), 44 + 8);

        let bad = ResolvedEntry { expected_size: Some(9), ..entry };
        let err = materialize(&app_ctx, &mut reader, &bad, &mut names).unwrap_err();
        assert!(matches!(err, Error::DecompressionIntegrity { .. }));
    }

    #[test]
    fn entry_past_end_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let app_ctx = context(dir.path());
        let mut reader = ArchiveReader::from_bytes(vec![0; 16]);
        let mut directory = Directory::new();
        directory.push(DirectoryEntry::new(0, 4, 4));
        directory.push(DirectoryEntry::new(1, 12, 8));

        let err = extract_directory(&app_ctx, &mut reader, directory).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
