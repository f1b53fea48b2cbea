use log::debug;

use crate::error::{Error, Result};
use crate::utils::lzss::LzssParams;
use crate::utils::wav::PcmFormat;

/// Where an output name comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryName {
    /// A single file name stored in the archive. Separators inside it are escaped, not followed.
    Embedded(String),
    /// A relative path using `/` between components.
    Path(String),
    /// A name without extension; the sniffed extension is appended.
    Stem(String),
    /// No stored name, `file_XXXX` plus the sniffed extension is used.
    Synthesized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Stored,
    /// Stored behind a header of this many bytes, which is dropped.
    StoredAfter(usize),
    Lzss(LzssParams),
    /// u32 LE decompressed size, then an LZSS stream.
    SizedLzss(LzssParams),
    /// PKWARE DCL implode.
    Dcl,
    /// Decide from a signature at the start of the payload.
    Sniff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    PcmToWav(PcmFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub index: usize,
    pub name: EntryName,
    pub offset: u64,
    /// `None` when the length has to be inferred from the next offset.
    pub length: Option<u64>,
    pub codec: Codec,
    pub expected_size: Option<u64>,
    pub conversion: Option<Conversion>,
}

impl DirectoryEntry {
    pub fn new(index: usize, offset: u64, length: u64) -> Self {
        Self {
            index,
            name: EntryName::Synthesized,
            offset,
            length: Some(length),
            codec: Codec::Stored,
            expected_size: None,
            conversion: None,
        }
    }

    /// An entry whose length runs up to the next entry (or end of file).
    pub fn open_ended(index: usize, offset: u64) -> Self {
        Self { length: None, ..Self::new(index, offset, 0) }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = EntryName::Embedded(name.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.name = EntryName::Path(path.into());
        self
    }

    pub fn stem(mut self, stem: impl Into<String>) -> Self {
        self.name = EntryName::Stem(stem.into());
        self
    }

    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn expect_size(mut self, size: u64) -> Self {
        self.expected_size = Some(size);
        self
    }

    pub fn convert(mut self, conversion: Conversion) -> Self {
        self.conversion = Some(conversion);
        self
    }
}

/// An entry with a concrete, validated byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub index: usize,
    pub name: EntryName,
    pub offset: u64,
    pub length: u64,
    pub codec: Codec,
    pub expected_size: Option<u64>,
    pub conversion: Option<Conversion>,
}

impl ResolvedEntry {
    pub fn label(&self) -> String {
        match &self.name {
            EntryName::Embedded(name) | EntryName::Path(name) | EntryName::Stem(name) => name.clone(),
            EntryName::Synthesized => format!("entry {}", self.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub entries: Vec<ResolvedEntry>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: Vec<DirectoryEntry>,
    keep_zero_offsets: bool,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries at offset 0 are real data, not deleted slots. Used when there is no header in
    /// front of the first payload.
    pub fn keep_zero_offsets(mut self) -> Self {
        self.keep_zero_offsets = true;
        self
    }

    pub fn push(&mut self, entry: DirectoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Turns the parsed directory into concrete byte ranges.
    ///
    /// Open-ended lengths are inferred after a stable sort by offset, so the on-disk order of
    /// the directory does not matter. Deleted slots (offset or length 0) are dropped. Every
    /// remaining range must fit inside `file_size`.
    pub fn resolve(self, file_size: u64) -> Result<Resolved> {
        let keep_zero_offsets = self.keep_zero_offsets;
        let mut entries = self.entries;

        if entries.iter().any(|e| e.length.is_none()) {
            entries.sort_by_key(|e| e.offset);
        }

        let mut resolved = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for (pos, entry) in entries.iter().enumerate() {
            let length = match entry.length {
                Some(length) => length,
                None => {
                    let end = entries.get(pos + 1).map(|next| next.offset).unwrap_or(file_size);
                    end.checked_sub(entry.offset).ok_or_else(|| Error::TruncatedInput {
                        what: format!("entry {}", entry.index),
                        offset: entry.offset,
                        length: 0,
                        available: file_size,
                    })?
                }
            };

            if (entry.offset == 0 && !keep_zero_offsets) || length == 0 {
                debug!("skipping empty slot {} (offset {:#x}, length {})", entry.index, entry.offset, length);
                skipped += 1;
                continue;
            }

            match entry.offset.checked_add(length) {
                Some(end) if end <= file_size => {}
                _ => {
                    return Err(Error::TruncatedInput {
                        what: format!("entry {}", entry.index),
                        offset: entry.offset,
                        length,
                        available: file_size,
                    });
                }
            }

            resolved.push(ResolvedEntry {
                index: entry.index,
                name: entry.name.clone(),
                offset: entry.offset,
                length,
                codec: entry.codec,
                expected_size: entry.expected_size,
                conversion: entry.conversion,
            });
        }

        resolved.sort_by_key(|e| e.index);
        Ok(Resolved { entries: resolved, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_dir(offsets: &[u64]) -> Directory {
        let mut dir = Directory::new();
        for (i, &offset) in offsets.iter().enumerate() {
            dir.push(DirectoryEntry::open_ended(i, offset));
        }
        dir
    }

    fn ranges(resolved: &Resolved) -> Vec<(usize, u64, u64)> {
        resolved.entries.iter().map(|e| (e.index, e.offset, e.length)).collect()
    }

    #[test]
    fn infers_lengths_from_next_offset() {
        let resolved = open_dir(&[16, 40, 100]).resolve(120).unwrap();
        assert_eq!(ranges(&resolved), vec![(0, 16, 24), (1, 40, 60), (2, 100, 20)]);
    }

    #[test]
    fn inference_ignores_directory_order() {
        let ordered = open_dir(&[16, 40, 100]).resolve(120).unwrap();

        let mut shuffled = Directory::new();
        shuffled.push(DirectoryEntry::open_ended(2, 100));
        shuffled.push(DirectoryEntry::open_ended(0, 16));
        shuffled.push(DirectoryEntry::open_ended(1, 40));
        let shuffled = shuffled.resolve(120).unwrap();

        assert_eq!(ranges(&ordered), ranges(&shuffled));
    }

    #[test]
    fn zero_slots_are_skipped() {
        let mut dir = Directory::new();
        dir.push(DirectoryEntry::new(0, 0, 10));
        dir.push(DirectoryEntry::new(1, 20, 0));
        dir.push(DirectoryEntry::new(2, 20, 5));
        let resolved = dir.resolve(64).unwrap();
        assert_eq!(resolved.skipped, 2);
        assert_eq!(ranges(&resolved), vec![(2, 20, 5)]);
    }

    #[test]
    fn zero_offset_kept_when_requested() {
        let mut dir = Directory::new().keep_zero_offsets();
        dir.push(DirectoryEntry::new(0, 0, 10));
        let resolved = dir.resolve(10).unwrap();
        assert_eq!(ranges(&resolved), vec![(0, 0, 10)]);
    }

    #[test]
    fn out_of_range_entry_is_rejected() {
        let mut dir = Directory::new();
        dir.push(DirectoryEntry::new(0, 8, 8));
        dir.push(DirectoryEntry::new(1, 16, 9));
        let err = dir.resolve(24).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { offset: 16, length: 9, available: 24, .. }));
    }

    #[test]
    fn offset_past_end_is_rejected() {
        let err = open_dir(&[8, 200]).resolve(100).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { .. }));
    }

    #[test]
    fn overflowing_range_is_rejected() {
        let mut dir = Directory::new();
        dir.push(DirectoryEntry::new(0, u64::MAX - 1, 4));
        assert!(dir.resolve(100).is_err());
    }
}
