use std::collections::HashSet;
use std::path::PathBuf;

use crate::archive::directory::{EntryName, ResolvedEntry};
use crate::sanitize::punyencode;

/// Output name for an entry before sanitization. `ext` is the sniffed extension including
/// the dot.
pub fn entry_file_name(entry: &ResolvedEntry, ext: &str) -> String {
    match &entry.name {
        EntryName::Embedded(name) | EntryName::Path(name) => name.clone(),
        EntryName::Stem(stem) => format!("{}{}", stem, ext),
        EntryName::Synthesized => format!("file_{:04}{}", entry.index, ext),
    }
}

/// Components of a stored relative path, split on `/` and `\`. `.`, `..` and empty
/// components are dropped so the result can never leave the output directory.
fn path_components(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).filter(|c| !c.is_empty() && *c != "." && *c != "..").collect()
}

/// Splits a relative path and makes every component safe for the host filesystem.
pub fn safe_relative_path(path: &str) -> Vec<String> {
    path_components(path).into_iter().map(punyencode).collect()
}

/// Hands out output paths, never the same one twice in a run.
///
/// Comparison ignores ASCII case because the output often lands on a case-insensitive
/// filesystem. A clash gets `_1`, `_2`, ... inserted before the extension.
#[derive(Debug, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, entry: &ResolvedEntry, ext: &str) -> PathBuf {
        let raw = entry_file_name(entry, ext);
        let mut components = match entry.name {
            EntryName::Path(_) => path_components(&raw),
            _ => vec![raw.as_str()],
        };
        let fallback = format!("file_{:04}{}", entry.index, ext);
        let file_name = components.pop().unwrap_or(fallback.as_str());
        let parents: Vec<String> = components.into_iter().map(punyencode).collect();
        let parent = parents.join("/");

        // the suffix goes in before encoding so an encoded name still decodes
        let mut candidate = punyencode(file_name);
        let mut counter = 0;
        while !self.taken.insert(Self::key(&parent, &candidate)) {
            counter += 1;
            candidate = punyencode(&with_suffix(file_name, counter));
        }

        let mut path: PathBuf = parents.iter().collect();
        path.push(candidate);
        path
    }

    fn key(parent: &str, file_name: &str) -> String {
        format!("{}/{}", parent, file_name).to_ascii_lowercase()
    }
}

fn with_suffix(file_name: &str, counter: usize) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_{}{}", &file_name[..dot], counter, &file_name[dot..]),
        _ => format!("{}_{}", file_name, counter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::directory::Codec;
    use crate::sanitize::punydecode;
    use std::path::Path;

    fn entry(index: usize, name: EntryName) -> ResolvedEntry {
        ResolvedEntry {
            index,
            name,
            offset: 16,
            length: 4,
            codec: Codec::Stored,
            expected_size: None,
            conversion: None,
        }
    }

    #[test]
    fn synthesized_names_use_index_and_extension() {
        assert_eq!(entry_file_name(&entry(7, EntryName::Synthesized), ".wav"), "file_0007.wav");
        assert_eq!(entry_file_name(&entry(7, EntryName::Stem("music".into())), ".wav"), "music.wav");
        assert_eq!(entry_file_name(&entry(7, EntryName::Embedded("A.TXT".into())), ".wav"), "A.TXT");
    }

    #[test]
    fn duplicates_get_suffixes() {
        let mut names = NameAllocator::new();
        let a = entry(0, EntryName::Embedded("SOUND.VOC".into()));
        assert_eq!(names.allocate(&a, ".bin"), Path::new("SOUND.VOC"));
        assert_eq!(names.allocate(&a, ".bin"), Path::new("SOUND_1.VOC"));
        let lower = entry(2, EntryName::Embedded("sound.voc".into()));
        assert_eq!(names.allocate(&lower, ".bin"), Path::new("sound_2.voc"));
    }

    #[test]
    fn suffix_without_extension() {
        let mut names = NameAllocator::new();
        let a = entry(0, EntryName::Embedded("README".into()));
        names.allocate(&a, ".bin");
        assert_eq!(names.allocate(&a, ".bin"), Path::new("README_1"));
    }

    #[test]
    fn encoded_duplicates_still_decode() {
        let mut names = NameAllocator::new();
        let a = entry(0, EntryName::Embedded("file.".into()));
        let first = names.allocate(&a, ".bin");
        let second = names.allocate(&a, ".bin");
        assert_eq!(punydecode(first.to_str().unwrap()), "file.");
        assert_eq!(punydecode(second.to_str().unwrap()), "file_1.");

        let b = entry(1, EntryName::Path("Über/a:b.txt".into()));
        names.allocate(&b, ".bin");
        let dup = names.allocate(&b, ".bin");
        let parts: Vec<String> = dup.iter().map(|c| punydecode(c.to_str().unwrap())).collect();
        assert_eq!(parts, vec!["Über", "a:b_1.txt"]);
    }

    #[test]
    fn embedded_separators_are_escaped() {
        let mut names = NameAllocator::new();
        let a = entry(0, EntryName::Embedded("GoToStartLoop/Finish".into()));
        let path = names.allocate(&a, ".bin");
        assert_eq!(path.components().count(), 1);
        assert!(path.to_str().unwrap().starts_with("xn--"));
    }

    #[test]
    fn paths_cannot_escape() {
        assert_eq!(safe_relative_path("..\\..\\etc/passwd"), vec!["etc", "passwd"]);
        assert_eq!(safe_relative_path("/abs/./x"), vec!["abs", "x"]);

        let mut names = NameAllocator::new();
        let a = entry(3, EntryName::Path("../..".into()));
        assert_eq!(names.allocate(&a, ".bin"), Path::new("file_0003.bin"));
    }
}
