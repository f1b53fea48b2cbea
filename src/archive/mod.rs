pub mod directory;
pub mod extract;
pub mod names;
pub mod reader;

pub use directory::{Codec, Conversion, Directory, DirectoryEntry, EntryName, Resolved, ResolvedEntry};
pub use extract::{ExtractReport, Materialized, WrittenFile, extract_directory, materialize};
pub use reader::ArchiveReader;
