use std::any::Any;

use crate::AppContext;
use crate::archive::{ArchiveReader, Directory};
use crate::error::Result;

pub type DetectorFn = fn(&AppContext, &mut ArchiveReader) -> Result<Option<Box<dyn Any>>>;
pub type DirectoryFn = fn(&AppContext, &mut ArchiveReader, Box<dyn Any>) -> Result<Directory>;

pub struct Format {
    pub name: &'static str,
    pub description: &'static str,
    /// `None` for formats without a reliable signature; those are only used with `--format`.
    pub detector_func: Option<DetectorFn>,
    pub directory_func: DirectoryFn,
}

pub mod albion_xld;
pub mod appledouble;
pub mod axia_dat;
pub mod binary_archive;
pub mod cfs;
pub mod cnw_wad;
pub mod compile_mlk;
pub mod discworld_dat;
pub mod fable_arc;
pub mod filpac_pkf;
pub mod flex_blk;
pub mod fnovel_fld;
pub mod fotaq_music;
pub mod harvester_xfle;
pub mod lbx;
pub mod macbinary;
pub mod monopoly_fpf;
pub mod neverhood_blb;
pub mod nexustk_dat;
pub mod piece_fpk;
pub mod rip;
pub mod rsrc;
pub mod shadowcaster_lib;
pub mod sherlock_lib;
pub mod synwar_dat;

/// Detection order matters: formats with longer or more specific signatures come first.
pub fn get_registry() -> Vec<Format> {
    vec![
        crate::formats::binary_archive::format(),
        crate::formats::neverhood_blb::format(),
        crate::formats::appledouble::format(),
        crate::formats::cfs::format(),
        crate::formats::axia_dat::format(),
        crate::formats::albion_xld::format(),
        crate::formats::filpac_pkf::format(),
        crate::formats::fable_arc::format(),
        crate::formats::piece_fpk::format(),
        crate::formats::fnovel_fld::format(),
        crate::formats::sherlock_lib::format(),
        crate::formats::harvester_xfle::format(),
        crate::formats::flex_blk::format(),
        crate::formats::lbx::format(),
        crate::formats::macbinary::format(),
        crate::formats::shadowcaster_lib::format(),
        crate::formats::nexustk_dat::format(),
        crate::formats::monopoly_fpf::format(),
        crate::formats::cnw_wad::format(),
        crate::formats::fotaq_music::format(),
        crate::formats::synwar_dat::format(),
        crate::formats::discworld_dat::format(),
        crate::formats::compile_mlk::format(),
        crate::formats::rsrc::format(),
        crate::formats::rip::format(),
    ]
}

pub fn find(name: &str) -> Option<Format> {
    get_registry().into_iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Detector for formats identified by a constant at a fixed offset.
pub(crate) fn has_magic(reader: &mut ArchiveReader, offset: u64, magic: &[u8]) -> Result<bool> {
    Ok(reader.peek(offset, magic.len())? == magic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let registry = get_registry();
        let names: HashSet<_> = registry.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find("FABLE_ARC").map(|f| f.name), Some("fable_arc"));
        assert!(find("zip").is_none());
    }

    #[test]
    fn unknown_input_is_not_detected() {
        let app_ctx = AppContext::new("in".into(), "out".into());
        let mut reader = ArchiveReader::from_bytes(b"\x13\x37 nothing to see here".to_vec());
        for format in get_registry() {
            if let Some(detector) = format.detector_func {
                assert!(detector(&app_ctx, &mut reader).unwrap().is_none(), "{}", format.name);
            }
        }
    }
}
