//! Classic Mac OS resource fork reader.

use std::io::Cursor;

use binrw::{BinRead, BinReaderExt};

use crate::error::{Error, Result};
use crate::sanitize::punyencode;
use crate::utils::common::fourcc;
use crate::utils::text::decode_mac_roman;

const FORMAT: &str = "resource fork";

#[derive(BinRead)]
#[br(big)]
struct ForkHeader {
    data_offset: u32,
    map_offset: u32,
    data_len: u32,
    _map_len: u32,
}

#[derive(BinRead)]
#[br(big)]
struct MapHeader {
    _header_copy: [u8; 16],
    _next_map: u32,
    _file_ref: u16,
    _attributes: u16,
    type_list_offset: u16,
    name_list_offset: u16,
}

#[derive(BinRead)]
#[br(big)]
struct TypeListEntry {
    res_type: [u8; 4],
    count_minus_one: u16,
    ref_list_offset: u16,
}

#[derive(BinRead)]
#[br(big)]
struct RefListEntry {
    id: i16,
    name_offset: u16,
    _attributes: u8,
    data_offset_bytes: [u8; 3],
    _handle: u32,
}
impl RefListEntry {
    fn data_offset(&self) -> u64 {
        let [a, b, c] = self.data_offset_bytes;
        u32::from_be_bytes([0, a, b, c]) as u64
    }
}

/// Location of one resource inside the fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub res_type: [u8; 4],
    pub id: i16,
    pub name: Option<String>,
    /// Start of the resource bytes, relative to the fork, past the length word.
    pub offset: u64,
    pub length: u64,
}

impl ResourceRef {
    /// `TYPE/id` or `TYPE/id name`, every component safe for the host filesystem.
    pub fn relative_path(&self) -> String {
        let file_name = match &self.name {
            Some(name) if !name.is_empty() => format!("{} {}", self.id, name),
            _ => self.id.to_string(),
        };
        format!("{}/{}", punyencode(&decode_mac_roman(&self.res_type)), punyencode(&file_name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub res_type: [u8; 4],
    pub id: i16,
    pub name: Option<String>,
    pub data: Vec<u8>,
}

fn out_of_range(what: &str, offset: u64, length: u64, available: usize) -> Error {
    Error::TruncatedInput { what: what.to_string(), offset, length, available: available as u64 }
}

fn read_at<T>(fork: &[u8], offset: u64, what: &str) -> Result<T>
where
    T: for<'a> BinRead<Args<'a> = ()>,
{
    if offset >= fork.len() as u64 {
        return Err(out_of_range(what, offset, 1, fork.len()));
    }
    let mut cursor = Cursor::new(fork);
    cursor.set_position(offset);
    cursor.read_be::<T>().map_err(|err| {
        if err.is_eof() {
            Error::TruncatedRecord { what: what.to_string(), offset, available: fork.len() as u64 - offset }
        } else {
            err.into()
        }
    })
}

/// Lists every resource of a fork without copying its data.
pub fn parse_refs(fork: &[u8]) -> Result<Vec<ResourceRef>> {
    if fork.len() < 16 {
        return Err(Error::mismatch(FORMAT, "shorter than its header"));
    }
    let header: ForkHeader = read_at(fork, 0, "resource fork header")?;
    let data_end = header.data_offset as u64 + header.data_len as u64;
    if data_end > fork.len() as u64 {
        return Err(out_of_range("resource data area", header.data_offset as u64, header.data_len as u64, fork.len()));
    }

    let map_offset = header.map_offset as u64;
    let map: MapHeader = read_at(fork, map_offset, "resource map")?;
    let type_list = map_offset + map.type_list_offset as u64;
    let name_list = map_offset + map.name_list_offset as u64;

    let type_count = read_at::<u16>(fork, type_list, "resource type count")?.wrapping_add(1);
    let mut refs = Vec::new();

    for t in 0..type_count as u64 {
        let entry: TypeListEntry = read_at(fork, type_list + 2 + t * 8, "resource type entry")?;
        let ref_list = type_list + entry.ref_list_offset as u64;

        for r in 0..entry.count_minus_one as u64 + 1 {
            let reference: RefListEntry = read_at(fork, ref_list + r * 12, "resource reference")?;

            let name = if reference.name_offset == 0xFFFF {
                None
            } else {
                let at = name_list + reference.name_offset as u64;
                let len = read_at::<u8>(fork, at, "resource name")? as u64;
                let bytes = fork
                    .get(at as usize + 1..(at + 1 + len) as usize)
                    .ok_or_else(|| out_of_range("resource name", at + 1, len, fork.len()))?;
                Some(decode_mac_roman(bytes))
            };

            let at = header.data_offset as u64 + reference.data_offset();
            let length = read_at::<u32>(fork, at, "resource length")? as u64;
            if at + 4 + length > fork.len() as u64 {
                return Err(out_of_range(&format!("resource {} {}", fourcc(&entry.res_type), reference.id), at + 4, length, fork.len()));
            }

            refs.push(ResourceRef { res_type: entry.res_type, id: reference.id, name, offset: at + 4, length });
        }
    }

    Ok(refs)
}

pub fn parse(fork: &[u8]) -> Result<Vec<Resource>> {
    let resources = parse_refs(fork)?
        .into_iter()
        .map(|r| {
            let data = fork[r.offset as usize..(r.offset + r.length) as usize].to_vec();
            Resource { res_type: r.res_type, id: r.id, name: r.name, data }
        })
        .collect();
    Ok(resources)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a fork holding the given resources, types in order of first appearance.
    pub(crate) fn build_fork(resources: &[(&[u8; 4], i16, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut data = Vec::new();
        let mut data_offsets = Vec::new();
        for (_, _, _, bytes) in resources {
            data_offsets.push(data.len() as u32);
            data.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            data.extend_from_slice(bytes);
        }

        let mut types: Vec<[u8; 4]> = Vec::new();
        for (t, ..) in resources {
            if !types.contains(*t) {
                types.push(**t);
            }
        }

        let mut names = Vec::new();
        let type_list_len = 2 + types.len() * 8;
        let mut type_list = ((types.len() - 1) as u16).to_be_bytes().to_vec();
        let mut ref_lists = Vec::new();
        for t in &types {
            let members: Vec<usize> = (0..resources.len()).filter(|&i| resources[i].0 == t).collect();
            type_list.extend_from_slice(t);
            type_list.extend_from_slice(&((members.len() - 1) as u16).to_be_bytes());
            type_list.extend_from_slice(&((type_list_len + ref_lists.len()) as u16).to_be_bytes());
            for i in members {
                let (_, id, name, _) = resources[i];
                ref_lists.extend_from_slice(&id.to_be_bytes());
                match name {
                    Some(name) => {
                        ref_lists.extend_from_slice(&(names.len() as u16).to_be_bytes());
                        names.push(name.len() as u8);
                        names.extend_from_slice(name.as_bytes());
                    }
                    None => ref_lists.extend_from_slice(&0xFFFFu16.to_be_bytes()),
                }
                ref_lists.push(0);
                ref_lists.extend_from_slice(&data_offsets[i].to_be_bytes()[1..]);
                ref_lists.extend_from_slice(&[0; 4]);
            }
        }

        let data_offset = 256u32;
        let map_offset = data_offset + data.len() as u32;
        let mut map = vec![0u8; 24];
        map.extend_from_slice(&28u16.to_be_bytes());
        map.extend_from_slice(&((28 + type_list.len() + ref_lists.len()) as u16).to_be_bytes());
        map.extend_from_slice(&type_list);
        map.extend_from_slice(&ref_lists);
        map.extend_from_slice(&names);

        let mut fork = Vec::new();
        fork.extend_from_slice(&data_offset.to_be_bytes());
        fork.extend_from_slice(&map_offset.to_be_bytes());
        fork.extend_from_slice(&(data.len() as u32).to_be_bytes());
        fork.extend_from_slice(&(map.len() as u32).to_be_bytes());
        fork.resize(data_offset as usize, 0);
        fork.extend_from_slice(&data);
        fork.extend_from_slice(&map);
        fork
    }

    #[test]
    fn lists_resources() {
        let fork = build_fork(&[
            (b"STR ", 128, Some("Hello"), &b"\x05Hello"[..]),
            (b"STR ", 129, None, &b"\x02Hi"[..]),
            (b"snd ", -16000, Some("Beep"), &[1u8, 2, 3, 4][..]),
        ]);
        let resources = parse(&fork).unwrap();
        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].res_type, *b"STR ");
        assert_eq!(resources[0].id, 128);
        assert_eq!(resources[0].name.as_deref(), Some("Hello"));
        assert_eq!(resources[0].data, b"\x05Hello");
        assert_eq!(resources[1].name, None);
        assert_eq!(resources[2].id, -16000);
        assert_eq!(resources[2].data, [1, 2, 3, 4]);
    }

    #[test]
    fn relative_paths() {
        let fork = build_fork(&[(b"PICT", 1000, Some("a/b"), &b"x"[..]), (b"snd ", 1, None, &b"y"[..])]);
        let refs = parse_refs(&fork).unwrap();
        assert_eq!(refs[0].relative_path(), "PICT/xn--1000 ab-oa82b");
        assert_eq!(refs[1].relative_path(), "xn--snd -/1");
    }

    #[test]
    fn resource_past_end_is_rejected() {
        let mut fork = build_fork(&[(b"DATA", 1, None, &b"abcd"[..])]);
        // bump the stored length of the only resource
        fork[256 + 3] = 200;
        assert!(matches!(parse_refs(&fork), Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn too_short() {
        assert!(matches!(parse_refs(&[0; 8]), Err(Error::FormatMismatch { .. })));
    }
}
