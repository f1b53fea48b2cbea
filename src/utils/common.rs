/// Bytes up to (not including) the first NUL.
pub fn bytes_until_nul(buf: &[u8]) -> &[u8] {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..end]
}

pub fn string_from_bytes(buf: &[u8]) -> String {
    String::from_utf8_lossy(bytes_until_nul(buf)).to_string()
}

/// Rounds `value` up to a multiple of `align` (a power of two).
pub fn align_up(value: u64, align: u64) -> u64 {
    (value + align - 1) & !(align - 1)
}

/// Position of `needle` in `haystack` at or after `from`.
pub fn find_signature(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..].windows(needle.len()).position(|w| w == needle).map(|p| p + from)
}

pub fn fourcc(bytes: &[u8; 4]) -> String {
    bytes.iter().map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_terminated() {
        assert_eq!(string_from_bytes(b"NAME.DAT\0\0junk"), "NAME.DAT");
        assert_eq!(string_from_bytes(b"FULLNAME"), "FULLNAME");
    }

    #[test]
    fn alignment() {
        assert_eq!(align_up(0, 128), 0);
        assert_eq!(align_up(1, 128), 128);
        assert_eq!(align_up(256, 128), 256);
    }

    #[test]
    fn signature_search() {
        let data = b"xxRIFFyyRIFF";
        assert_eq!(find_signature(data, b"RIFF", 0), Some(2));
        assert_eq!(find_signature(data, b"RIFF", 3), Some(8));
        assert_eq!(find_signature(data, b"RIFF", 9), None);
    }
}
