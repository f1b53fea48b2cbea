use encoding_rs::{Encoding, MACINTOSH, SHIFT_JIS, UTF_8, WINDOWS_1252};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::utils::common::bytes_until_nul;

pub fn decode_strict(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|s| s.into_owned())
        .ok_or_else(|| Error::UnsupportedEncoding { encoding: encoding.name(), bytes: bytes.to_vec() })
}

/// Decodes a NUL-padded name field. Tries UTF-8 (plain ASCII passes here), then the
/// configured legacy code page, then Shift_JIS; Windows-1252 maps every byte and is the
/// last resort. Never fails.
pub fn decode_name(bytes: &[u8], legacy: &'static Encoding) -> String {
    let bytes = bytes_until_nul(bytes);
    match decode_strict(bytes, UTF_8) {
        Ok(name) => return name,
        Err(err) => debug!("{}", err),
    }
    for encoding in [legacy, SHIFT_JIS] {
        match decode_strict(bytes, encoding) {
            Ok(name) => return name,
            Err(err) => warn!("{}, trying the next code page", err),
        }
    }
    WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
}

pub fn decode_mac_roman(bytes: &[u8]) -> String {
    MACINTOSH.decode_without_bom_handling(bytes).0.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_utf8_pass_through() {
        assert_eq!(decode_name(b"INTRO.VOC\0\0\0", WINDOWS_1252), "INTRO.VOC");
        assert_eq!(decode_name("Über".as_bytes(), WINDOWS_1252), "Über");
    }

    #[test]
    fn legacy_code_page_used_for_non_utf8() {
        assert_eq!(decode_name(b"caf\xe9", WINDOWS_1252), "café");
        assert_eq!(decode_name(b"\x83\x65\x83\x58\x83\x67", SHIFT_JIS), "テスト");
    }

    #[test]
    fn falls_back_when_legacy_fails() {
        // invalid Shift_JIS lead byte, so the chain ends at Windows-1252
        assert_eq!(decode_name(b"\xa0\x80", SHIFT_JIS), "\u{a0}€");
    }

    #[test]
    fn strict_decode_reports_encoding() {
        let err = decode_strict(b"\xff", UTF_8).unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding { encoding: "UTF-8", .. }));
    }

    #[test]
    fn mac_roman() {
        assert_eq!(decode_mac_roman(b"R\x8evolution"), "Révolution");
    }
}
