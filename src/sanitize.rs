//! Filesystem-safe names for files that come from other platforms.
//!
//! Classic Mac and DOS names may contain characters that are path separators or reserved on
//! the host. They are first escaped with a private marker (U+0081), then the whole name is
//! punycoded behind an `xn--` prefix. The result is plain ASCII, deterministic, and can be
//! turned back into the original with [`punydecode`].

use crate::utils::punycode;

const ESCAPE: char = '\u{81}';
const FORBIDDEN: &str = "/\":*|\\?%<>";
const PREFIX: &str = "xn--";

fn is_forbidden(c: char) -> bool {
    FORBIDDEN.contains(c) || (c as u32) < 0x20
}

pub fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if c == ESCAPE {
            // U+0081 itself; a plain doubling would collide with the escape of U+0001
            escaped.push(ESCAPE);
            escaped.push('\u{79}');
        } else if is_forbidden(c) {
            escaped.push(ESCAPE);
            escaped.push(char::from_u32(0x80 + c as u32).unwrap_or(c));
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Inverse of [`escape_string`]. Marker sequences that `escape_string` never produces are
/// kept verbatim.
pub fn unescape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESCAPE {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('\u{79}') => {
                chars.next();
                out.push(ESCAPE);
            }
            Some(next) if (0x80..0x100).contains(&(next as u32)) => {
                let original = char::from_u32(next as u32 - 0x80).unwrap_or(next);
                if is_forbidden(original) {
                    chars.next();
                    out.push(original);
                } else {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

pub fn needs_punyencoding(name: &str) -> bool {
    !name.is_ascii() || name != escape_string(name) || name.ends_with(' ') || name.ends_with('.')
}

/// Maps `name` to a safe ASCII file name. Names that are already safe come back unchanged,
/// so applying this twice is the same as applying it once.
pub fn punyencode(name: &str) -> String {
    if !needs_punyencoding(name) {
        return name.to_string();
    }
    match punycode::encode(&escape_string(name)) {
        Some(encoded) => format!("{}{}", PREFIX, encoded),
        None => name.to_string(),
    }
}

pub fn punydecode(name: &str) -> String {
    name.strip_prefix(PREFIX)
        .and_then(punycode::decode)
        .map(|decoded| unescape_string(&decoded))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_forbidden_and_control() {
        assert_eq!(escape_string("a/b"), "a\u{81}\u{af}b");
        assert_eq!(escape_string("Icon\r"), "Icon\u{81}\u{8d}");
        assert_eq!(escape_string("\u{1}"), "\u{81}\u{81}");
        assert_eq!(escape_string("\u{81}"), "\u{81}y");
        assert_eq!(escape_string("plain.txt"), "plain.txt");
    }

    #[test]
    fn escape_round_trip() {
        let mut every: String = (0u32..0x20).filter_map(char::from_u32).collect();
        every.push_str(FORBIDDEN);
        every.push(ESCAPE);
        every.push_str("ordinary ÄÖÜ text");
        assert_eq!(unescape_string(&escape_string(&every)), every);

        for s in ["\u{1}\u{81}", "\u{81}\u{1}", "x\u{81}y", "100%", "C:\\DOS"] {
            assert_eq!(unescape_string(&escape_string(s)), s);
        }
    }

    #[test]
    fn punyencode_samples() {
        assert_eq!(punyencode("Icon\r"), "xn--Icon-ja6e");
        assert_eq!(punyencode("Read Me"), "Read Me");
        assert_eq!(punyencode("file."), "xn--file.-");
        assert_eq!(punyencode("abc "), "xn--abc -");
        assert_eq!(punyencode("Über"), "xn--ber-ska");
        assert_eq!(punyencode("a/b"), "xn--ab-ea8p");
        assert_eq!(punyencode("\u{81}"), "xn--y-ca");
        assert_eq!(punyencode("Spiel: Teil 1?"), "xn--Spiel Teil 1-sah16fwc");
        assert_eq!(punyencode("バイナリ"), "xn--eckzdqa0i");
    }

    #[test]
    fn punyencode_is_idempotent() {
        for s in ["Icon\r", "Read Me", "file.", "Über", "a/b", "ok.bin", "バイナリ", "x\u{81}"] {
            let once = punyencode(s);
            assert!(once.is_ascii());
            assert!(!needs_punyencoding(&once), "{once}");
            assert_eq!(punyencode(&once), once);
        }
    }

    #[test]
    fn punydecode_inverts() {
        for s in ["Icon\r", "Read Me", "file.", "Über", "a/b", "\u{81}\u{1}", "バイナリ"] {
            assert_eq!(punydecode(&punyencode(s)), s);
        }
    }
}
