use clap::ValueEnum;
use sha1::Digest;

/// Digest printed for every written file with `--hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashKind {
    Md5,
    Sha1,
    Sha256,
    Crc32,
}

impl HashKind {
    pub fn name(&self) -> &'static str {
        match self {
            HashKind::Md5 => "MD5",
            HashKind::Sha1 => "SHA1",
            HashKind::Sha256 => "SHA256",
            HashKind::Crc32 => "CRC32",
        }
    }
}

/// Lowercase hex digest of `data`.
pub fn digest(kind: HashKind, data: &[u8]) -> String {
    match kind {
        HashKind::Md5 => format!("{:x}", md5::compute(data)),
        HashKind::Sha1 => hex::encode(sha1::Sha1::digest(data)),
        HashKind::Sha256 => hex::encode(sha2::Sha256::digest(data)),
        HashKind::Crc32 => format!("{:08x}", crc32fast::hash(data)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digests() {
        assert_eq!(digest(HashKind::Md5, b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(digest(HashKind::Sha1, b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            digest(HashKind::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest(HashKind::Crc32, b"123456789"), "cbf43926");
    }
}
