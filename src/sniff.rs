//! Payload type detection from leading bytes.

pub const DEFAULT_EXTENSION: &str = ".bin";

/// One signature: every `(offset, bytes)` part must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    parts: Vec<(usize, Vec<u8>)>,
    extension: String,
}

impl Signature {
    pub fn new(extension: &str) -> Self {
        Self { parts: Vec::new(), extension: extension.to_string() }
    }

    pub fn at(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.parts.push((offset, bytes.to_vec()));
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        !self.parts.is_empty()
            && self.parts.iter().all(|(offset, bytes)| {
                data.get(*offset..offset + bytes.len()).is_some_and(|window| window == bytes.as_slice())
            })
    }
}

/// Ordered signature table, first match wins.
#[derive(Debug, Clone)]
pub struct Sniffer {
    signatures: Vec<Signature>,
}

impl Default for Sniffer {
    fn default() -> Self {
        Self {
            signatures: vec![
                Signature::new(".wav").at(0, b"RIFF").at(8, b"WAVE"),
                Signature::new(".avi").at(0, b"RIFF").at(8, b"AVI "),
                Signature::new(".dir").at(0, b"RIFX").at(8, b"MV93"),
                Signature::new(".dir").at(0, b"XFIR").at(8, b"39VM"),
                Signature::new(".xmi").at(0, b"FORM").at(8, b"XDIR"),
                Signature::new(".xmi").at(0, b"FORM").at(8, b"XMID"),
                Signature::new(".aif").at(0, b"FORM").at(8, b"AIFF"),
                Signature::new(".mid").at(0, b"MThd"),
                Signature::new(".hmp").at(0, b"HMIMIDIP"),
                Signature::new(".png").at(0, b"\x89PNG\r\n\x1a\n"),
                Signature::new(".gif").at(0, b"GIF87a"),
                Signature::new(".gif").at(0, b"GIF89a"),
                Signature::new(".jpg").at(0, b"\xff\xd8\xff"),
                Signature::new(".voc").at(0, b"Creative Voice File"),
                Signature::new(".uni").at(0, b"UN05"),
                Signature::new(".ogg").at(0, b"OggS"),
                Signature::new(".mp3").at(0, b"ID3"),
                Signature::new(".zip").at(0, b"PK\x03\x04"),
                Signature::new(".pdf").at(0, b"%PDF"),
                Signature::new(".exe").at(0, b"MZ"),
            ],
        }
    }
}

impl Sniffer {
    pub fn empty() -> Self {
        Self { signatures: Vec::new() }
    }

    /// Adds a signature with the lowest priority.
    pub fn push(&mut self, signature: Signature) {
        self.signatures.push(signature);
    }

    /// Adds a signature ahead of all existing ones.
    pub fn insert_first(&mut self, signature: Signature) {
        self.signatures.insert(0, signature);
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn detect(&self, data: &[u8]) -> &str {
        self.signatures
            .iter()
            .find(|s| s.matches(data))
            .map(Signature::extension)
            .unwrap_or(DEFAULT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riff_wave() {
        let sniffer = Sniffer::default();
        assert_eq!(sniffer.detect(b"RIFF\x24\x08\x00\x00WAVEfmt "), ".wav");
        assert_eq!(sniffer.detect(b"RIFF\x24\x08\x00\x00AVI LIST"), ".avi");
    }

    #[test]
    fn xmidi() {
        assert_eq!(Sniffer::default().detect(b"FORM\x00\x00\x00\x0eXDIRINFO"), ".xmi");
    }

    #[test]
    fn unknown_defaults_to_bin() {
        let sniffer = Sniffer::default();
        assert_eq!(sniffer.detect(b"\x00\x01\x02\x03garbage"), ".bin");
        assert_eq!(sniffer.detect(b""), ".bin");
        // too short for the second part
        assert_eq!(sniffer.detect(b"RIFF\x00\x00"), ".bin");
    }

    #[test]
    fn order_decides() {
        let mut sniffer = Sniffer::default();
        sniffer.insert_first(Signature::new(".smp").at(0, b"RIFF"));
        assert_eq!(sniffer.detect(b"RIFF\x00\x00\x00\x00WAVE"), ".smp");

        let mut sniffer = Sniffer::empty();
        sniffer.push(Signature::new(".lzv").at(0, b"LZV\x1a"));
        assert_eq!(sniffer.detect(b"LZV\x1a...."), ".lzv");
        assert_eq!(sniffer.detect(b"MThd"), ".bin");
    }
}
