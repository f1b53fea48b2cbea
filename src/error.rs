use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a valid {format} file: {reason}")]
    FormatMismatch { format: &'static str, reason: String },

    #[error("truncated input: {what} at offset {offset:#x} needs {length} bytes, file has {available}")]
    TruncatedInput {
        what: String,
        offset: u64,
        length: u64,
        available: u64,
    },

    #[error("truncated input: {what} at offset {offset:#x} runs past the end of the file, {available} bytes left")]
    TruncatedRecord { what: String, offset: u64, available: u64 },

    #[error("decompressed size mismatch for {entry}: expected {expected} bytes, got {actual}")]
    DecompressionIntegrity {
        entry: String,
        expected: u64,
        actual: u64,
    },

    #[error("corrupt {codec} stream: {reason}")]
    CorruptStream { codec: &'static str, reason: String },

    #[error("cannot decode {bytes:02x?} as {encoding}")]
    UnsupportedEncoding { encoding: &'static str, bytes: Vec<u8> },

    #[error("unknown format '{0}', see --list-formats")]
    UnknownFormat(String),

    #[error("input format not recognized")]
    Unrecognized,

    #[error("binary layout error: {0}")]
    Layout(#[from] binrw::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn mismatch(format: &'static str, reason: impl Into<String>) -> Self {
        Self::FormatMismatch { format, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
