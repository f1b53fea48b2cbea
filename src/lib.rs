use std::any::Any;
use std::path::PathBuf;

use encoding_rs::{Encoding, WINDOWS_1252};
use log::{debug, info};

pub mod archive;
pub mod error;
pub mod formats;
pub mod sanitize;
pub mod sniff;
pub mod utils;

pub use error::{Error, Result};

use archive::{ArchiveReader, ExtractReport};
use formats::Format;
use sniff::Sniffer;
use utils::hash::HashKind;

/// Everything one run needs to know, gathered from the command line.
pub struct AppContext {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// `format:option` switches.
    pub options: Vec<String>,
    pub hashes: Vec<HashKind>,
    /// Code page for stored names that are not UTF-8.
    pub codepage: &'static Encoding,
    pub sniffer: Sniffer,
    pub list_only: bool,
}

impl AppContext {
    pub fn new(input: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input,
            output_dir,
            options: Vec::new(),
            hashes: Vec::new(),
            codepage: WINDOWS_1252,
            sniffer: Sniffer::default(),
            list_only: false,
        }
    }

    pub fn has_option(&self, format: &str, option: &str) -> bool {
        self.options.iter().any(|e| e.split_once(':') == Some((format, option)))
    }
}

fn detect(app_ctx: &AppContext, reader: &mut ArchiveReader) -> Result<(Format, Box<dyn Any>)> {
    for format in formats::get_registry() {
        let Some(detector) = format.detector_func else { continue };
        if let Some(ctx) = detector(app_ctx, reader)? {
            return Ok((format, ctx));
        }
    }
    Err(Error::Unrecognized)
}

/// Opens the input, picks the format (forced by name or detected), reads its directory and
/// extracts it.
pub fn run(app_ctx: &AppContext, format_name: Option<&str>) -> Result<ExtractReport> {
    let mut reader = ArchiveReader::open(&app_ctx.input)?;
    info!("{}: {} bytes", app_ctx.input.display(), reader.len());

    let (format, ctx) = match format_name {
        Some(name) => {
            let format = formats::find(name).ok_or_else(|| Error::UnknownFormat(name.to_string()))?;
            // a forced format still gets its detector context when the signature is there
            let ctx = match format.detector_func {
                Some(detector) => detector(app_ctx, &mut reader)?,
                None => None,
            };
            (format, ctx.unwrap_or_else(|| Box::new(())))
        }
        None => detect(app_ctx, &mut reader)?,
    };

    println!("{} file detected!\n", format.description);
    debug!("using format {}", format.name);

    reader.seek(0)?;
    let directory = (format.directory_func)(app_ctx, &mut reader, ctx)?;
    archive::extract_directory(app_ctx, &mut reader, directory)
}
