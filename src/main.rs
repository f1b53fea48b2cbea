use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use encoding_rs::Encoding;

use resextract::utils::hash::HashKind;
use resextract::{AppContext, formats};

fn parse_codepage(label: &str) -> Result<&'static Encoding, String> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| format!("unknown code page '{}'", label))
}

#[derive(Parser, Debug)]
#[command(version, about = "Extracts files from legacy game archives and Mac containers")]
struct Args {
    /// Archive to extract
    input_target: Option<PathBuf>,

    #[arg(default_value = "extracted")]
    output_folder: PathBuf,

    /// Use this format instead of detecting one
    #[arg(short, long)]
    format: Option<String>,

    /// Print the known formats and exit
    #[arg(long)]
    list_formats: bool,

    /// Print the directory without writing anything
    #[arg(short, long)]
    list: bool,

    /// Format option, e.g. lbx:keep_deaf
    #[arg(short = 'o', long = "option")]
    options: Vec<String>,

    /// Print a digest of every written file
    #[arg(long, value_enum)]
    hash: Vec<HashKind>,

    /// Code page for stored names that are not UTF-8
    #[arg(long, value_parser = parse_codepage, default_value = "windows-1252")]
    codepage: &'static Encoding,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.list_formats {
        for format in formats::get_registry() {
            let how = if format.detector_func.is_some() { "detected" } else { "--format only" };
            println!("{:<18} {} ({})", format.name, format.description, how);
        }
        return;
    }

    let Some(input) = args.input_target else {
        eprintln!("error: no input file given");
        exit(1);
    };

    println!("resextract archive extractor");
    println!("Input target: {}", input.display());
    println!("Output folder: {}", args.output_folder.display());

    let mut app_ctx = AppContext::new(input, args.output_folder);
    app_ctx.options = args.options;
    app_ctx.hashes = args.hash;
    app_ctx.codepage = args.codepage;
    app_ctx.list_only = args.list;

    if let Err(e) = resextract::run(&app_ctx, args.format.as_deref()) {
        eprintln!("error: {e}");
        exit(1);
    }
}
