use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// File extension given to compressed output.
pub const EXTENSION: &str = "hfmn";

/// Verbosity of user information
#[derive(Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Zip, Unzip, Test
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What one symbol of the input is
#[derive(Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// Every byte is a symbol
    Bytes,
    /// Every UTF-8 character is a symbol
    Text,
}

#[derive(Debug)]
pub struct HuffOpts {
    /// Vec of names of files to read for input. Empty means stdin.
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// How the input is split into symbols
    pub symbols: SymbolKind,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            symbols: SymbolKind::Bytes,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman tree compressor",
    long_about = "
    Compresses each input with a single huffman tree built from its own symbol counts.
    The tree is stored in front of the packed data, so every .hfmn file decodes on its own.

    Input is read as bytes unless --text is given, in which case each UTF-8 character
    is one symbol."
)]
pub struct Args {
    /// Files to process. Reads stdin and writes stdout when none are given.
    #[clap()]
    files: Vec<String>,

    /// Perform compression on the input file
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    ///Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Treat the input as UTF-8 text, one symbol per character
    #[clap(long = "text")]
    text: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 1)]
    v: u8,
}

/// Put command line information from CLAP into our internal structure and set the log level.
pub fn huffopts_init() -> HuffOpts {
    huffopts_from(Args::parse())
}

fn huffopts_from(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();

    opts.op_mode = if args.test {
        Mode::Test
    } else if args.decompress {
        Mode::Unzip
    } else {
        Mode::Zip
    };
    if args.compress && args.decompress {
        warn!("Both -z and -d given, decompressing");
    }

    opts.files = args.files;
    opts.force_overwrite = args.force;
    opts.keep_input_files = args.keep;
    // No files means a filter from stdin to stdout
    if args.stdout || opts.files.is_empty() {
        opts.output = Output::Stdout
    };
    if args.text {
        opts.symbols = SymbolKind::Text
    };

    opts.verbose = match args.v {
        0 => Verbosity::Quiet,
        1 => Verbosity::Errors,
        2 => Verbosity::Warnings,
        3 => Verbosity::Info,
        4 => Verbosity::Debug,
        _ => Verbosity::Trace,
    };
    // Set the log level
    match opts.verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Errors => log::set_max_level(log::LevelFilter::Error),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };

    // Below we report initialization status to the user
    info!("---- hfmn Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Output sent to {}", opts.output);
    info!("Symbols are {:?}", opts.symbols);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- hfmn Initialization End ----\n");
    opts
}
