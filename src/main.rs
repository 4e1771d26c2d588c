//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use hfmn::compression::compress::compress;
use hfmn::compression::decompress::{decompress, test_integrity};
use hfmn::tools::cli::{huffopts_init, Mode};
use hfmn::HuffError;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> Result<(), HuffError> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    // Log to stderr, stdout may be carrying data
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let options = huffopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress(&options),
        Mode::Unzip => decompress(&options),
        Mode::Test => test_integrity(&options),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}
