use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{info, warn};

use super::container::{encode_bytes, encode_str};
use crate::error::Result;
use crate::tools::cli::{HuffOpts, Output, SymbolKind, EXTENSION};

/*
    File handling for the hfmn binary. The codec itself never touches files: everything
    here reads a whole input into memory, hands it to the container functions, and writes
    the result back out.
*/

/// Read one input. "-" or no name at all is stdin.
pub(crate) fn read_input(name: Option<&str>) -> Result<Vec<u8>> {
    let mut data = vec![];
    match name {
        Some(fname) if fname != "-" => data = fs::read(fname)?,
        _ => {
            io::stdin().read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

/// Write one output to a file or stdout, refusing to overwrite unless forced.
pub(crate) fn write_output(fname: &str, data: &[u8], opts: &HuffOpts) -> Result<()> {
    match opts.output {
        Output::Stdout => {
            let mut out = io::stdout();
            out.write_all(data)?;
            out.flush()?;
        }
        Output::File => {
            if Path::new(fname).exists() && !opts.force_overwrite {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists, use -f to overwrite", fname),
                )
                .into());
            }
            fs::write(fname, data)?;
        }
    }
    Ok(())
}

/// Encode raw input according to the symbol kind chosen on the command line.
pub(crate) fn encode_input(data: Vec<u8>, symbols: &SymbolKind) -> Result<Vec<u8>> {
    match symbols {
        SymbolKind::Bytes => encode_bytes(&data),
        SymbolKind::Text => {
            let text = String::from_utf8(data)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            encode_str(&text)
        }
    }
}

/// Compress every input named in opts <HuffOpts>, or stdin if there are none.
pub fn compress(opts: &HuffOpts) -> Result<()> {
    if opts.files.is_empty() {
        let packed = encode_input(read_input(None)?, &opts.symbols)?;
        return write_output("-", &packed, opts);
    }
    for fname in &opts.files {
        compress_file(fname, opts)?;
    }
    Ok(())
}

fn compress_file(fname: &str, opts: &HuffOpts) -> Result<()> {
    if fname.ends_with(&format!(".{}", EXTENSION)) {
        warn!("{} already has the .{} extension", fname, EXTENSION);
    }
    let data = read_input(Some(fname))?;
    let size_in = data.len();
    let packed = encode_input(data, &opts.symbols)?;
    info!(
        "{}: {} -> {} bytes ({:.1}%)",
        fname,
        size_in,
        packed.len(),
        packed.len() as f64 * 100.0 / size_in.max(1) as f64
    );

    write_output(&format!("{}.{}", fname, EXTENSION), &packed, opts)?;
    if !opts.keep_input_files && opts.output == Output::File {
        fs::remove_file(fname)?;
    }
    Ok(())
}
