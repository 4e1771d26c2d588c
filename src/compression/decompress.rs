use std::fs;

use log::{error, info};

use super::compress::{read_input, write_output};
use super::container::{decode_bytes, decode_str};
use crate::error::Result;
use crate::tools::cli::{HuffOpts, Output, SymbolKind, EXTENSION};

/// Decode one container according to the symbol kind it was written with.
fn decode_input(packed: &[u8], symbols: &SymbolKind) -> Result<Vec<u8>> {
    match symbols {
        SymbolKind::Bytes => decode_bytes(packed),
        SymbolKind::Text => Ok(decode_str(packed)?.into_bytes()),
    }
}

/// Output name for a compressed file: strip .hfmn, or add .out if it is not there.
fn output_name(fname: &str) -> String {
    match fname.strip_suffix(&format!(".{}", EXTENSION)) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", fname),
    }
}

/// Decompress every input named in opts <HuffOpts>, or stdin if there are none.
pub fn decompress(opts: &HuffOpts) -> Result<()> {
    if opts.files.is_empty() {
        let data = decode_input(&read_input(None)?, &opts.symbols)?;
        return write_output("-", &data, opts);
    }
    for fname in &opts.files {
        let packed = read_input(Some(fname.as_str()))?;
        let data = decode_input(&packed, &opts.symbols).map_err(|e| {
            error!("{}: {}", fname, e);
            e
        })?;
        info!("{}: {} -> {} bytes", fname, packed.len(), data.len());

        write_output(&output_name(fname), &data, opts)?;
        if !opts.keep_input_files && opts.output == Output::File {
            fs::remove_file(fname)?;
        }
    }
    Ok(())
}

/// Check that every input decodes, without writing anything.
pub fn test_integrity(opts: &HuffOpts) -> Result<()> {
    let names = if opts.files.is_empty() {
        vec![None]
    } else {
        opts.files.iter().map(|f| Some(f.as_str())).collect()
    };
    for name in names {
        let packed = read_input(name)?;
        match decode_input(&packed, &opts.symbols) {
            Ok(data) => info!("{}: ok, {} bytes", name.unwrap_or("(stdin)"), data.len()),
            Err(e) => {
                error!("{}: {}", name.unwrap_or("(stdin)"), e);
                return Err(e);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::output_name;

    #[test]
    fn output_name_test() {
        assert_eq!(output_name("notes.txt.hfmn"), "notes.txt");
        assert_eq!(output_name("notes.bin"), "notes.bin.out");
        assert_eq!(output_name(".hfmn"), ".hfmn.out");
    }
}
