//! The hfmn container: one self-describing byte buffer per encoded sequence.
//!
//! ```text
//! offset 0      u16, big-endian   header length L
//! offset 2      L bytes           tree header (see compression::header)
//! offset 2+L    remaining bytes   packed payload (see bitstream::bitpacker)
//! ```
//!
//! Basic usage:
//!
//! ```
//! let packed = hfmn::encode_str("abracadabra").unwrap();
//! assert_eq!(hfmn::decode_str(&packed).unwrap(), "abracadabra");
//! ```

use log::{debug, trace};

use super::header::{read_tree, write_tree, HeaderSymbol};
use crate::bitstream::{bitpacker::pack, bitreader::unpack};
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::tree_builder::build_tree;
use crate::tools::freq_count::freqs;

/// Width of the header length field.
pub const HEADER_LEN_BYTES: usize = 2;

/// Encode a symbol sequence into a container. Needs at least two distinct symbols.
pub fn encode<S>(symbols: &[S]) -> Result<Vec<u8>>
where
    S: HeaderSymbol + Send + Sync,
{
    let counts = freqs(symbols)?;
    let tree = build_tree(&counts)?;

    let header = write_tree(&tree);
    let header_len = u16::try_from(header.len())
        .map_err(|_| HuffError::HeaderTooLarge { len: header.len() })?;

    let table = CodeTable::from_tree(&tree)?;
    let payload = pack(symbols, &table)?;

    let mut out = Vec::with_capacity(HEADER_LEN_BYTES + header.len() + payload.len());
    out.extend_from_slice(&header_len.to_be_bytes());
    out.extend_from_slice(&header);
    out.extend_from_slice(&payload);

    debug!(
        "Encoded {} symbols ({} distinct) into {} bytes: header {}, payload {}",
        symbols.len(),
        counts.len(),
        out.len(),
        header.len(),
        payload.len()
    );
    Ok(out)
}

/// Decode a container back into the symbol sequence it was built from.
pub fn decode<S: HeaderSymbol>(container: &[u8]) -> Result<Vec<S>> {
    if container.len() < HEADER_LEN_BYTES {
        return Err(HuffError::CorruptHeader(format!(
            "container of {} bytes has no header length",
            container.len()
        )));
    }
    let (len_field, body) = container.split_at(HEADER_LEN_BYTES);
    let header_len = u16::from_be_bytes([len_field[0], len_field[1]]) as usize;
    if body.len() < header_len {
        return Err(HuffError::CorruptHeader(format!(
            "header length {} runs past the {} bytes that follow",
            header_len,
            body.len()
        )));
    }
    let (header, payload) = body.split_at(header_len);
    trace!(
        "Container: header {} bytes, payload {} bytes",
        header.len(),
        payload.len()
    );

    let tree = read_tree::<S>(header)?;
    let table = CodeTable::from_tree(&tree)?;
    let symbols = unpack(payload, &table)?;
    debug!(
        "Decoded {} symbols from {} bytes",
        symbols.len(),
        container.len()
    );
    Ok(symbols)
}

/// Encode text, one symbol per character.
pub fn encode_str(text: &str) -> Result<Vec<u8>> {
    encode(&text.chars().collect::<Vec<char>>())
}

/// Decode a container made by `encode_str`.
pub fn decode_str(container: &[u8]) -> Result<String> {
    Ok(decode::<char>(container)?.into_iter().collect())
}

/// Encode binary data, one symbol per byte.
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    encode(data)
}

/// Decode a container made by `encode_bytes`.
pub fn decode_bytes(container: &[u8]) -> Result<Vec<u8>> {
    decode::<u8>(container)
}
