//! BitReader: reads a packed payload back one bit at a time, most significant bit first.
//!
//! NOTE: The payload is always fully in memory, so the reader works over a byte slice.
//!

use std::hash::Hash;

use log::{trace, warn};

use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};

const BIT_MASK: u8 = 0xff;

/// Reads bits from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return bit as Option<u8> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<u8> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Bits not yet read.
    pub fn remaining(&self) -> usize {
        (self.buffer.len() - self.cursor.min(self.buffer.len())) * 8 - self.bit_index
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

/// Unpack a payload written by `bitpacker::pack` with the same code table.
///
/// The payload is read as one big-endian number: leading zero bits, whole bytes included,
/// are padding and the first 1 bit is the sentinel. Any bits left over after the last
/// complete code mean the payload was cut short.
pub fn unpack<S: Eq + Hash + Clone>(payload: &[u8], table: &CodeTable<S>) -> Result<Vec<S>> {
    let mut br = BitReader::new(payload);
    // Skip the padding, up to and including the sentinel.
    loop {
        match br.bool_bit() {
            Some(true) => break,
            Some(false) => {}
            None => {
                warn!("Payload of {} bytes has no sentinel bit", payload.len());
                return Err(HuffError::TruncatedStream {
                    leftover_bits: payload.len() * 8,
                });
            }
        }
    }
    trace!("Codes start at {}, {} bits to decode", br.loc(), br.remaining());

    let mut output = Vec::with_capacity(br.remaining() / table.max_code_len().max(1));
    let mut code = Code::new();
    while let Some(bit) = br.bool_bit() {
        code.push(bit);
        if let Some(sym) = table.symbol(&code) {
            output.push(sym.clone());
            code.clear();
        }
    }

    if !code.is_empty() {
        warn!("Payload ended inside a code, {} bits unmatched", code.len());
        return Err(HuffError::TruncatedStream {
            leftover_bits: code.len(),
        });
    }
    Ok(output)
}
