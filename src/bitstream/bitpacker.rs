use std::hash::Hash;

use log::{error, trace};

use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};

/// Creates a bitstream for output.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() to
    /// flush the bit queue to the buffer before taking the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.write_stream();
    }

    /// Puts n zero bits on the stream.
    pub fn out_zeros(&mut self, n: usize) {
        (0..n).for_each(|_| self.out_bit(false));
    }

    /// Puts every bit of a huffman code on the stream, first bit first.
    pub fn out_code(&mut self, code: &Code) {
        code.bits().iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Flushes the remaining bits (1-7) from the buffer, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}

/// Pack symbols into a byte aligned payload.
///
/// The stream is: zero padding, one sentinel 1 bit, then the code of every symbol in order.
/// Padding goes in front so that the stream read as a big-endian number keeps the leading
/// zero bits of the first code; the sentinel marks where the codes start.
pub fn pack<S: Eq + Hash + Clone>(symbols: &[S], table: &CodeTable<S>) -> Result<Vec<u8>> {
    // Look up every code first, we need the total length to know the padding.
    let codes = symbols
        .iter()
        .map(|sym| table.code(sym).ok_or(HuffError::UnknownSymbol))
        .collect::<Result<Vec<&Code>>>()?;

    let bits = 1 + codes.iter().map(|code| code.len()).sum::<usize>();
    let padding = (8 - bits % 8) % 8;

    let mut bp = BitPacker::new((bits + padding) / 8);
    bp.out_zeros(padding);
    bp.out_bit(true);
    codes.iter().for_each(|code| bp.out_code(code));
    bp.flush();

    trace!(
        "Packed {} symbols: {} code bits + sentinel + {} padding at {}",
        symbols.len(),
        bits - 1,
        padding,
        bp.loc()
    );
    Ok(bp.output)
}

#[cfg(test)]
mod test {
    use super::{pack, BitPacker};
    use crate::error::HuffError;
    use crate::huffman_coding::code_table::CodeTable;
    use crate::huffman_coding::tree::Node;

    /// a = 0, b = 1
    fn ab_table() -> CodeTable<char> {
        CodeTable::from_tree(&Node::join(Node::leaf(1, 'a'), Node::leaf(1, 'b'))).unwrap()
    }

    #[test]
    fn out_bit_test() {
        let mut bp = BitPacker::new(2);
        [false, false, true, false, false, false, false, true]
            .iter()
            .for_each(|&bit| bp.out_bit(bit));
        bp.out_bit(true);
        assert_eq!("[1.1]", &bp.loc());
        bp.flush();
        assert_eq!(bp.output, vec![0b0010_0001, 0b1000_0000]);
        assert_eq!("[2.0]", &bp.loc());
    }

    #[test]
    fn sentinel_keeps_leading_zeros() {
        // sentinel + "0011" = 5 bits, 3 bits of padding in front
        let out = pack(&['a', 'a', 'b', 'b'], &ab_table()).unwrap();
        assert_eq!(out, vec![0b0001_0011]);
    }

    #[test]
    fn no_padding_when_aligned() {
        // sentinel + 7 code bits is exactly one byte
        let out = pack(&['a'; 7], &ab_table()).unwrap();
        assert_eq!(out, vec![0b1000_0000]);
    }

    #[test]
    fn empty_input_is_just_the_sentinel() {
        let out = pack(&[], &ab_table()).unwrap();
        assert_eq!(out, vec![0b0000_0001]);
    }

    #[test]
    fn unknown_symbol_test() {
        assert!(matches!(
            pack(&['a', 'z'], &ab_table()),
            Err(HuffError::UnknownSymbol)
        ));
    }
}
