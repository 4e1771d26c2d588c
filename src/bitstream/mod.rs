//! The bitstream module turns a sequence of huffman codes into bytes and back.
//!
//! The payload is the codes of every symbol in order, led by a single sentinel 1 bit and
//! padded with zero bits at the front up to a whole number of bytes. Read as a big-endian
//! number, the sentinel is then always the first 1 bit, and nothing after it is lost.
//!
pub mod bitpacker;
pub mod bitreader;
