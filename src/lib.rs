//! hfmn: a huffman tree codec.
//!
//! Version 0.1.0
//!
//! Encodes a sequence of symbols (bytes, characters, or any type implementing `HeaderSymbol`)
//! into a single self-describing buffer: a 2 byte header length, the huffman tree, and the
//! packed codes. Decoding needs nothing but that buffer.
//!
//! ```
//! let packed = hfmn::encode_bytes(b"abracadabra").unwrap();
//! assert_eq!(hfmn::decode_bytes(&packed).unwrap(), b"abracadabra");
//! ```
//!
//! Basic usage of the binary to compress a file is as follows:
//!
//! `$> hfmn -z test.txt`
//!
//! This will compress the file and create the file test.txt.hfmn.
//! The original file will be deleted unless -k is given.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::container::{
    decode, decode_bytes, decode_str, encode, encode_bytes, encode_str,
};
pub use compression::header::HeaderSymbol;
pub use error::{HuffError, Result};
pub use huffman_coding::code_table::{Code, CodeTable};
pub use huffman_coding::tree::{Node, Pairs};
pub use huffman_coding::tree_builder::build_tree;
pub use tools::freq_count::{freqs, FrequencyMap};
