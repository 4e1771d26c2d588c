//! Error type shared by every stage of the hfmn codec.
//!
//! Every failure is a deterministic function of the input, so nothing here is
//! retried. Encode and decode either return a complete result or exactly one of
//! these errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuffError {
    /// Fewer than two distinct symbols in the input to encode.
    #[error("need at least 2 distinct symbols to build a code tree ({distinct} given)")]
    InsufficientAlphabet { distinct: usize },

    /// A code table was requested for a tree whose root is a single leaf.
    #[error("degenerate tree: root is a leaf, no codable path")]
    DegenerateTree,

    /// The serialized tree does not fit the 2 byte header length field.
    #[error("tree header is {len} bytes, the container limit is 65535")]
    HeaderTooLarge { len: usize },

    /// The header bytes do not describe a valid binary tree.
    #[error("corrupt tree header: {0}")]
    CorruptHeader(String),

    /// Payload ended part way through a code, or carried no sentinel bit.
    #[error("truncated bit stream: {leftover_bits} unmatched bits at end of payload")]
    TruncatedStream { leftover_bits: usize },

    /// A symbol to encode has no entry in the code table.
    #[error("symbol has no code in this table")]
    UnknownSymbol,

    /// File level failure in the compress/decompress drivers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuffError>;
