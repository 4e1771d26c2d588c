//! The compression module puts the pieces together into a single self-describing container.
//!
//! Encoding happens in the following steps:
//! - Frequency count: count every distinct symbol in the input.
//! - Tree build: merge the counts into a huffman tree.
//! - Header: store the shape and symbols of the tree.
//! - Packing: write the code of every input symbol behind a sentinel bit.
//!
//! Decoding reads the header back into a tree, rebuilds the code table from it, and
//! unpacks the payload.
//!
//! The compress and decompress drivers are only for the hfmn binary: they read files and
//! write files around the in-memory container functions.
//!

pub mod compress;
pub mod container;
pub mod decompress;
pub mod header;
