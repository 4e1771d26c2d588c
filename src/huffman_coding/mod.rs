//! The huffman module builds the prefix code tree and the code tables derived from it.
//!
//! A tree is built once per input from its symbol counts by the usual greedy merge of the two
//! lightest nodes. The codes are the root-to-leaf paths of that tree, 0 for left and 1 for
//! right, so no code is ever the prefix of another.
//!
//! Building a tree and deriving its codes is sequential. Finished trees and tables are never
//! changed, so they can be shared between threads for reading.
//!

pub mod code_table;
pub mod tree;
pub mod tree_builder;
