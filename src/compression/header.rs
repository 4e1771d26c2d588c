//! Tree header: the byte form of the nested pair value stored at the front of a container.
//!
//! The tree is written preorder with one tag byte per node:
//!   0x00  pair, the left subtree and then the right subtree follow
//!   0x01  value, the symbol bytes follow
//!
//! How a symbol is written depends on its type, see `HeaderSymbol`.
//!
//! Reading is done with an explicit stack. Trees are still dropped recursively, so the reader
//! refuses anything deeper than `MAX_TREE_DEPTH` and any symbol stored twice, before the tree
//! can grow.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::error::{HuffError, Result};
use crate::huffman_coding::tree::Node;

const TAG_PAIR: u8 = 0x00;
const TAG_VALUE: u8 = 0x01;

/// Deepest tree a header may describe. A greedy tree of depth d needs a total weight of at
/// least the (d+2)th Fibonacci number, so no input that fits in memory comes near this.
pub const MAX_TREE_DEPTH: usize = 128;

/// A symbol type that can be stored in a tree header.
pub trait HeaderSymbol: Eq + Hash + Clone {
    /// Append the symbol's bytes.
    fn write_header(&self, out: &mut Vec<u8>);
    /// Read one symbol from the front of `input`, advancing it past the bytes used.
    fn read_header(input: &mut &[u8]) -> Result<Self>;
}

/// Split n bytes off the front of the input.
fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
    if input.len() < n {
        return Err(HuffError::CorruptHeader(format!(
            "needed {} more bytes, {} left",
            n,
            input.len()
        )));
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

impl HeaderSymbol for u8 {
    fn write_header(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }

    fn read_header(input: &mut &[u8]) -> Result<Self> {
        Ok(take(input, 1)?[0])
    }
}

impl HeaderSymbol for u16 {
    fn write_header(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }

    fn read_header(input: &mut &[u8]) -> Result<Self> {
        let bytes = take(input, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

impl HeaderSymbol for u32 {
    fn write_header(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }

    fn read_header(input: &mut &[u8]) -> Result<Self> {
        let bytes = take(input, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Characters are stored as UTF-8, 1 to 4 bytes.
impl HeaderSymbol for char {
    fn write_header(&self, out: &mut Vec<u8>) {
        let mut buf = [0_u8; 4];
        out.extend_from_slice(self.encode_utf8(&mut buf).as_bytes());
    }

    fn read_header(input: &mut &[u8]) -> Result<Self> {
        let lead = *input
            .first()
            .ok_or_else(|| HuffError::CorruptHeader("missing character".to_string()))?;
        // The lead byte tells us how long the sequence is
        let width = match lead {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => {
                return Err(HuffError::CorruptHeader(format!(
                    "bad UTF-8 lead byte {:#04x}",
                    lead
                )))
            }
        };
        let bytes = take(input, width)?;
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| HuffError::CorruptHeader("invalid UTF-8 character".to_string()))
    }
}

/// Serialize the shape and symbols of a tree. Weights are not stored.
pub fn write_tree<S: HeaderSymbol>(root: &Node<S>) -> Vec<u8> {
    let mut out = vec![];
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            Node::Internal { left, right, .. } => {
                out.push(TAG_PAIR);
                stack.push(right.as_ref());
                stack.push(left.as_ref());
            }
            Node::Leaf { value, .. } => {
                out.push(TAG_VALUE);
                value.write_header(&mut out);
            }
        }
    }
    out
}

/// Rebuild a tree from its header. Leaves get weight 1.
///
/// The header must hold exactly one tree whose root is a pair, no deeper than
/// `MAX_TREE_DEPTH`, with every symbol in a single leaf.
pub fn read_tree<S: HeaderSymbol>(header: &[u8]) -> Result<Node<S>> {
    let mut input = header;
    if input.first() != Some(&TAG_PAIR) {
        return Err(HuffError::CorruptHeader(
            "tree must start with a pair".to_string(),
        ));
    }

    // Open pairs: None while waiting for the left child, Some(left) while waiting for the right.
    let mut open: Vec<Option<Node<S>>> = vec![];
    let mut seen = FxHashSet::default();
    let root = 'outer: loop {
        let tag = take(&mut input, 1)?[0];
        let mut node = match tag {
            TAG_PAIR => {
                if open.len() == MAX_TREE_DEPTH {
                    return Err(HuffError::CorruptHeader(format!(
                        "tree is deeper than {} levels",
                        MAX_TREE_DEPTH
                    )));
                }
                open.push(None);
                continue;
            }
            TAG_VALUE => {
                let sym = S::read_header(&mut input)?;
                if !seen.insert(sym.clone()) {
                    return Err(HuffError::CorruptHeader(
                        "symbol appears in more than one leaf".to_string(),
                    ));
                }
                Node::leaf(1, sym)
            }
            other => {
                return Err(HuffError::CorruptHeader(format!(
                    "unknown node tag {:#04x}",
                    other
                )))
            }
        };
        // Close every pair this node completes
        loop {
            match open.pop() {
                Some(None) => {
                    open.push(Some(node));
                    break;
                }
                Some(Some(left)) => node = Node::join(left, node),
                None => break 'outer node,
            }
        }
    };

    if !input.is_empty() {
        return Err(HuffError::CorruptHeader(format!(
            "{} bytes after the end of the tree",
            input.len()
        )));
    }
    Ok(root)
}
