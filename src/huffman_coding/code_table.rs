//! Code tables: symbol to bit code and back, derived from a finished tree.
//!
//! Codes are the path from the root to each leaf: a 0 bit for every step left, a 1 bit for
//! every step right. Because every leaf ends its own path in a strict binary tree, no code
//! can be the prefix of another.

use std::fmt::{Display, Formatter};
use std::hash::Hash;

use log::trace;
use rustc_hash::FxHashMap;

use super::tree::{Node, Pairs};
use crate::bitstream::{bitpacker, bitreader};
use crate::error::{HuffError, Result};

/// A huffman code: the bits of one root-to-leaf path, first step first.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self { bits: vec![] }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Copy of this code with one more bit on the end.
    pub fn with(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// True if `other` starts with every bit of this code.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

/// Renders as a string of 0 and 1
impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.bits
            .iter()
            .try_for_each(|&bit| write!(f, "{}", if bit { '1' } else { '0' }))
    }
}

/// Encode and decode maps kept in lock-step.
#[derive(Debug, Clone)]
pub struct CodeTable<S> {
    encode_map: FxHashMap<S, Code>,
    decode_map: FxHashMap<Code, S>,
}

impl<S: Eq + Hash + Clone> CodeTable<S> {
    fn empty() -> Self {
        Self {
            encode_map: FxHashMap::default(),
            decode_map: FxHashMap::default(),
        }
    }

    /// Record a leaf. A symbol seen twice means the tree did not come from a frequency map.
    fn add(&mut self, code: Code, sym: &S) -> Result<()> {
        if self.encode_map.insert(sym.clone(), code.clone()).is_some() {
            return Err(HuffError::CorruptHeader(
                "symbol appears in more than one leaf".to_string(),
            ));
        }
        self.decode_map.insert(code, sym.clone());
        Ok(())
    }

    /// Derive the codes for every leaf of the tree.
    pub fn from_tree(root: &Node<S>) -> Result<Self> {
        if root.is_leaf() {
            return Err(HuffError::DegenerateTree);
        }
        let mut table = Self::empty();
        let mut stack = vec![(root, Code::new())];
        while let Some((node, code)) = stack.pop() {
            match node {
                Node::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), code.with(true)));
                    stack.push((left.as_ref(), code.with(false)));
                }
                Node::Leaf { value, .. } => table.add(code, value)?,
            }
        }
        trace!(
            "Code table of {} symbols, longest code {} bits",
            table.len(),
            table.max_code_len()
        );
        Ok(table)
    }

    /// Derive the codes straight from the nested pair form of a tree.
    pub fn from_pairs(pairs: &Pairs<S>) -> Result<Self> {
        let mut table = Self::empty();
        match pairs {
            Pairs::Value(_) => return Err(HuffError::DegenerateTree),
            Pairs::Pair(left, right) => {
                table.add_pairs(left, Code::new().with(false))?;
                table.add_pairs(right, Code::new().with(true))?;
            }
        }
        Ok(table)
    }

    fn add_pairs(&mut self, pairs: &Pairs<S>, code: Code) -> Result<()> {
        match pairs {
            Pairs::Pair(left, right) => {
                self.add_pairs(left, code.with(false))?;
                self.add_pairs(right, code.with(true))
            }
            Pairs::Value(sym) => self.add(code, sym),
        }
    }

    /// Code for a symbol, if the table has one.
    pub fn code(&self, sym: &S) -> Option<&Code> {
        self.encode_map.get(sym)
    }

    /// Symbol for a complete code, if the table has one.
    pub fn symbol(&self, code: &Code) -> Option<&S> {
        self.decode_map.get(code)
    }

    pub fn len(&self) -> usize {
        self.encode_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encode_map.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.encode_map.values().map(Code::len).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &Code)> + '_ {
        self.encode_map.iter()
    }

    /// Pack the symbols into a sentinel-prefixed, byte aligned payload using this table.
    pub fn encode(&self, symbols: &[S]) -> Result<Vec<u8>> {
        bitpacker::pack(symbols, self)
    }

    /// Unpack a payload written by `encode` with an identical table.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<S>> {
        bitreader::unpack(payload, self)
    }
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable};
    use crate::error::HuffError;
    use crate::huffman_coding::tree::{Node, Pairs};

    fn code_of(table: &CodeTable<char>, sym: char) -> String {
        table.code(&sym).unwrap().to_string()
    }

    #[test]
    fn left_is_zero_right_is_one() {
        // ((a, b), c)
        let tree = Node::join(
            Node::join(Node::leaf(1, 'a'), Node::leaf(1, 'b')),
            Node::leaf(2, 'c'),
        );
        let table = CodeTable::from_tree(&tree).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(code_of(&table, 'a'), "00");
        assert_eq!(code_of(&table, 'b'), "01");
        assert_eq!(code_of(&table, 'c'), "1");
        assert_eq!(table.max_code_len(), 2);
        let code = table.code(&'b').unwrap().clone();
        assert_eq!(table.symbol(&code), Some(&'b'));
    }

    #[test]
    fn pairs_give_the_same_table() {
        let tree = Node::join(
            Node::leaf(3, 'x'),
            Node::join(Node::leaf(1, 'y'), Node::leaf(1, 'z')),
        );
        let from_tree = CodeTable::from_tree(&tree).unwrap();
        let from_pairs = CodeTable::from_pairs(&tree.to_pairs()).unwrap();
        for (sym, code) in from_tree.iter() {
            assert_eq!(from_pairs.code(sym), Some(code));
        }
        assert_eq!(code_of(&from_pairs, 'z'), "11");
    }

    #[test]
    fn single_leaf_has_no_codes() {
        assert!(matches!(
            CodeTable::from_tree(&Node::leaf(5, 'a')),
            Err(HuffError::DegenerateTree)
        ));
        assert!(matches!(
            CodeTable::from_pairs(&Pairs::Value('a')),
            Err(HuffError::DegenerateTree)
        ));
    }

    #[test]
    fn repeated_symbol_is_rejected() {
        let pairs = Pairs::pair(Pairs::Value('a'), Pairs::Value('a'));
        assert!(matches!(
            CodeTable::from_pairs(&pairs),
            Err(HuffError::CorruptHeader(_))
        ));
    }

    #[test]
    fn code_prefix_test() {
        let mut short = Code::new();
        short.push(true);
        let long = short.with(false);
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert_eq!(long.to_string(), "10");
        assert_eq!(long.len(), 2);
    }
}
