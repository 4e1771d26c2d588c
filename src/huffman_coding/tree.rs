//! The huffman tree itself.
//!
//! A tree is either a weighted leaf carrying a symbol, or an internal node that owns
//! exactly two children and weighs their sum. Trees are built once and never changed;
//! merging two subtrees always makes a new internal node.
//!
//! The structural form of a tree is the nested pair value (`Pairs`). A leaf becomes its
//! bare symbol and an internal node becomes the pair of its children. Weights do not
//! survive that trip: only shape and symbols matter once the codes are known.

use crate::error::{HuffError, Result};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Node<S> {
    Leaf {
        weight: u64,
        value: S,
    },
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

/// Nested pair form of a tree: `Value(symbol)` for leaves, `Pair(left, right)` otherwise.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Pairs<S> {
    Value(S),
    Pair(Box<Pairs<S>>, Box<Pairs<S>>),
}

impl<S> Pairs<S> {
    /// Convenience constructor for a pair of two sub-values.
    pub fn pair(left: Pairs<S>, right: Pairs<S>) -> Self {
        Pairs::Pair(Box::new(left), Box::new(right))
    }
}

impl<S> Node<S> {
    /// Create a new leaf
    pub fn leaf(weight: u64, value: S) -> Self {
        Node::Leaf { weight, value }
    }

    /// Merge two subtrees under a new internal node. The new weight is the sum of both.
    pub fn join(left: Node<S>, right: Node<S>) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of edges on the longest path from this node to a leaf. This is also the
    /// longest code length the tree will produce.
    pub fn depth(&self) -> usize {
        self.leaves().iter().map(|&(_, _, depth)| depth).max().unwrap_or(0)
    }

    /// Number of leaves (symbols) below this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        count
    }

    /// Walk the tree left to right and return every leaf as (symbol, weight, depth).
    pub fn leaves(&self) -> Vec<(&S, u64, usize)> {
        let mut leaves = vec![];
        let mut stack = vec![(self, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { weight, value } => leaves.push((value, *weight, depth)),
                Node::Internal { left, right, .. } => {
                    // Right goes on first so the left side comes off the stack first
                    stack.push((right.as_ref(), depth + 1));
                    stack.push((left.as_ref(), depth + 1));
                }
            }
        }
        leaves
    }

    /// Sum of weight * depth over all leaves. The quantity a huffman tree minimizes.
    pub fn weighted_path_length(&self) -> u64 {
        self.leaves()
            .iter()
            .map(|&(_, weight, depth)| weight * depth as u64)
            .sum()
    }

    /// Group the nodes by level, root first. Each level lists its nodes left to right.
    pub fn layers(&self) -> Vec<Vec<&Node<S>>> {
        let mut layers = vec![];
        let mut level = vec![self];
        while !level.is_empty() {
            let next = level
                .iter()
                .copied()
                .flat_map(|node| match node {
                    Node::Internal { left, right, .. } => vec![left.as_ref(), right.as_ref()],
                    Node::Leaf { .. } => vec![],
                })
                .collect::<Vec<_>>();
            layers.push(level);
            level = next;
        }
        layers
    }

    /// Convert to the nested pair form, dropping weights.
    pub fn to_pairs(&self) -> Pairs<S>
    where
        S: Clone,
    {
        match self {
            Node::Leaf { value, .. } => Pairs::Value(value.clone()),
            Node::Internal { left, right, .. } => Pairs::pair(left.to_pairs(), right.to_pairs()),
        }
    }

    /// Rebuild a tree from its nested pair form. Leaves come back with weight 1 and
    /// internal weights are summed on the way up.
    ///
    /// A bare value is not a tree: it would leave no path to code.
    pub fn from_pairs(pairs: Pairs<S>) -> Result<Self> {
        match pairs {
            Pairs::Value(_) => Err(HuffError::CorruptHeader(
                "tree must be a pair of at least two values".to_string(),
            )),
            pairs => Ok(Self::from_pairs_part(pairs)),
        }
    }

    fn from_pairs_part(pairs: Pairs<S>) -> Self {
        match pairs {
            Pairs::Value(value) => Node::leaf(1, value),
            Pairs::Pair(left, right) => {
                Node::join(Self::from_pairs_part(*left), Self::from_pairs_part(*right))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Node, Pairs};
    use crate::error::HuffError;

    /// ((a, b), c) with weights a=1, b=2, c=4
    fn sample() -> Node<char> {
        Node::join(
            Node::join(Node::leaf(1, 'a'), Node::leaf(2, 'b')),
            Node::leaf(4, 'c'),
        )
    }

    #[test]
    fn join_sums_weights() {
        let tree = sample();
        assert_eq!(tree.weight(), 7);
        assert!(!tree.is_leaf());
    }

    #[test]
    fn depth_and_leaf_count_test() {
        let tree = sample();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(Node::leaf(3, 'x').depth(), 0);
    }

    #[test]
    fn leaves_come_left_to_right() {
        let tree = sample();
        let leaves = tree.leaves();
        assert_eq!(leaves, vec![(&'a', 1, 2), (&'b', 2, 2), (&'c', 4, 1)]);
        // 1*2 + 2*2 + 4*1
        assert_eq!(tree.weighted_path_length(), 10);
    }

    #[test]
    fn layers_test() {
        let tree = sample();
        let layers = tree.layers();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].len(), 1);
        assert_eq!(layers[1].len(), 2);
        assert!(layers[1][1].is_leaf());
        assert_eq!(layers[2].iter().map(|n| n.weight()).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn pairs_keep_shape_and_values() {
        let tree = sample();
        let pairs = tree.to_pairs();
        assert_eq!(
            pairs,
            Pairs::pair(Pairs::pair(Pairs::Value('a'), Pairs::Value('b')), Pairs::Value('c'))
        );
        let back = Node::from_pairs(pairs.clone()).unwrap();
        // Weights are reset, shape is not
        assert_eq!(back.weight(), 3);
        assert_eq!(back.to_pairs(), pairs);
    }

    #[test]
    fn bare_value_is_not_a_tree() {
        let result = Node::from_pairs(Pairs::Value('a'));
        assert!(matches!(result, Err(HuffError::CorruptHeader(_))));
    }
}
