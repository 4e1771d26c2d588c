//! This helper function builds the huffman tree from a frequency map.
//!
//! Standard greedy build: every symbol starts as a leaf, then the two lightest nodes are
//! repeatedly pulled out and joined until a single root is left. The first node pulled
//! becomes the left child.
//!
//! Equal weights are resolved by insertion order, so the same map always gives the same
//! tree (and the same codes). Leaves are inserted in the map's first-appearance order and
//! every joined node is inserted after everything already in the heap.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use log::debug;

use super::tree::Node;
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyMap;

/// Heap ordering key: lightest weight first, then earliest insertion.
/// The nodes themselves stay out of the heap, so they need no ordering of their own.
type MergeKey = Reverse<(u64, usize)>;

/// Nodes waiting to be merged, indexed by insertion number.
struct MergeQueue<S> {
    heap: BinaryHeap<MergeKey>,
    slots: Vec<Option<Node<S>>>,
}

impl<S> MergeQueue<S> {
    fn with_capacity(leaves: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(leaves),
            // A tree with n leaves has 2n - 1 nodes
            slots: Vec::with_capacity(2 * leaves),
        }
    }

    fn push(&mut self, node: Node<S>) {
        self.heap.push(Reverse((node.weight(), self.slots.len())));
        self.slots.push(Some(node));
    }

    /// Pull off the lightest node, or None if the queue is empty.
    fn pop(&mut self) -> Option<Node<S>> {
        let Reverse((_, seq)) = self.heap.pop()?;
        self.slots[seq].take()
    }
}

/// Build an optimal prefix tree from a frequency map holding at least two symbols.
pub fn build_tree<S>(freqs: &FrequencyMap<S>) -> Result<Node<S>>
where
    S: Eq + Hash + Clone,
{
    if freqs.len() < 2 {
        return Err(HuffError::InsufficientAlphabet {
            distinct: freqs.len(),
        });
    }

    let mut queue = MergeQueue::with_capacity(freqs.len());
    freqs
        .iter()
        .for_each(|(sym, weight)| queue.push(Node::leaf(weight, sym.clone())));

    // ...then pare it down to one single node with child nodes.
    while let Some(left) = queue.pop() {
        match queue.pop() {
            Some(right) => queue.push(Node::join(left, right)),
            None => {
                debug!(
                    "Built tree of {} leaves, depth {}, total weight {}",
                    left.leaf_count(),
                    left.depth(),
                    left.weight()
                );
                return Ok(left);
            }
        }
    }
    // Only reachable if the queue started empty, which the length check rules out.
    Err(HuffError::DegenerateTree)
}
