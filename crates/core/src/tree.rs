//! Huffman tree construction.
//!
//! Classic greedy construction over a min-priority queue: pop the two
//! lightest nodes, join them under a new internal node whose weight is their
//! sum, push it back, repeat until one node is left.
//!
//! # Tie-break Policy
//!
//! Queue entries are keyed by `(weight, sequence)`. Leaves receive sequence
//! numbers in input order, merged nodes continue the count as they are
//! created. Among equal weights the oldest entry is extracted first, so the
//! result is fully determined by the input order. The first node extracted
//! in a step becomes the left child, the second the right child.
//!
//! Changing the tie-break changes individual codes but never the total
//! weighted code length.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::alphabet::Symbol;
use crate::error::{Error, Result};

/// A node of a Huffman tree. Children are exclusively owned.
#[derive(Debug, Clone, PartialEq)]
pub enum HuffNode {
    Leaf {
        symbol: Symbol,
        weight: f64,
    },
    Internal {
        weight: f64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn weight(&self) -> f64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two nodes; `left` is the one extracted first.
    fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn height(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<Symbol>) {
        match self {
            HuffNode::Leaf { symbol, .. } => out.push(*symbol),
            HuffNode::Internal { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}

/// Queue entry: min-ordered by weight, then by creation sequence.
struct Pending {
    weight: f64,
    sequence: usize,
    node: HuffNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A finished Huffman tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build a tree from `(symbol, weight)` pairs.
    ///
    /// Zero weights are legal and produce ordinary leaves. A single entry
    /// produces a tree whose root is that leaf.
    ///
    /// # Errors
    /// `Error::EmptyAlphabet` if `weights` is empty.
    pub fn build(weights: &[(Symbol, f64)]) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        let mut heap: BinaryHeap<Pending> = weights
            .iter()
            .enumerate()
            .map(|(sequence, &(symbol, weight))| Pending {
                weight,
                sequence,
                node: HuffNode::Leaf { symbol, weight },
            })
            .collect();

        let mut sequence = weights.len();
        loop {
            let first = match heap.pop() {
                Some(entry) => entry,
                None => return Err(Error::EmptyAlphabet),
            };
            let second = match heap.pop() {
                Some(entry) => entry,
                None => {
                    let root = first.node;
                    log::debug!(
                        "built huffman tree: {} leaves, height {}",
                        root.leaf_count(),
                        root.height()
                    );
                    return Ok(Self { root });
                }
            };

            let merged = HuffNode::merge(first.node, second.node);
            heap.push(Pending {
                weight: merged.weight(),
                sequence,
                node: merged,
            });
            sequence += 1;
        }
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Total weight of all leaves.
    pub fn weight(&self) -> f64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Edges on the longest root-to-leaf path (0 for a lone leaf).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Leaf symbols, left to right.
    pub fn leaves(&self) -> Vec<Symbol> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.root.collect_leaves(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(matches!(HuffmanTree::build(&[]), Err(Error::EmptyAlphabet)));
    }

    #[test]
    fn test_single_leaf() {
        let tree = HuffmanTree::build(&[(b'x', 1.0)]).unwrap();
        assert!(matches!(tree.root(), HuffNode::Leaf { symbol: b'x', .. }));
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_textbook_example_shape() {
        // b and c merge first, then the pair joins a
        let tree = HuffmanTree::build(&[(b'a', 0.5), (b'b', 0.25), (b'c', 0.25)]).unwrap();

        match tree.root() {
            HuffNode::Internal { left, right, weight } => {
                assert!((weight - 1.0).abs() < 1e-12);
                assert!(matches!(**left, HuffNode::Leaf { symbol: b'a', .. }));
                match &**right {
                    HuffNode::Internal { left, right, .. } => {
                        assert!(matches!(**left, HuffNode::Leaf { symbol: b'b', .. }));
                        assert!(matches!(**right, HuffNode::Leaf { symbol: b'c', .. }));
                    }
                    other => panic!("expected internal node, got {other:?}"),
                }
            }
            other => panic!("expected internal root, got {other:?}"),
        }
    }

    #[test]
    fn test_first_extracted_is_left() {
        // Lighter node is extracted first regardless of input order
        let tree = HuffmanTree::build(&[(b'h', 0.9), (b'l', 0.1)]).unwrap();
        assert_eq!(tree.leaves(), vec![b'l', b'h']);
    }

    #[test]
    fn test_equal_weights_fifo() {
        let tree = HuffmanTree::build(&[(b'p', 0.25), (b'q', 0.25), (b'r', 0.25), (b's', 0.25)])
            .unwrap();
        // p+q first, r+s second, then (pq)+(rs)
        assert_eq!(tree.leaves(), vec![b'p', b'q', b'r', b's']);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_zero_weight_leaves() {
        let tree =
            HuffmanTree::build(&[(b'a', 1.0), (b'b', 0.0), (b'c', 0.0), (b'd', 0.0)]).unwrap();
        let mut leaves = tree.leaves();
        leaves.sort_unstable();
        assert_eq!(leaves, b"abcd");
        assert!((tree.weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_height_bounded_by_symbol_count() {
        // Fibonacci-like weights produce the deepest possible tree
        let weights: Vec<(Symbol, f64)> = [1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0]
            .iter()
            .enumerate()
            .map(|(i, &w)| (b'a' + i as u8, w))
            .collect();
        let tree = HuffmanTree::build(&weights).unwrap();
        assert_eq!(tree.height(), weights.len() - 1);
        assert_eq!(tree.leaf_count(), weights.len());
    }
}
