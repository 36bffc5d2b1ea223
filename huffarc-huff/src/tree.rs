//! Huffman tree construction and tree-header serialization.
//!
//! # Construction
//!
//! One leaf is created per byte value with a nonzero count, plus one leaf
//! for the end-of-stream sentinel (symbol 256, weight 1). The two lightest
//! nodes are merged repeatedly until a single root remains; the first node
//! extracted becomes the left child.
//!
//! Ties are broken by insertion order: leaves are queued in ascending
//! symbol order, the sentinel after them, and every merged node after all
//! nodes queued before it. Among nodes of equal weight the one queued first
//! is extracted first. The rule fixes the compressed output for a given
//! input; decoding never depends on it.
//!
//! # Tree Header
//!
//! The tree is written in preorder. A leaf is a `1` bit followed by its
//! symbol as a 9-bit field; an internal node is a `0` bit followed by its
//! left and right subtrees.
//!
//! ```text
//! AAAB:     (5)          header bits:
//!          /   \         0 0 1 001000010 1 100000000 1 001000001
//!        (2)    A           B            EOS          A
//!       /   \
//!      B    EOS
//! ```

use crate::codes::CodeTable;
use crate::format::constants::{ALPHABET_SIZE, END_OF_STREAM, SYMBOL_BITS};
use huffarc_core::bitstream::{BitSink, BitSource};
use huffarc_core::error::{HuffError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::{Read, Seek, Write};

/// Deepest nesting a valid tree header can have.
///
/// A tree has at most 257 leaves, so no leaf is deeper than 256 levels.
/// Header parsing recurses once per level and rejects anything deeper.
pub const MAX_TREE_DEPTH: usize = ALPHABET_SIZE;

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeNode {
    /// A symbol.
    Leaf {
        /// Byte value, or [`END_OF_STREAM`].
        symbol: u16,
        /// Occurrence count (0 for trees read from a header).
        weight: u64,
    },
    /// A merge point with exactly two children.
    Internal {
        /// Sum of the children's weights (0 for trees read from a header).
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: Box<CodeNode>,
        /// Subtree reached by a `1` bit.
        right: Box<CodeNode>,
    },
}

impl CodeNode {
    fn merge(left: CodeNode, right: CodeNode) -> Self {
        Self::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Get the node weight.
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Get the leaf symbol, or `None` for an internal node.
    pub fn symbol(&self) -> Option<u16> {
        match self {
            Self::Leaf { symbol, .. } => Some(*symbol),
            Self::Internal { .. } => None,
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    ///
    /// Leaves have no children.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&CodeNode> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }
}

/// Queue entry for tree construction.
#[derive(Debug)]
struct Pending {
    order: usize,
    node: CodeNode,
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
    // Reversed so the max-heap yields the lightest, earliest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Min-priority queue of nodes keyed by `(weight, insertion order)`.
#[derive(Debug, Default)]
struct NodeQueue {
    heap: BinaryHeap<Pending>,
    next_order: usize,
}

impl NodeQueue {
    fn push(&mut self, node: CodeNode) {
        self.heap.push(Pending {
            order: self.next_order,
            node,
        });
        self.next_order += 1;
    }

    fn pop(&mut self) -> Option<CodeNode> {
        self.heap.pop().map(|pending| pending.node)
    }
}

/// An immutable Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    root: CodeNode,
}

impl CodeTree {
    /// Build a tree from byte counts.
    ///
    /// With all counts zero the sentinel leaf alone is the root.
    pub fn from_counts(counts: &[u64; ALPHABET_SIZE]) -> Self {
        let mut queue = NodeQueue::default();

        for (symbol, &count) in counts.iter().enumerate() {
            if count > 0 {
                queue.push(CodeNode::Leaf {
                    symbol: symbol as u16,
                    weight: count,
                });
            }
        }
        queue.push(CodeNode::Leaf {
            symbol: END_OF_STREAM,
            weight: 1,
        });

        loop {
            match (queue.pop(), queue.pop()) {
                (Some(left), Some(right)) => queue.push(CodeNode::merge(left, right)),
                (Some(root), None) => return Self { root },
                (None, _) => unreachable!("the end-of-stream leaf is always queued"),
            }
        }
    }

    /// Read a tree header.
    ///
    /// Fails with a format error if the stream ends inside the header, a
    /// symbol is out of range, or nesting exceeds [`MAX_TREE_DEPTH`].
    pub fn deserialize<R: Read + Seek>(source: &mut BitSource<R>) -> Result<Self> {
        let root = read_node(source, 0)?;
        Ok(Self { root })
    }

    /// Write the tree header (preorder).
    pub fn serialize<W: Write>(&self, sink: &mut BitSink<W>) -> Result<()> {
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            match node {
                CodeNode::Leaf { symbol, .. } => {
                    sink.write_bit(true)?;
                    sink.write_bits(*symbol as u32, SYMBOL_BITS)?;
                }
                CodeNode::Internal { left, right, .. } => {
                    sink.write_bit(false)?;
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        Ok(())
    }

    /// Derive the code table.
    pub fn codes(&self) -> Result<CodeTable> {
        CodeTable::from_tree(self)
    }

    /// Get the root node.
    pub fn root(&self) -> &CodeNode {
        &self.root
    }

    /// Check if the root itself is a leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(node, _)| node.is_leaf()).count()
    }

    /// Depth of the deepest leaf (0 for a single-leaf tree).
    pub fn depth(&self) -> usize {
        self.nodes().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Size of the serialized header in bits (format marker excluded).
    pub fn header_bits(&self) -> u64 {
        self.nodes()
            .map(|(node, _)| if node.is_leaf() { 1 + SYMBOL_BITS as u64 } else { 1 })
            .sum()
    }

    /// Preorder iteration over `(node, depth)`.
    fn nodes(&self) -> impl Iterator<Item = (&CodeNode, usize)> {
        let mut stack = vec![(&self.root, 0usize)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            if let CodeNode::Internal { left, right, .. } = node {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
            Some((node, depth))
        })
    }
}

fn read_node<R: Read + Seek>(source: &mut BitSource<R>, depth: usize) -> Result<CodeNode> {
    if depth > MAX_TREE_DEPTH {
        return Err(HuffError::format(format!(
            "tree header nests deeper than {} levels",
            MAX_TREE_DEPTH
        )));
    }

    let is_leaf = source
        .read_bit()?
        .ok_or_else(|| HuffError::format("stream ended inside the tree header"))?;

    if is_leaf {
        let symbol = source
            .read_bits(SYMBOL_BITS)?
            .ok_or_else(|| HuffError::format("stream ended inside a tree header symbol"))?;
        if symbol > END_OF_STREAM as u32 {
            return Err(HuffError::format(format!(
                "tree header symbol {} out of range",
                symbol
            )));
        }
        Ok(CodeNode::Leaf {
            symbol: symbol as u16,
            weight: 0,
        })
    } else {
        let left = read_node(source, depth + 1)?;
        let right = read_node(source, depth + 1)?;
        Ok(CodeNode::Internal {
            weight: 0,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}
