//! Huffman tree stored as an arena of nodes.
//!
//! Nodes refer to each other by index (`NodeId`) rather than by pointer, so
//! the parent links needed for leaf-to-root code extraction and the child
//! links needed for decoding can coexist without shared ownership.
//!
//! # Construction rules
//! - The queue is seeded with one leaf per symbol, keyed by frequency, ties
//!   broken by ascending symbol value.
//! - Merged nodes are keyed by their summed frequency and tie-break after
//!   every leaf, in creation order.
//! - When two subtrees merge, the one with more nodes becomes the right
//!   child. With equal sizes the first popped subtree goes left.
//!
//! These rules fix the tree shape completely, so two encoders fed the same
//! table produce bit-identical trees.

use crate::byteseq::ByteSeq;
use crate::codebook::Codebook;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::pqueue::MinQueue;

/// Index of a node within its tree.
pub type NodeId = usize;

/// Tie-break keys for merged nodes start past every byte value.
const MERGED_TIE_BREAK_BASE: u32 = 256;

/// A tree node. Leaves carry a symbol, internal nodes carry children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    symbol: Option<u8>,
    weight: f64,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Nodes in the subtree rooted here, including this one
    size: usize,
}

impl Node {
    fn leaf(symbol: u8, weight: f64) -> Self {
        Self {
            symbol: Some(symbol),
            weight,
            parent: None,
            left: None,
            right: None,
            size: 1,
        }
    }

    fn internal() -> Self {
        Self {
            symbol: None,
            weight: 0.0,
            parent: None,
            left: None,
            right: None,
            size: 1,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }

    pub fn symbol(&self) -> Option<u8> {
        self.symbol
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Binary decode tree. An empty tree has no root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a frequency-weighted tree.
    ///
    /// # Errors
    /// `HuffmanError::TreeConstruction` if the table is empty, since the
    /// queue can then never reduce to a single root.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let leaves = table.len();
        let mut tree = HuffmanTree {
            nodes: Vec::with_capacity(leaves.saturating_mul(2)),
            root: None,
        };
        let mut queue = MinQueue::with_capacity(leaves);

        for (symbol, entry) in table.iter() {
            let id = tree.push(Node::leaf(symbol, entry.frequency));
            queue.push(entry.frequency, symbol as u32, id);
        }

        let mut merges = 0u32;
        let root = loop {
            let Some((weight_a, a)) = queue.pop() else {
                return Err(HuffmanError::TreeConstruction { roots: 0 }.into());
            };
            let Some((weight_b, b)) = queue.pop() else {
                break a;
            };

            let (left, right) = if tree.nodes[a].size > tree.nodes[b].size {
                (b, a)
            } else {
                (a, b)
            };
            let weight = weight_a + weight_b;
            let id = tree.push(Node {
                symbol: None,
                weight,
                parent: None,
                left: Some(left),
                right: Some(right),
                size: tree.nodes[a].size + tree.nodes[b].size + 1,
            });
            tree.nodes[a].parent = Some(id);
            tree.nodes[b].parent = Some(id);

            queue.push(weight, MERGED_TIE_BREAK_BASE + merges, id);
            merges += 1;
        };

        tree.root = Some(root);
        Ok(tree)
    }

    /// Rebuild a decode tree whose root-to-leaf paths are exactly the codes
    /// in `codebook`.
    ///
    /// Each code is walked most-significant bit first from the root; missing
    /// internal nodes are created along the way (0 = left, 1 = right) and the
    /// last bit ends at a new leaf. A zero-length code makes the root itself
    /// the leaf.
    ///
    /// # Errors
    /// `HuffmanError::InvalidCodeLengths` when two codes collide or one is a
    /// prefix of another.
    pub fn from_codebook(codebook: &Codebook) -> Result<Self> {
        let mut tree = HuffmanTree::empty();
        if codebook.is_empty() {
            return Ok(tree);
        }
        let root = tree.push(Node::internal());
        tree.root = Some(root);

        let mut ordered: Vec<(u8, ByteSeq)> = codebook.iter().collect();
        ordered.sort_by_key(|&(symbol, code)| (code.len(), symbol));

        for (symbol, code) in ordered {
            let conflict = HuffmanError::InvalidCodeLengths {
                symbol,
                length: code.len(),
            };

            let mut node = root;
            for bit in code.bits() {
                if tree.nodes[node].is_leaf() {
                    return Err(conflict.into());
                }
                node = match tree.child(node, bit) {
                    Some(child) => child,
                    None => tree.attach(node, bit, Node::internal()),
                };
            }

            let target = &mut tree.nodes[node];
            if target.is_leaf() || target.left.is_some() || target.right.is_some() {
                return Err(conflict.into());
            }
            target.symbol = Some(symbol);
        }

        tree.recompute_sizes();
        Ok(tree)
    }

    /// Extract each leaf's code by walking parent links up to the root.
    ///
    /// Codes come out in tree order, not canonical order. Symbols appear in
    /// ascending order regardless of where they sit in the tree.
    pub fn codebook(&self) -> Codebook {
        let mut book = Codebook::new();
        for (id, node) in self.nodes.iter().enumerate() {
            let Some(symbol) = node.symbol else {
                continue;
            };

            let mut code = ByteSeq::empty();
            let mut current = id;
            while let Some(parent) = self.nodes[current].parent {
                code.add_bit(self.nodes[parent].right == Some(current));
                current = parent;
            }
            book.insert(symbol, code);
        }
        book
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Follow one edge: right on `true`, left on `false`.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        let node = &self.nodes[id];
        if bit {
            node.right
        } else {
            node.left
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Symbols in left-to-right leaf order.
    pub fn symbols_in_order(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id].left;
            }
            if let Some(id) = stack.pop() {
                if let Some(symbol) = self.nodes[id].symbol {
                    out.push(symbol);
                }
                current = self.nodes[id].right;
            }
        }
        out
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: NodeId, bit: bool, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        let id = self.push(node);
        if bit {
            self.nodes[parent].right = Some(id);
        } else {
            self.nodes[parent].left = Some(id);
        }
        id
    }

    /// Children are always pushed after their parent, so a reverse sweep
    /// sees every subtree before the node that owns it.
    fn recompute_sizes(&mut self) {
        for id in (0..self.nodes.len()).rev() {
            let node = &self.nodes[id];
            let left = node.left.map_or(0, |c| self.nodes[c].size);
            let right = node.right.map_or(0, |c| self.nodes[c].size);
            self.nodes[id].size = left + right + 1;
        }
    }
}
