//! The dominator tree produced by [`DomTreeBuilder`](crate::DomTreeBuilder).
//!
//! # Theory
//!
//! A node `d` **dominates** a node `n` if every path from the entry node to `n` must pass
//! through `d`. The **immediate dominator** of `n` is the unique node that strictly
//! dominates `n` but does not strictly dominate any other dominator of `n`. Making each
//! node's immediate dominator its parent yields a tree rooted at the entry.
//!
//! # Representation
//!
//! Nodes are stored by postorder index. Along any path towards the root the index strictly
//! increases, which makes [`DominatorTree::dominates`] an early-exit walk and lets
//! [`DominatorTree::verify`] check acyclicity with a single comparison per node.

use std::{collections::HashMap, fmt::Write};

use crate::{analysis::cfg::Address, utils::escape_dot, Result};

/// Result of dominator tree computation.
///
/// Each node except the entry has exactly one immediate dominator. The entry is stored as
/// its own dominator internally and reported as having none.
///
/// # Examples
///
/// ```rust
/// use cfgdom::{Address, ControlFlowGraph, DomTreeBuilder};
///
/// // Simple CFG: entry -> a -> b
/// let (entry, a, b) = (Address::new(0x10), Address::new(0x20), Address::new(0x30));
/// let mut cfg = ControlFlowGraph::new(entry);
/// cfg.add_block(a);
/// cfg.add_block(b);
/// cfg.add_edge(entry, a)?;
/// cfg.add_edge(a, b)?;
/// cfg.number_postorder();
///
/// let tree = DomTreeBuilder::new().build(&cfg)?;
///
/// // entry dominates everything
/// assert!(tree.dominates(entry, b));
/// // a is the immediate dominator of b
/// assert_eq!(tree.immediate_dominator(b), Some(a));
/// assert_eq!(tree.immediate_dominator(entry), None);
/// # Ok::<(), cfgdom::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominatorTree {
    /// Block address for each postorder index
    order: Vec<Address>,
    /// Postorder index for each block address
    index: HashMap<Address, usize>,
    /// Immediate dominator per postorder index; `None` while not yet computed.
    /// The entry maps to itself.
    idom: Vec<Option<usize>>,
    /// Number of fixpoint passes the build took
    passes: usize,
}

impl DominatorTree {
    /// Creates a tree over the given working array with only the entry seeded.
    ///
    /// `order` must be non-empty with the entry in the last slot.
    pub(crate) fn new(order: Vec<Address>) -> Self {
        let index = order
            .iter()
            .enumerate()
            .map(|(po, &address)| (address, po))
            .collect();
        let mut idom = vec![None; order.len()];
        if let Some(root) = idom.len().checked_sub(1) {
            idom[root] = Some(root);
        }

        DominatorTree {
            order,
            index,
            idom,
            passes: 0,
        }
    }

    /// Records `dominator` as the immediate dominator of `node` (both postorder indices).
    #[inline]
    pub(crate) fn set_dominator(&mut self, node: usize, dominator: usize) {
        self.idom[node] = Some(dominator);
    }

    /// Returns the recorded dominator of a postorder index, if any.
    #[inline]
    pub(crate) fn dominator_index(&self, node: usize) -> Option<usize> {
        self.idom[node]
    }

    pub(crate) fn set_passes(&mut self, passes: usize) {
        self.passes = passes;
    }

    /// Returns the block address stored at a postorder index.
    #[must_use]
    pub fn address(&self, postorder: usize) -> Option<Address> {
        self.order.get(postorder).copied()
    }

    /// Returns the postorder index of a block.
    #[must_use]
    pub fn postorder(&self, address: Address) -> Option<usize> {
        self.index.get(&address).copied()
    }

    /// Returns the entry (root) node of the dominator tree.
    #[must_use]
    pub fn entry(&self) -> Address {
        // `new` is only reached with a non-empty working array
        self.order.last().copied().unwrap_or_default()
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the block is part of the tree.
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        self.index.contains_key(&address)
    }

    /// Returns the number of fixpoint passes the build took, including the final pass that
    /// confirmed nothing changed.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Returns the immediate dominator of a node, or `None` for the entry node and for
    /// addresses that are not part of the tree.
    #[must_use]
    pub fn immediate_dominator(&self, address: Address) -> Option<Address> {
        let node = self.postorder(address)?;
        match self.idom[node] {
            Some(dom) if dom != node => Some(self.order[dom]),
            _ => None,
        }
    }

    /// Checks if node `a` dominates node `b`.
    ///
    /// A node dominates itself. The entry node dominates all nodes. Addresses outside the
    /// tree dominate nothing and are dominated by nothing.
    ///
    /// # Complexity
    ///
    /// O(depth) where depth is the depth of `b` in the dominator tree.
    #[must_use]
    pub fn dominates(&self, a: Address, b: Address) -> bool {
        let (Some(target), Some(mut current)) = (self.postorder(a), self.postorder(b)) else {
            return false;
        };

        // Dominator chains climb strictly in postorder, so once past `target` it can't match
        while current < target {
            match self.idom[current] {
                Some(next) if next > current => current = next,
                _ => return false,
            }
        }
        current == target
    }

    /// Checks if node `a` strictly dominates node `b`.
    ///
    /// Strict dominance excludes self-dominance: a strictly dominates b iff
    /// a dominates b and a ≠ b.
    #[inline]
    #[must_use]
    pub fn strictly_dominates(&self, a: Address, b: Address) -> bool {
        a != b && self.dominates(a, b)
    }

    /// Returns an iterator over all dominators of a node, from the node itself up to (and
    /// including) the entry node. Empty for addresses outside the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfgdom::{Address, ControlFlowGraph, DomTreeBuilder};
    ///
    /// let (entry, a, b) = (Address::new(1), Address::new(2), Address::new(3));
    /// let mut cfg = ControlFlowGraph::new(entry);
    /// cfg.add_block(a);
    /// cfg.add_block(b);
    /// cfg.add_edge(entry, a)?;
    /// cfg.add_edge(a, b)?;
    /// cfg.number_postorder();
    ///
    /// let tree = DomTreeBuilder::new().build(&cfg)?;
    /// let chain: Vec<Address> = tree.dominators(b).collect();
    /// assert_eq!(chain, vec![b, a, entry]);
    /// # Ok::<(), cfgdom::Error>(())
    /// ```
    pub fn dominators(&self, address: Address) -> DominatorIterator<'_> {
        DominatorIterator {
            tree: self,
            current: self.postorder(address),
        }
    }

    /// Returns the depth of a node in the dominator tree.
    ///
    /// The entry node has depth 0. Returns `None` for addresses outside the tree.
    #[must_use]
    pub fn depth(&self, address: Address) -> Option<usize> {
        self.postorder(address)?;
        Some(self.dominators(address).count() - 1)
    }

    /// Returns all children of a node in the dominator tree, sorted by address.
    ///
    /// # Complexity
    ///
    /// O(V) where V is the number of nodes.
    #[must_use]
    pub fn children(&self, address: Address) -> Vec<Address> {
        let Some(parent) = self.postorder(address) else {
            return Vec::new();
        };

        let mut result: Vec<Address> = self
            .idom
            .iter()
            .enumerate()
            .filter(|&(node, dom)| node != parent && *dom == Some(parent))
            .map(|(node, _)| self.order[node])
            .collect();
        result.sort_unstable();
        result
    }

    /// Returns an iterator over `(node, immediate dominator)` pairs for every non-entry node,
    /// in reverse postorder.
    pub fn iter(&self) -> impl Iterator<Item = (Address, Address)> + '_ {
        (0..self.order.len()).rev().filter_map(move |node| match self.idom[node] {
            Some(dom) if dom != node => Some((self.order[node], self.order[dom])),
            _ => None,
        })
    }

    /// Checks the structural invariants of the tree.
    ///
    /// The entry must be its own dominator in the last slot, and every other node must
    /// have a dominator with a strictly higher postorder index. Together these guarantee
    /// that every chain of immediate dominators reaches the entry within `len() - 1` steps.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] describing the first violation found.
    pub fn verify(&self) -> Result<()> {
        let Some(root) = self.order.len().checked_sub(1) else {
            return Ok(());
        };

        if self.idom[root] != Some(root) {
            return Err(malformed_error!(
                "Entry {} is not its own dominator",
                self.order[root]
            ));
        }

        for node in 0..root {
            match self.idom[node] {
                None => {
                    return Err(malformed_error!(
                        "Block {} (#{}) has no immediate dominator",
                        self.order[node],
                        node
                    ));
                }
                Some(dom) if dom <= node || dom > root => {
                    return Err(malformed_error!(
                        "Block {} (#{}) has dominator #{} outside ({}, {}]",
                        self.order[node],
                        node,
                        dom,
                        node,
                        root
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Generates a DOT format representation of the tree, with edges pointing from each
    /// immediate dominator to the nodes it dominates.
    ///
    /// # Arguments
    ///
    /// * `title` - Optional graph label
    #[must_use]
    pub fn to_dot(&self, title: Option<&str>) -> String {
        let mut dot = String::new();

        dot.push_str("digraph DomTree {\n");
        if let Some(name) = title {
            let _ = writeln!(dot, "    label=\"Dominator tree: {}\";", escape_dot(name));
        }
        dot.push_str("    labelloc=t;\n");
        dot.push_str("    node [shape=box, fontname=\"Courier\", fontsize=10];\n\n");

        for (po, address) in self.order.iter().enumerate().rev() {
            let style = if po + 1 == self.order.len() {
                ", style=filled, fillcolor=lightgreen"
            } else {
                ""
            };
            let _ = writeln!(dot, "    \"{address}\" [label=\"{address}\"{style}];");
        }

        dot.push('\n');
        for (node, dom) in self.iter() {
            let _ = writeln!(dot, "    \"{dom}\" -> \"{node}\";");
        }

        dot.push_str("}\n");
        dot
    }
}

/// Iterator over dominators of a node, from the node up to the entry.
pub struct DominatorIterator<'a> {
    tree: &'a DominatorTree,
    current: Option<usize>,
}

impl Iterator for DominatorIterator<'_> {
    type Item = Address;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        // Only strictly climbing links are followed, which also stops at the entry
        self.current = self.tree.idom[current].filter(|&dom| dom > current);
        Some(self.tree.order[current])
    }
}
