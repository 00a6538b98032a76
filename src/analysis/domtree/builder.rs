//! Dominator tree construction using the Cooper-Harvey-Kennedy algorithm.
//!
//! # Algorithm
//!
//! The builder implements the iterative scheme from "A Simple, Fast Dominance Algorithm"
//! (Cooper, Harvey, Kennedy). Nodes are kept in a flat array indexed by postorder number,
//! the entry is seeded as its own dominator, and passes over the array repeat until no
//! immediate dominator changes:
//!
//! 1. Visit nodes in decreasing postorder, skipping the entry
//! 2. Seed the candidate with the first predecessor whose dominator is already known
//! 3. Fold every other known predecessor into the candidate with [`intersect`]
//! 4. Record the candidate if it differs from the previous value
//!
//! Visiting in decreasing postorder approximates reverse postorder from the entry, so
//! reducible graphs settle after one productive pass plus one confirming pass. Irreducible
//! graphs take more passes but reach the same fixpoint.
//!
//! # Complexity
//!
//! - Time: O(P · (V + E) · D) worst case, where P is the number of passes and D the depth
//!   of the tree; near-linear in practice
//! - Space: O(V)

use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    analysis::{
        cfg::{Address, FlowGraph, FlowNode},
        domtree::{BuilderConfig, DominatorTree},
    },
    Error, Result,
};

/// Computes dominator trees for control flow graphs.
///
/// The builder is stateless between calls: each [`build`](Self::build) allocates its own
/// working array and tree, and nothing survives the call except the returned tree. A single
/// builder can therefore be shared freely, including across threads.
///
/// # Preconditions
///
/// Every node must carry a postorder index, indices must be dense in `[0, size)`, and the
/// entry must hold `size - 1`. [`ControlFlowGraph::number_postorder`] establishes this.
///
/// [`ControlFlowGraph::number_postorder`]: crate::ControlFlowGraph::number_postorder
///
/// # Examples
///
/// ```rust
/// use cfgdom::{Address, ControlFlowGraph, DomTreeBuilder};
///
/// // Diamond CFG:
/// //      entry
/// //      /   \
/// //     x     y
/// //      \   /
/// //        z
/// let (entry, x, y, z) = (
///     Address::new(0x00),
///     Address::new(0x10),
///     Address::new(0x20),
///     Address::new(0x30),
/// );
/// let mut cfg = ControlFlowGraph::new(entry);
/// for block in [x, y, z] {
///     cfg.add_block(block);
/// }
/// cfg.add_edge(entry, x)?;
/// cfg.add_edge(entry, y)?;
/// cfg.add_edge(x, z)?;
/// cfg.add_edge(y, z)?;
/// cfg.number_postorder();
///
/// let tree = DomTreeBuilder::new().build(&cfg)?;
/// assert_eq!(tree.immediate_dominator(x), Some(entry));
/// assert_eq!(tree.immediate_dominator(y), Some(entry));
/// assert_eq!(tree.immediate_dominator(z), Some(entry));
/// # Ok::<(), cfgdom::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DomTreeBuilder {
    config: BuilderConfig,
}

impl DomTreeBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        DomTreeBuilder { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Computes the dominator tree of a graph.
    ///
    /// The graph is only read. On success every node of the graph has an immediate
    /// dominator in the returned tree; on failure no tree is produced.
    ///
    /// # Errors
    ///
    /// - [`Error::Empty`] if the graph has no nodes
    /// - [`Error::Malformed`] if the postorder numbering is missing, out of range,
    ///   duplicated, does not put the entry last, an address belongs to more than one node,
    ///   or a predecessor address cannot be resolved; also when verification is enabled
    ///   and fails
    /// - [`Error::UnresolvableDominator`] if a node has no predecessor with a known
    ///   dominator, which means it is unreachable from the entry
    /// - [`Error::PassLimit`] if [`BuilderConfig::max_passes`] is exceeded
    pub fn build<G: FlowGraph>(&self, graph: &G) -> Result<DominatorTree> {
        let mut tree = index_nodes(graph)?;
        let root = tree.len() - 1;

        let mut preds: Vec<usize> = Vec::new();
        let mut passes = 0;
        let mut changed = true;

        while changed {
            if let Some(limit) = self.config.max_passes {
                if passes >= limit {
                    return Err(Error::PassLimit(limit));
                }
            }

            changed = false;
            passes += 1;

            for node in (0..root).rev() {
                collect_predecessors(graph, &tree, node, &mut preds)?;

                let seed = preds
                    .iter()
                    .position(|&pred| tree.dominator_index(pred).is_some())
                    .ok_or(Error::UnresolvableDominator { postorder: node })?;
                let mut new_idom = preds.swap_remove(seed);

                for &pred in &preds {
                    if tree.dominator_index(pred).is_some() {
                        new_idom = intersect(&tree, pred, new_idom)?;
                    }
                }

                // A dominator always outranks its node unless the host reported different
                // predecessors in an earlier pass
                if new_idom <= node {
                    return Err(malformed_error!(
                        "Block {} (#{}) resolved to dominator #{}; numbering is not a depth-first postorder",
                        tree.address(node).unwrap_or_default(),
                        node,
                        new_idom
                    ));
                }

                if tree.dominator_index(node) != Some(new_idom) {
                    log::trace!("pass {}: idom(#{}) = #{}", passes, node, new_idom);
                    tree.set_dominator(node, new_idom);
                    changed = true;
                }
            }
        }

        tree.set_passes(passes);
        log::debug!(
            "dominator tree for {} nodes (entry {}) converged after {} passes",
            tree.len(),
            tree.entry(),
            passes
        );

        if self.config.verify_result {
            tree.verify()?;
        }

        Ok(tree)
    }

    /// Computes dominator trees for many independent graphs in parallel.
    ///
    /// Results are returned in input order; a failure on one graph does not affect the
    /// others.
    pub fn build_all<G>(&self, graphs: &[G]) -> Vec<Result<DominatorTree>>
    where
        G: FlowGraph + Sync,
    {
        graphs.par_iter().map(|graph| self.build(graph)).collect()
    }
}

/// Builds the postorder-indexed working array and wraps it in an entry-seeded tree.
fn index_nodes<G: FlowGraph>(graph: &G) -> Result<DominatorTree> {
    let size = graph.size();
    if size == 0 {
        return Err(Error::Empty);
    }

    let mut slots: Vec<Option<Address>> = vec![None; size];
    let mut seen: HashMap<Address, usize> = HashMap::with_capacity(size);
    for node in graph.nodes() {
        let address = node.address();
        let po = node
            .postorder()
            .ok_or_else(|| malformed_error!("Block {} has no postorder index", address))?;
        let slot = slots.get_mut(po).ok_or_else(|| {
            malformed_error!(
                "Block {} has postorder index {} outside [0, {})",
                address,
                po,
                size
            )
        })?;
        if let Some(other) = slot.replace(address) {
            return Err(malformed_error!(
                "Blocks {} and {} share postorder index {}",
                other,
                address,
                po
            ));
        }
        if let Some(first) = seen.insert(address, po) {
            return Err(malformed_error!(
                "Block {} holds postorder indices {} and {}",
                address,
                first,
                po
            ));
        }
    }

    let order = slots
        .into_iter()
        .enumerate()
        .map(|(po, slot)| slot.ok_or_else(|| malformed_error!("No block has postorder index {}", po)))
        .collect::<Result<Vec<Address>>>()?;

    let entry = graph.entry();
    if order[size - 1] != entry {
        return Err(malformed_error!(
            "Entry {} must hold postorder index {}, found {}",
            entry,
            size - 1,
            order[size - 1]
        ));
    }

    Ok(DominatorTree::new(order))
}

/// Resolves the predecessors of `node` to postorder indices, dropping self loops.
fn collect_predecessors<G: FlowGraph>(
    graph: &G,
    tree: &DominatorTree,
    node: usize,
    preds: &mut Vec<usize>,
) -> Result<()> {
    preds.clear();

    let address = tree.address(node).unwrap_or_default();
    for pred_address in graph.edges_to(address) {
        let pred = tree.postorder(pred_address).ok_or_else(|| {
            malformed_error!(
                "Predecessor {} of block {} is not part of the graph",
                pred_address,
                address
            )
        })?;
        if pred != node {
            preds.push(pred);
        }
    }

    Ok(())
}

/// Finds the nearest common dominator of two nodes that both have a known dominator.
///
/// Two fingers walk up the partially built tree; whichever sits at the lower postorder
/// index moves to its immediate dominator until they meet. The builder only records
/// dominators that outrank their node, so every step climbs; [`climb`] still refuses a
/// non-climbing link instead of looping on it.
fn intersect(tree: &DominatorTree, mut finger1: usize, mut finger2: usize) -> Result<usize> {
    while finger1 != finger2 {
        while finger1 < finger2 {
            finger1 = climb(tree, finger1)?;
        }
        while finger2 < finger1 {
            finger2 = climb(tree, finger2)?;
        }
    }
    Ok(finger1)
}

fn climb(tree: &DominatorTree, node: usize) -> Result<usize> {
    match tree.dominator_index(node) {
        Some(dom) if dom > node => Ok(dom),
        _ => Err(malformed_error!(
            "Dominator chain of #{} does not climb; numbering is not a depth-first postorder",
            node
        )),
    }
}
