//! The rooted trees machinery.
//!
//! Unordered rooted trees drive the classical Butcher order conditions:
//! every tree with k nodes contributes one algebraic condition at order
//! k. Trees are kept in a canonical form (children sorted by a
//! structural total order) so that isomorphic trees compare equal and
//! labellings are reproducible.
//!
//! Bibliography: Hairer, Nørsett, Wanner, *Solving Ordinary Differential
//! Equations* (γ and σ are their density and symmetry coefficients).

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::error::{Result, RkError};

/// An unordered rooted tree in canonical form.
///
/// Structural equality collapses isomorphic trees because children are
/// always stored sorted by [`Ord`] on `RootedTree`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RootedTree {
    size: u32,
    children: Vec<RootedTree>,
}

/// A tree instance with distinct integer labels 1..n assigned to nodes.
#[derive(Clone, Debug)]
pub struct LabelledTree {
    /// The label of this node.
    pub label: u32,
    /// Labelled subtrees, in canonical child order.
    pub children: Vec<LabelledTree>,
}

/// The edge list (parent label, child label) of a canonically labelled
/// tree; empty for the single-node tree.
pub type OrderFormula = SmallVec<[(u32, u32); 8]>;

fn factorial(n: u64) -> u64 {
    (2..=n).product::<u64>().max(1)
}

impl RootedTree {
    /// The single-node tree.
    #[must_use]
    pub fn leaf() -> Self {
        Self {
            size: 1,
            children: Vec::new(),
        }
    }

    /// A tree given the multiset of its root's subtrees.
    #[must_use]
    pub fn node(mut children: Vec<RootedTree>) -> Self {
        children.sort();
        let size = 1 + children.iter().map(|c| c.size).sum::<u32>();
        Self { size, children }
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> u32 {
        self.size
    }

    /// The root's subtrees, in canonical order.
    #[must_use]
    pub fn children(&self) -> &[RootedTree] {
        &self.children
    }

    /// The density γ: 1 for a leaf, otherwise the node count times the
    /// product of the children's densities.
    #[must_use]
    pub fn density(&self) -> u64 {
        if self.children.is_empty() {
            return 1;
        }
        u64::from(self.size) * self.children.iter().map(RootedTree::density).product::<u64>()
    }

    /// The symmetry coefficient σ: the order of the tree's automorphism
    /// group. Each maximal run of r identical children contributes r!,
    /// times every child's own σ.
    #[must_use]
    pub fn symmetry_coefficient(&self) -> u64 {
        let mut runs = 1u64;
        let mut run_len = 1u64;
        for i in 1..self.children.len() {
            if self.children[i] == self.children[i - 1] {
                run_len += 1;
            } else {
                runs *= factorial(run_len);
                run_len = 1;
            }
        }
        runs *= factorial(run_len);

        runs * self
            .children
            .iter()
            .map(RootedTree::symmetry_coefficient)
            .product::<u64>()
    }

    /// Deterministic pre-order labelling 1..n over the canonical form.
    #[must_use]
    pub fn canonical_labelling(&self) -> LabelledTree {
        let mut next = 1;
        self.label_preorder(&mut next)
    }

    fn label_preorder(&self, next: &mut u32) -> LabelledTree {
        let label = *next;
        *next += 1;
        LabelledTree {
            label,
            children: self
                .children
                .iter()
                .map(|c| c.label_preorder(next))
                .collect(),
        }
    }

    /// The (parent, child) edge list of the canonically labelled tree,
    /// in depth-first order. This is the product structure of the
    /// tree's elementary weight.
    #[must_use]
    pub fn order_formula(&self) -> OrderFormula {
        let labelled = self.canonical_labelling();
        let mut edges = OrderFormula::new();
        collect_edges(&labelled, &mut edges);
        edges
    }
}

fn collect_edges(node: &LabelledTree, edges: &mut OrderFormula) {
    for child in &node.children {
        edges.push((node.label, child.label));
        collect_edges(child, edges);
    }
}

impl PartialOrd for RootedTree {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RootedTree {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| self.children.cmp(&other.children))
    }
}

/// Append-only table of all rooted trees, grouped by node count.
///
/// Enumeration is incremental: asking for size k builds (and keeps)
/// every size up to k, reusing whatever is already cached. Tables are
/// never shrunk.
#[derive(Clone, Debug, Default)]
pub struct TreeTable {
    by_size: Vec<Vec<RootedTree>>,
}

impl TreeTable {
    /// An empty table (grows on first use).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The largest size currently cached.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.by_size.len()
    }

    /// All structurally distinct rooted trees with exactly `size` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`RkError::InvalidTreeSize`] for size 0: the smallest
    /// rooted tree is the single node.
    pub fn enumerate(&mut self, size: usize) -> Result<&[RootedTree]> {
        if size == 0 {
            return Err(RkError::InvalidTreeSize { size });
        }
        self.expand(size);
        Ok(&self.by_size[size - 1])
    }

    fn expand(&mut self, size: usize) {
        for n in self.by_size.len() + 1..=size {
            let trees = build_size(n, &self.by_size);
            self.by_size.push(trees);
        }
    }
}

/// All trees with n nodes, given the tables for every smaller size.
fn build_size(n: usize, smaller: &[Vec<RootedTree>]) -> Vec<RootedTree> {
    if n == 1 {
        return vec![RootedTree::leaf()];
    }

    child_multisets(smaller, n - 1, n - 1, usize::MAX)
        .into_iter()
        .map(RootedTree::node)
        .collect()
}

/// Multisets of trees with node counts summing to `total`, enumerated as
/// non-increasing (size, table index) sequences so each multiset appears
/// exactly once.
fn child_multisets(
    table: &[Vec<RootedTree>],
    total: usize,
    max_size: usize,
    max_index: usize,
) -> Vec<Vec<RootedTree>> {
    if total == 0 {
        return vec![Vec::new()];
    }

    let mut result = Vec::new();
    for size in (1..=max_size.min(total)).rev() {
        let trees = &table[size - 1];
        let top = if size == max_size {
            max_index.min(trees.len() - 1)
        } else {
            trees.len() - 1
        };

        for idx in (0..=top).rev() {
            for mut rest in child_multisets(table, total - size, size, idx) {
                let mut children = Vec::with_capacity(rest.len() + 1);
                children.push(trees[idx].clone());
                children.append(&mut rest);
                result.push(children);
            }
        }
    }
    result
}
