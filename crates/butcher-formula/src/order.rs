//! The Butcher order-condition evaluator.
//!
//! A method has order p when, for every rooted tree t with at most p
//! nodes, the elementary weight of t against (A, B) matches the Taylor
//! coefficient 1/γ(t). The raw form used here sums the weight product
//! over *every* assignment of stage indices to tree nodes (the full
//! Cartesian product, sᶰ terms) and multiplies by γ(t); the condition
//! holds when that value is exactly 1. The exponential cost in the tree
//! size is inherent to this classical formulation and is kept as-is —
//! exactness, not speed, is the contract.

use butcher_linalg::DenseMatrix;
use butcher_rings::traits::Ring;
use butcher_rings::Complex;
use smallvec::{smallvec, SmallVec};

use crate::error::{Result, RkError};
use crate::trees::{RootedTree, TreeTable};

/// Evaluates one summand: B[v(root)] · Π over edges A[v(parent), v(child)].
///
/// `assignment` maps the canonical label k (1-based) to the stage index
/// `assignment[k − 1]`.
#[must_use]
pub fn eval_assignment(
    a: &DenseMatrix<Complex>,
    b: &[Complex],
    formula: &[(u32, u32)],
    assignment: &[usize],
) -> Complex {
    let mut value = b[assignment[0]].clone();
    for &(parent, child) in formula {
        value = value
            * a[(
                assignment[(parent - 1) as usize],
                assignment[(child - 1) as usize],
            )]
                .clone();
    }
    value
}

/// The raw order-condition value of a tree: γ(t) times the sum of
/// [`eval_assignment`] over all sᶰ stage assignments. Equals exactly 1
/// iff the tree's order condition holds.
#[must_use]
pub fn tree_order_value(a: &DenseMatrix<Complex>, b: &[Complex], tree: &RootedTree) -> Complex {
    let n = tree.node_count() as usize;
    let s = b.len();
    let formula = tree.order_formula();

    let mut assignment: SmallVec<[usize; 8]> = smallvec![0; n];
    let mut sum = Complex::zero();
    'assignments: loop {
        sum = sum + eval_assignment(a, b, &formula, &assignment);

        // odometer over the Cartesian product [0, s)ⁿ
        let mut digit = 0;
        loop {
            if digit == n {
                break 'assignments;
            }
            assignment[digit] += 1;
            if assignment[digit] < s {
                continue 'assignments;
            }
            assignment[digit] = 0;
            digit += 1;
        }
    }

    sum.mul_by_scalar(tree.density() as i64)
}

/// The order-condition engine: a tree table plus the probing loops.
///
/// The table grows transparently as higher orders are probed and is
/// never discarded, so repeated queries reuse earlier enumerations.
#[derive(Debug, Default)]
pub struct OrderConditions {
    trees: TreeTable,
}

impl OrderConditions {
    /// A fresh engine with an empty tree table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying tree table.
    #[must_use]
    pub fn trees(&self) -> &TreeTable {
        &self.trees
    }

    /// Checks whether every tree with exactly `k` nodes satisfies its
    /// order condition. At k = 1 the condition degenerates to ΣB = 1.
    /// Short-circuits on the first failing tree.
    ///
    /// # Errors
    ///
    /// Returns [`RkError::InvalidTreeSize`] for k = 0.
    pub fn check_order(
        &mut self,
        a: &DenseMatrix<Complex>,
        b: &[Complex],
        k: usize,
    ) -> Result<bool> {
        if k == 0 {
            return Err(RkError::InvalidTreeSize { size: 0 });
        }

        if k == 1 {
            let sum = b.iter().fold(Complex::zero(), |acc, x| acc + x.clone());
            return Ok(sum.is_one());
        }

        for tree in self.trees.enumerate(k)? {
            if !tree_order_value(a, b, tree).is_one() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The first tree of size `k` whose condition fails, with the value
    /// it produced instead of 1 — the diagnostic witness for a failed
    /// order check. `None` when order k holds.
    ///
    /// # Errors
    ///
    /// Returns [`RkError::InvalidTreeSize`] for k = 0.
    pub fn first_failing_tree(
        &mut self,
        a: &DenseMatrix<Complex>,
        b: &[Complex],
        k: usize,
    ) -> Result<Option<(RootedTree, Complex)>> {
        if k == 0 {
            return Err(RkError::InvalidTreeSize { size: 0 });
        }

        if k == 1 {
            let sum = b.iter().fold(Complex::zero(), |acc, x| acc + x.clone());
            if sum.is_one() {
                return Ok(None);
            }
            return Ok(Some((RootedTree::leaf(), sum)));
        }

        for tree in self.trees.enumerate(k)? {
            let value = tree_order_value(a, b, tree);
            if !value.is_one() {
                return Ok(Some((tree.clone(), value)));
            }
        }
        Ok(None)
    }

    /// The method's order: the largest p such that every k in 1..=p
    /// passes [`OrderConditions::check_order`], found by probing upwards
    /// until the first failure.
    pub fn order(&mut self, a: &DenseMatrix<Complex>, b: &[Complex]) -> usize {
        let mut p = 0;
        loop {
            match self.check_order(a, b, p + 1) {
                Ok(true) => p += 1,
                _ => return p,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods;

    #[test]
    fn test_order_one_is_weight_sum() {
        let t = methods::rk4();
        let mut engine = OrderConditions::new();
        assert!(engine.check_order(t.a(), t.b(), 1).unwrap());

        // perturb one weight so ΣB = 1 + 1/100
        let mut b = t.b().to_vec();
        b[0] = b[0].clone() + Complex::ratio(1, 100);
        assert!(!engine.check_order(t.a(), &b, 1).unwrap());
    }

    #[test]
    fn test_size_zero_rejected() {
        let t = methods::rk4();
        let mut engine = OrderConditions::new();
        assert!(engine.check_order(t.a(), t.b(), 0).is_err());
    }

    #[test]
    fn test_rk4_has_order_four() {
        let t = methods::rk4();
        let mut engine = OrderConditions::new();
        assert_eq!(engine.order(t.a(), t.b()), 4);
    }

    #[test]
    fn test_radau2a_has_order_three() {
        let t = methods::radau2a();
        let mut engine = OrderConditions::new();
        assert_eq!(engine.order(t.a(), t.b()), 3);
    }

    #[test]
    fn test_gauss4_has_order_four() {
        let t = methods::gauss4();
        let mut engine = OrderConditions::new();
        assert_eq!(engine.order(t.a(), t.b()), 4);
    }

    #[test]
    fn test_failing_tree_witness() {
        // explicit Euler has order 1: some 2-node tree must fail
        let t = methods::explicit_euler();
        let mut engine = OrderConditions::new();
        assert_eq!(engine.order(t.a(), t.b()), 1);
        let witness = engine.first_failing_tree(t.a(), t.b(), 2).unwrap();
        let (tree, value) = witness.expect("order 2 fails for explicit Euler");
        assert_eq!(tree.node_count(), 2);
        assert!(!value.is_one());
    }

    #[test]
    fn test_perturbed_weights_drop_to_order_zero() {
        let t = methods::rk4();
        let mut b = t.b().to_vec();
        b[2] = b[2].clone() + Complex::ratio(1, 1000);
        let mut engine = OrderConditions::new();
        assert_eq!(engine.order(t.a(), &b), 0);
    }
}
