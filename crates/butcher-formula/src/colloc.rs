//! Collocation-based tableau construction.
//!
//! Given collocation points c₁..cₙ in [0, 1], the collocation method's
//! coefficients are integrals of the Lagrange basis:
//! A[i][j] = ∫₀^cᵢ ℓⱼ and B[j] = ∫₀¹ ℓⱼ, with C = c. All arithmetic is
//! exact, so Gauss points expressed as surds produce the exact Gauss
//! tableaux.

use butcher_linalg::DenseMatrix;
use butcher_poly::DensePoly;
use butcher_rings::traits::{Field, Ring};
use butcher_rings::{Complex, Surd};

use crate::error::{Result, RkError};
use crate::tableau::Tableau;

/// Builds the collocation tableau for the given points.
///
/// # Errors
///
/// [`RkError::CollocationPointOutOfRange`] when a point is not a real
/// value in [0, 1].
///
/// # Panics
///
/// Panics if two collocation points coincide (the Lagrange basis is
/// undefined there).
pub fn colloc(points: &[Complex]) -> Result<Tableau> {
    let n = points.len();

    for point in points {
        let in_range = point.is_real()
            && point.re().signum() >= 0
            && (point.re().clone() - Surd::one()).signum() <= 0;
        if !in_range {
            return Err(RkError::CollocationPointOutOfRange {
                point: point.to_string(),
            });
        }
    }

    // ℓᵢ(x) = Π_{j≠i} (x − cⱼ)/(cᵢ − cⱼ)
    let mut primitives = Vec::with_capacity(n);
    for i in 0..n {
        let mut basis = DensePoly::one();
        for j in 0..n {
            if i == j {
                continue;
            }
            let denom = points[i].clone() - points[j].clone();
            let inv = denom
                .inv()
                .expect("collocation points must be pairwise distinct");
            basis = basis.mul(&DensePoly::new(vec![
                -points[j].clone() * inv.clone(),
                inv,
            ]));
        }
        primitives.push(basis.integral());
    }

    let at = |p: &DensePoly<Complex>, x: &Complex| p.eval(x) - p.eval(&Complex::zero());

    let rows: Vec<Vec<Complex>> = (0..n)
        .map(|i| primitives.iter().map(|p| at(p, &points[i])).collect())
        .collect();
    let b: Vec<Complex> = primitives
        .iter()
        .map(|p| at(p, &Complex::one()))
        .collect();

    Tableau::new(DenseMatrix::from_rows(rows), b, Some(points.to_vec()))
}
