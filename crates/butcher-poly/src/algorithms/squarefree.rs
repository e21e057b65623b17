//! Squarefree decomposition via Yun's algorithm.
//!
//! Writes f = unit · f₁ · f₂² · f₃³ · … with squarefree, pairwise
//! coprime, monic fᵢ. The root finder leans on this for multiplicities:
//! every root of fᵢ is a root of f with multiplicity exactly i.

use butcher_rings::traits::Field;

use crate::algorithms::gcd::{poly_div_rem, poly_gcd};
use crate::dense::DensePoly;

/// A factor with its multiplicity in the squarefree decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquarefreeFactor<F: Field> {
    /// The squarefree, monic polynomial factor.
    pub factor: DensePoly<F>,
    /// The multiplicity (power) of this factor.
    pub multiplicity: u32,
}

/// Computes the squarefree decomposition of a polynomial.
///
/// Valid over any field of characteristic 0.
pub fn squarefree_decomposition<F: Field>(f: &DensePoly<F>) -> Vec<SquarefreeFactor<F>> {
    if f.degree() == 0 {
        return Vec::new();
    }

    let lead_inv = f
        .leading_coeff()
        .inv()
        .expect("leading coefficient of a nonzero polynomial is invertible");
    let f_monic = f.scale(&lead_inv);
    let f_prime = f_monic.derivative();

    // g = gcd(f, f'); g constant means f is already squarefree
    let g = poly_gcd(&f_monic, &f_prime);
    if g.degree() == 0 {
        return vec![SquarefreeFactor {
            factor: f_monic,
            multiplicity: 1,
        }];
    }

    let (mut a, _) = poly_div_rem(&f_monic, &g);
    let (mut b, _) = poly_div_rem(&f_prime, &g);

    let mut factors = Vec::new();
    let mut multiplicity = 1u32;

    loop {
        // c = b − a'
        let c = b.sub(&a.derivative());

        if c.is_zero() {
            if a.degree() > 0 {
                factors.push(SquarefreeFactor {
                    factor: a,
                    multiplicity,
                });
            }
            break;
        }

        let d = poly_gcd(&a, &c);
        if d.degree() > 0 {
            factors.push(SquarefreeFactor {
                factor: d.clone(),
                multiplicity,
            });
        }

        let (new_a, _) = poly_div_rem(&a, &d);
        let (new_b, _) = poly_div_rem(&c, &d);

        if new_a.degree() == 0 {
            break;
        }

        a = new_a;
        b = new_b;
        multiplicity += 1;
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::Rational;

    fn poly(coeffs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(coeffs.iter().map(|&n| Rational::from_integer(n)).collect())
    }

    #[test]
    fn test_squarefree_input() {
        // (x−1)(x−2) = x² − 3x + 2
        let f = poly(&[2, -3, 1]);
        let decomp = squarefree_decomposition(&f);
        assert_eq!(decomp.len(), 1);
        assert_eq!(decomp[0].multiplicity, 1);
        assert_eq!(decomp[0].factor, f);
    }

    #[test]
    fn test_cube() {
        // (x+1)³ = x³ + 3x² + 3x + 1
        let f = poly(&[1, 3, 3, 1]);
        let decomp = squarefree_decomposition(&f);
        assert_eq!(decomp.len(), 1);
        assert_eq!(decomp[0].multiplicity, 3);
        assert_eq!(decomp[0].factor, poly(&[1, 1]));
    }

    #[test]
    fn test_mixed() {
        // (x+1)²(x−1) = x³ + x² − x − 1
        let f = poly(&[-1, -1, 1, 1]);
        let decomp = squarefree_decomposition(&f);

        let total: usize = decomp
            .iter()
            .map(|s| s.factor.degree() * s.multiplicity as usize)
            .sum();
        assert_eq!(total, 3);

        let squares: Vec<_> = decomp.iter().filter(|s| s.multiplicity == 2).collect();
        assert_eq!(squares.len(), 1);
        assert_eq!(squares[0].factor, poly(&[1, 1]));
    }

    #[test]
    fn test_zero_root_power() {
        // x⁶(x² − 8), scaled by 1/576 like the RK4 modulus defect
        let f = poly(&[0, 0, 0, 0, 0, 0, -8, 0, 1]);
        let decomp = squarefree_decomposition(&f);

        let sixth: Vec<_> = decomp.iter().filter(|s| s.multiplicity == 6).collect();
        assert_eq!(sixth.len(), 1);
        assert_eq!(sixth[0].factor, poly(&[0, 1]));

        let single: Vec<_> = decomp.iter().filter(|s| s.multiplicity == 1).collect();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].factor, poly(&[-8, 0, 1]));
    }
}
