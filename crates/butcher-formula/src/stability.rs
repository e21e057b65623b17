//! Deriving the stability function R(z) from a tableau.
//!
//! R(z) = det(N(z)) / det(D(z)) with D(z) = I − z·A and N(z) = D(z) + z·K,
//! where K is the matrix whose every row is B. Both determinants are
//! taken in the polynomial ring over the exact field — no numeric step
//! anywhere — and the quotient is normalized downstream by the rational
//! function layer.

use butcher_linalg::DenseMatrix;
use butcher_poly::DensePoly;
use butcher_rational_func::RationalFunction;
use butcher_rings::Complex;

use crate::tableau::Tableau;

/// Derives the stability function of a tableau.
#[must_use]
pub fn stability_function(tableau: &Tableau) -> RationalFunction<Complex> {
    let s = tableau.stages();
    let a = tableau.a();
    let b = tableau.b();

    // D = I − z·A
    let mut d: DenseMatrix<DensePoly<Complex>> = DenseMatrix::zeros(s, s);
    for i in 0..s {
        for j in 0..s {
            let mut entry = DensePoly::monomial(-a[(i, j)].clone(), 1);
            if i == j {
                entry = entry.add(&DensePoly::one());
            }
            d[(i, j)] = entry;
        }
    }

    // N = D + z·K, every row of K being B
    let mut n = d.clone();
    for i in 0..s {
        for j in 0..s {
            n[(i, j)] = n[(i, j)].add(&DensePoly::monomial(b[j].clone(), 1));
        }
    }

    RationalFunction::new(n.det(), d.det())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods;
    use butcher_rings::traits::Ring;

    fn poly(coeffs: &[(i64, i64)]) -> DensePoly<Complex> {
        DensePoly::new(coeffs.iter().map(|&(n, d)| Complex::ratio(n, d)).collect())
    }

    #[test]
    fn test_explicit_euler() {
        // R(z) = 1 + z
        let r = stability_function(&methods::explicit_euler());
        assert_eq!(*r.numerator(), poly(&[(1, 1), (1, 1)]));
        assert_eq!(r.denominator().degree(), 0);
    }

    #[test]
    fn test_implicit_euler() {
        // R(z) = 1/(1 − z) = −1/(z − 1) after monic normalization
        let r = stability_function(&methods::implicit_euler());
        assert_eq!(r.numerator().degree(), 0);
        assert_eq!(r.denominator().degree(), 1);
        assert_eq!(r.eval(&Complex::from(-1)), Some(Complex::ratio(1, 2)));
    }

    #[test]
    fn test_rk4_matches_truncated_exponential() {
        // R(z) = 1 + z + z²/2 + z³/6 + z⁴/24
        let r = stability_function(&methods::rk4());
        assert_eq!(
            *r.numerator(),
            poly(&[(1, 1), (1, 1), (1, 2), (1, 6), (1, 24)])
        );
        assert_eq!(r.denominator().degree(), 0);
    }

    #[test]
    fn test_gauss4_is_a_pade_approximant() {
        // R(z) = (1 + z/2 + z²/12)/(1 − z/2 + z²/12): the (2,2) Padé
        // approximant of exp. The derived form is scaled to a monic
        // denominator, so compare pointwise.
        use butcher_rings::traits::Field;

        let r = stability_function(&methods::gauss4());
        let expected_num = poly(&[(1, 1), (1, 2), (1, 12)]);
        let expected_den = poly(&[(1, 1), (-1, 2), (1, 12)]);
        for z in [-3i64, -1, 0, 1, 2, 5] {
            let z = Complex::from(z);
            let expected = expected_den
                .eval(&z)
                .inv()
                .map(|inv| expected_num.eval(&z) * inv);
            assert_eq!(r.eval(&z), expected);
        }
    }

    #[test]
    fn test_radau2a() {
        // R(z) = (1 + z/3)/(1 − 2z/3 + z²/6)
        let r = stability_function(&methods::radau2a());
        assert_eq!(r.numerator().degree(), 1);
        assert_eq!(r.denominator().degree(), 2);
        // R(0) = 1 and R(−3) = 0 (numerator root at −3)
        assert_eq!(r.eval(&Complex::zero()), Some(Complex::from(1)));
        assert_eq!(r.eval(&Complex::from(-3)), Some(Complex::zero()));
    }
}
