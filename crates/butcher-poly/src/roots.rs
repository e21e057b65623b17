//! Exact root finding with a completeness report.
//!
//! The finder returns only roots that are expressible in the working
//! field Q(√d, i), together with enough bookkeeping for the caller to
//! check whether every root (counted with multiplicity) was found. It
//! never falls back to numeric approximation: when a polynomial has
//! roots outside the quadratic tower, the report comes back incomplete
//! and it is the caller's decision to surface that as an error.
//!
//! Pipeline: Yun squarefree split for multiplicities, then per
//! squarefree factor: linear and quadratic formulas (with the partial
//! exact square root), rational-root extraction for higher degrees, and
//! biquadratic reduction.

use butcher_rings::traits::{Field, Ring};
use butcher_rings::{Complex, Rational};
use dashu::base::{Abs, Gcd};
use dashu::integer::IBig;

use crate::algorithms::gcd::poly_div_rem;
use crate::algorithms::squarefree::squarefree_decomposition;
use crate::dense::DensePoly;

/// The outcome of a root query: the expressible roots with their
/// multiplicities, plus the data for the completeness check.
#[derive(Clone, Debug)]
pub struct RootReport {
    /// Roots with multiplicities, in discovery order.
    pub roots: Vec<(Complex, u32)>,
    /// Degree of the queried polynomial.
    pub degree: usize,
    /// Sum of the returned multiplicities.
    pub multiplicity_sum: usize,
}

impl RootReport {
    /// True iff the returned multiplicities account for the whole degree.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.multiplicity_sum == self.degree
    }

    /// Number of roots (with multiplicity) the working field could not
    /// express.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.degree - self.multiplicity_sum
    }
}

/// Finds all roots of `p` expressible in Q(√d, i).
#[must_use]
pub fn all_roots(p: &DensePoly<Complex>) -> RootReport {
    let degree = if p.is_zero() { 0 } else { p.degree() };
    let mut roots = Vec::new();
    let mut multiplicity_sum = 0usize;

    if degree > 0 {
        for sf in squarefree_decomposition(p) {
            for root in distinct_roots(&sf.factor) {
                multiplicity_sum += sf.multiplicity as usize;
                roots.push((root, sf.multiplicity));
            }
        }
    }

    RootReport {
        roots,
        degree,
        multiplicity_sum,
    }
}

/// Distinct roots of a squarefree polynomial.
fn distinct_roots(g: &DensePoly<Complex>) -> Vec<Complex> {
    match g.degree() {
        0 => Vec::new(),
        1 => vec![linear_root(g)],
        2 => quadratic_roots(g),
        _ => higher_degree_roots(g),
    }
}

fn linear_root(g: &DensePoly<Complex>) -> Complex {
    let lead_inv = g
        .leading_coeff()
        .inv()
        .expect("nonzero leading coefficient");
    -(g.coeff(0) * lead_inv)
}

/// Quadratic formula with the partial exact square root. Returns fewer
/// than two roots only when the discriminant root leaves the tower.
fn quadratic_roots(g: &DensePoly<Complex>) -> Vec<Complex> {
    let c0 = g.coeff(0);
    let c1 = g.coeff(1);
    let c2 = g.coeff(2);

    let disc = c1.clone() * c1.clone() - (c2.clone() * c0).mul_by_scalar(4);
    let Some(s) = disc.sqrt() else {
        return Vec::new();
    };

    let denom_inv = c2
        .mul_by_scalar(2)
        .inv()
        .expect("nonzero leading coefficient");
    let r1 = (-c1.clone() + s.clone()) * denom_inv.clone();
    let r2 = (-c1 - s) * denom_inv;
    if r1 == r2 {
        vec![r1]
    } else {
        vec![r1, r2]
    }
}

fn higher_degree_roots(g: &DensePoly<Complex>) -> Vec<Complex> {
    let mut roots = Vec::new();
    let mut rest = g.clone();

    // a squarefree polynomial has at most a simple root at 0
    if rest.coeff(0).is_zero() {
        roots.push(Complex::zero());
        let (quot, _) = poly_div_rem(&rest, &DensePoly::x());
        rest = quot;
    }

    if let Some(ints) = integer_coeffs(&rest) {
        for candidate in rational_candidates(&ints) {
            if rest.degree() < 3 {
                break;
            }
            let value = Complex::from_rational(candidate.clone());
            if rest.eval(&value).is_zero() {
                let factor = DensePoly::new(vec![-value.clone(), Complex::one()]);
                let (quot, _) = poly_div_rem(&rest, &factor);
                rest = quot;
                roots.push(value);
            }
        }
    }

    match rest.degree() {
        0 => {}
        1 => roots.push(linear_root(&rest)),
        2 => roots.extend(quadratic_roots(&rest)),
        4 if rest.coeff(1).is_zero() && rest.coeff(3).is_zero() => {
            roots.extend(biquadratic_roots(&rest));
        }
        _ => {}
    }

    roots
}

/// Roots of c₄x⁴ + c₂x² + c₀ by substituting u = x².
fn biquadratic_roots(g: &DensePoly<Complex>) -> Vec<Complex> {
    let u_poly = DensePoly::new(vec![g.coeff(0), g.coeff(2), g.coeff(4)]);
    let mut roots = Vec::new();
    for u in quadratic_roots(&u_poly) {
        if let Some(s) = u.sqrt() {
            if s.is_zero() {
                roots.push(s);
            } else {
                roots.push(s.clone());
                roots.push(-s);
            }
        }
    }
    roots
}

/// The integer coefficient vector of a rational-coefficient polynomial,
/// scaled by the common denominator. `None` if any coefficient is
/// irrational or non-real.
fn integer_coeffs(g: &DensePoly<Complex>) -> Option<Vec<IBig>> {
    let mut rationals = Vec::with_capacity(g.coeffs().len());
    for c in g.coeffs() {
        if !c.is_real() {
            return None;
        }
        rationals.push(c.re().as_rational()?.clone());
    }

    let mut lcm = IBig::ONE;
    for r in &rationals {
        let den = r.denominator();
        let common = IBig::from(lcm.clone().gcd(den.clone()));
        lcm = lcm / common * den;
    }

    let scale = Rational::new(lcm, IBig::ONE);
    Some(rationals.iter().map(|r| (r * &scale).numerator()).collect())
}

/// Candidate rational roots p/q with p | constant and q | leading term
/// (both signs), per the rational root theorem.
fn rational_candidates(ints: &[IBig]) -> Vec<Rational> {
    let Some(constant) = ints.iter().find(|c| !c.is_zero()) else {
        return Vec::new();
    };
    let leading = ints.last().expect("nonempty coefficient vector");

    let (Some(ps), Some(qs)) = (small_divisors(constant), small_divisors(leading)) else {
        return Vec::new();
    };

    let mut candidates = Vec::new();
    for p in &ps {
        for q in &qs {
            let r = Rational::new(IBig::from(*p), IBig::from(*q));
            candidates.push(r.clone());
            candidates.push(-r);
        }
    }
    candidates.sort();
    candidates.dedup();
    candidates
}

/// All divisors of |n|, or `None` when |n| is too large to enumerate.
fn small_divisors(n: &IBig) -> Option<Vec<u64>> {
    let n: u64 = n.clone().abs().try_into().ok()?;
    if n == 0 || n > 1_000_000_000_000 {
        return None;
    }

    let mut divisors = Vec::new();
    let mut i = 1u64;
    while i * i <= n {
        if n % i == 0 {
            divisors.push(i);
            if i != n / i {
                divisors.push(n / i);
            }
        }
        i += 1;
    }
    Some(divisors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::Surd;

    fn poly(coeffs: &[i64]) -> DensePoly<Complex> {
        DensePoly::new(coeffs.iter().map(|&n| Complex::from(n)).collect())
    }

    #[test]
    fn test_sqrt2() {
        let report = all_roots(&poly(&[-2, 0, 1]));
        assert!(report.is_complete());
        let roots: Vec<_> = report.roots.iter().map(|(r, _)| r.clone()).collect();
        assert!(roots.contains(&Complex::from_surd(Surd::sqrt_int(2))));
        assert!(roots.contains(&-Complex::from_surd(Surd::sqrt_int(2))));
    }

    #[test]
    fn test_imaginary_pair() {
        // x² + 1 = 0 → ±i
        let report = all_roots(&poly(&[1, 0, 1]));
        assert!(report.is_complete());
        assert!(report.roots.iter().any(|(r, _)| *r == Complex::i()));
    }

    #[test]
    fn test_cube_root_is_unreachable() {
        // x³ − 2: the real root is a cube root, not a surd
        let report = all_roots(&poly(&[-2, 0, 0, 1]));
        assert!(!report.is_complete());
        assert_eq!(report.shortfall(), 3);
        assert!(report.roots.is_empty());
    }

    #[test]
    fn test_rational_cubic() {
        // (2x − 1)(x − 3)(x + 2) = 2x³ − 3x² − 11x + 6
        let report = all_roots(&poly(&[6, -11, -3, 2]));
        assert!(report.is_complete());
        let roots: Vec<_> = report.roots.iter().map(|(r, _)| r.clone()).collect();
        assert!(roots.contains(&Complex::ratio(1, 2)));
        assert!(roots.contains(&Complex::from(3)));
        assert!(roots.contains(&Complex::from(-2)));
    }

    #[test]
    fn test_multiplicities() {
        // (x² − 2)² has ±√2 with multiplicity 2
        let p = poly(&[-2, 0, 1]);
        let report = all_roots(&p.mul(&p));
        assert!(report.is_complete());
        assert_eq!(report.roots.len(), 2);
        assert!(report.roots.iter().all(|(_, m)| *m == 2));
    }

    #[test]
    fn test_zero_root_power() {
        // x⁶(x² − 8): 0 with multiplicity 6, ±2√2 simple
        let report = all_roots(&poly(&[0, 0, 0, 0, 0, 0, -8, 0, 1]));
        assert!(report.is_complete());
        assert_eq!(report.degree, 8);
        let zero_mult = report
            .roots
            .iter()
            .find(|(r, _)| r.is_zero())
            .map(|(_, m)| *m);
        assert_eq!(zero_mult, Some(6));
    }

    #[test]
    fn test_biquadratic_complex() {
        // x⁴ + 4x² + 36 → ±√2 ± 2i
        let report = all_roots(&poly(&[36, 0, 4, 0, 1]));
        assert!(report.is_complete());
        assert_eq!(report.roots.len(), 4);
        let expected = Complex::new(Surd::sqrt_int(2), Surd::from(2));
        assert!(report.roots.iter().any(|(r, _)| *r == expected));
    }

    #[test]
    fn test_constant_has_no_roots() {
        let report = all_roots(&poly(&[7]));
        assert!(report.is_complete());
        assert!(report.roots.is_empty());
    }
}
