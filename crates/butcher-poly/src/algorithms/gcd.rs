//! Polynomial division and GCD over a field.

use butcher_rings::traits::Field;

use crate::dense::DensePoly;

/// Computes the GCD of two polynomials over a field using the Euclidean
/// algorithm. The result is monic.
pub fn poly_gcd<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> DensePoly<F> {
    if a.is_zero() {
        return make_monic(b);
    }
    if b.is_zero() {
        return make_monic(a);
    }

    let mut p = a.clone();
    let mut q = b.clone();

    while !q.is_zero() {
        let (_, r) = poly_div_rem(&p, &q);
        p = q;
        q = r;
    }

    make_monic(&p)
}

/// Divides polynomial a by b, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
pub fn poly_div_rem<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> (DensePoly<F>, DensePoly<F>) {
    assert!(!b.is_zero(), "division by zero polynomial");

    if a.degree() < b.degree() || a.is_zero() {
        return (DensePoly::zero(), a.clone());
    }

    let b_lead_inv = b
        .leading_coeff()
        .inv()
        .expect("leading coefficient of a nonzero polynomial is invertible");
    let mut quotient = vec![F::zero(); a.degree() - b.degree() + 1];
    let mut remainder = a.coeffs().to_vec();

    while remainder.len() >= b.coeffs().len() {
        let deg_diff = remainder.len() - b.coeffs().len();
        let coeff = remainder.last().expect("nonempty").clone() * b_lead_inv.clone();

        quotient[deg_diff] = coeff.clone();

        for (i, bc) in b.coeffs().iter().enumerate() {
            remainder[deg_diff + i] = remainder[deg_diff + i].clone() - coeff.clone() * bc.clone();
        }

        while remainder.len() > 1 && remainder.last().is_some_and(butcher_rings::Ring::is_zero) {
            remainder.pop();
        }

        if remainder.len() == 1 && remainder[0].is_zero() {
            break;
        }
    }

    (DensePoly::new(quotient), DensePoly::new(remainder))
}

/// Makes a polynomial monic (leading coefficient = 1).
pub fn make_monic<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    if p.is_zero() {
        return p.clone();
    }

    let lead_inv = p
        .leading_coeff()
        .inv()
        .expect("leading coefficient of a nonzero polynomial is invertible");
    p.scale(&lead_inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::Rational;

    fn poly(coeffs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(coeffs.iter().map(|&n| Rational::from_integer(n)).collect())
    }

    #[test]
    fn test_div_rem() {
        // (x² − 1) / (x − 1) = x + 1, remainder 0
        let a = poly(&[-1, 0, 1]);
        let b = poly(&[-1, 1]);
        let (q, r) = poly_div_rem(&a, &b);
        assert_eq!(q, poly(&[1, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn test_div_rem_with_remainder() {
        // x³ + 2 = (x² )·x + 2... check a = b·q + r
        let a = poly(&[2, 0, 0, 1]);
        let b = poly(&[1, 1]);
        let (q, r) = poly_div_rem(&a, &b);
        assert_eq!(b.mul(&q).add(&r), a);
        assert!(r.degree() < b.degree() || r.is_zero());
    }

    #[test]
    fn test_gcd() {
        // gcd(x² − 1, x² − 2x + 1) = x − 1
        let a = poly(&[-1, 0, 1]);
        let b = poly(&[1, -2, 1]);
        assert_eq!(poly_gcd(&a, &b), poly(&[-1, 1]));
    }

    #[test]
    fn test_gcd_coprime() {
        let a = poly(&[1, 1]);
        let b = poly(&[2, 1]);
        assert_eq!(poly_gcd(&a, &b).degree(), 0);
    }
}
