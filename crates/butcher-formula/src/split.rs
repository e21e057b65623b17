//! Polynomial utilities for the imaginary-axis analysis.
//!
//! The stability function has real-algebraic coefficients, so after the
//! substitution z = i·x every coefficient is a real multiple of a power
//! of i: purely real or purely imaginary, never mixed. These helpers
//! split such polynomials exactly; they are NOT general complex
//! conjugation and must not be fed mixed coefficients (the derivations
//! in this crate cannot produce any).

use butcher_poly::roots::all_roots;
use butcher_poly::DensePoly;
use butcher_rings::traits::Ring;
use butcher_rings::Complex;

use crate::error::{Result, RkError};

/// The coefficient-wise conjugate: terms with purely real coefficients
/// are kept, all others are negated.
#[must_use]
pub fn conj_poly(p: &DensePoly<Complex>) -> DensePoly<Complex> {
    DensePoly::new(
        p.coeffs()
            .iter()
            .map(|c| if c.is_real() { c.clone() } else { -c.clone() })
            .collect(),
    )
}

/// The sub-polynomial of terms whose coefficient is purely real.
#[must_use]
pub fn real_part(p: &DensePoly<Complex>) -> DensePoly<Complex> {
    DensePoly::new(
        p.coeffs()
            .iter()
            .map(|c| if c.is_real() { c.clone() } else { Complex::zero() })
            .collect(),
    )
}

/// The sub-polynomial of terms whose coefficient carries a nonzero
/// imaginary part, each divided by i so the result has real
/// coefficients.
#[must_use]
pub fn imag_part(p: &DensePoly<Complex>) -> DensePoly<Complex> {
    let minus_i = -Complex::i();
    DensePoly::new(
        p.coeffs()
            .iter()
            .map(|c| {
                if c.is_real() {
                    Complex::zero()
                } else {
                    minus_i.clone() * c.clone()
                }
            })
            .collect(),
    )
}

/// All roots of `p` with multiplicities, or an error if the working
/// field cannot account for the full degree.
///
/// # Errors
///
/// Returns [`RkError::IncompleteRoots`] carrying the polynomial and the
/// shortfall; partial root sets are never silently returned.
pub fn checked_roots(p: &DensePoly<Complex>) -> Result<Vec<(Complex, u32)>> {
    let report = all_roots(p);
    if report.is_complete() {
        Ok(report.roots)
    } else {
        Err(RkError::IncompleteRoots {
            poly: Box::new(p.clone()),
            degree: report.degree,
            found: report.multiplicity_sum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::Surd;

    // 1 + 2i·x − 3x² − 5i·x³, each coefficient purely real or imaginary
    fn mixed_poly() -> DensePoly<Complex> {
        DensePoly::new(vec![
            Complex::from(1),
            Complex::new(Surd::zero(), Surd::from(2)),
            Complex::from(-3),
            Complex::new(Surd::zero(), Surd::from(-5)),
        ])
    }

    #[test]
    fn test_real_part() {
        let p = real_part(&mixed_poly());
        assert_eq!(p.coeff(0), Complex::from(1));
        assert!(p.coeff(1).is_zero());
        assert_eq!(p.coeff(2), Complex::from(-3));
    }

    #[test]
    fn test_imag_part_has_real_coefficients() {
        let p = imag_part(&mixed_poly());
        assert!(p.coeffs().iter().all(Complex::is_real));
        assert_eq!(p.coeff(1), Complex::from(2));
        assert_eq!(p.coeff(3), Complex::from(-5));
    }

    #[test]
    fn test_split_round_trip() {
        // real_part(P) + imag_part(P)·i == P
        let p = mixed_poly();
        let reassembled = real_part(&p).add(&imag_part(&p).scale(&Complex::i()));
        assert_eq!(reassembled, p);
    }

    #[test]
    fn test_conj_negates_imaginary_terms() {
        let p = conj_poly(&mixed_poly());
        assert_eq!(p.coeff(0), Complex::from(1));
        assert_eq!(p.coeff(1), Complex::new(Surd::zero(), Surd::from(-2)));
    }

    #[test]
    fn test_checked_roots_surface_incompleteness() {
        // x³ − 2: no root in Q(√d, i)
        let p = DensePoly::new(vec![
            Complex::from(-2),
            Complex::zero(),
            Complex::zero(),
            Complex::from(1),
        ]);
        let err = checked_roots(&p).unwrap_err();
        match err {
            RkError::IncompleteRoots { degree, found, .. } => {
                assert_eq!(degree, 3);
                assert_eq!(found, 0);
            }
            other => panic!("expected IncompleteRoots, got {other}"),
        }
    }
}
