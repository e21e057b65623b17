//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::algorithms::gcd::{poly_div_rem, poly_gcd};
    use crate::dense::DensePoly;
    use butcher_rings::Rational;

    // Strategy for generating small rational coefficients
    fn small_coeff() -> impl Strategy<Value = Rational> {
        (-100i64..100i64, 1i64..8i64).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    // Strategy for generating small polynomials (degree 0-4)
    fn small_poly() -> impl Strategy<Value = DensePoly<Rational>> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(DensePoly::new)
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Rational>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_div_rem_reconstructs(a in small_poly(), b in nonzero_poly()) {
            let (q, r) = poly_div_rem(&a, &b);
            prop_assert_eq!(b.mul(&q).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn poly_gcd_divides_both(a in nonzero_poly(), b in nonzero_poly()) {
            let g = poly_gcd(&a, &b);
            let (_, ra) = poly_div_rem(&a, &g);
            let (_, rb) = poly_div_rem(&b, &g);
            prop_assert!(ra.is_zero());
            prop_assert!(rb.is_zero());
        }

        #[test]
        fn derivative_of_integral_is_identity(p in small_poly()) {
            prop_assert_eq!(p.integral().derivative(), p);
        }

        #[test]
        fn compose_eval_commutes(p in small_poly(), q in small_poly(), x in -20i64..20i64) {
            let x = Rational::from_integer(x);
            let direct = p.eval(&q.eval(&x));
            let composed = p.compose(&q).eval(&x);
            prop_assert_eq!(direct, composed);
        }
    }
}
