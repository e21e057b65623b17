//! Property-based tests for the splitter and the tree model.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::split::{conj_poly, imag_part, real_part};
    use crate::trees::TreeTable;
    use butcher_poly::DensePoly;
    use butcher_rings::traits::Ring;
    use butcher_rings::{Complex, Surd};

    // A coefficient that is purely real or purely imaginary — the only
    // kind the imaginary-axis substitution can produce.
    fn pure_coeff() -> impl Strategy<Value = Complex> {
        ((-50i64..50i64), proptest::bool::ANY).prop_map(|(n, imaginary)| {
            if imaginary {
                Complex::new(Surd::zero(), Surd::from(n))
            } else {
                Complex::from(n)
            }
        })
    }

    fn pure_poly() -> impl Strategy<Value = DensePoly<Complex>> {
        proptest::collection::vec(pure_coeff(), 1..=8).prop_map(DensePoly::new)
    }

    proptest! {
        #[test]
        fn splitter_round_trip(p in pure_poly()) {
            // real_part(P) + imag_part(P)·i == P
            let reassembled = real_part(&p).add(&imag_part(&p).scale(&Complex::i()));
            prop_assert_eq!(reassembled, p);
        }

        #[test]
        fn conjugate_is_involutive(p in pure_poly()) {
            prop_assert_eq!(conj_poly(&conj_poly(&p)), p);
        }

        #[test]
        fn imag_part_is_real(p in pure_poly()) {
            prop_assert!(imag_part(&p).coeffs().iter().all(Complex::is_real));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn tree_invariants(size in 1usize..=6) {
            let mut table = TreeTable::new();
            for tree in table.enumerate(size).unwrap() {
                prop_assert_eq!(tree.node_count() as usize, size);
                // γ and σ both divide size! (Butcher's identities bound them)
                let factorial: u64 = (1..=size as u64).product();
                prop_assert_eq!(factorial % tree.density(), 0);
                prop_assert_eq!(factorial % tree.symmetry_coefficient(), 0);
                // labelling is stable
                prop_assert_eq!(tree.order_formula(), tree.order_formula());
            }
        }
    }
}
