//! A catalog of classical Runge-Kutta tableaux.
//!
//! These are literal coefficient sets from the standard references
//! (Hairer-Nørsett-Wanner vol. I, Hairer-Wanner vol. II); nothing here
//! is computed. Irrational entries are exact surds, so every method can
//! be fed to the analysis engine without loss.

use butcher_linalg::DenseMatrix;
use butcher_rings::{Complex, Rational, Surd};

use crate::tableau::Tableau;

fn r(n: i64, d: i64) -> Complex {
    Complex::ratio(n, d)
}

/// a/b + (c/e)·√d as an exact tableau entry.
fn surd(a: i64, b: i64, c: i64, e: i64, d: u64) -> Complex {
    Complex::from_surd(Surd::new(
        Rational::from_i64(a, b),
        Rational::from_i64(c, e),
        d,
    ))
}

fn tableau(a: Vec<Vec<Complex>>, b: Vec<Complex>) -> Tableau {
    Tableau::new(DenseMatrix::from_rows(a), b, None)
        .expect("catalog tableau dimensions are consistent")
}

/// Explicit Euler: one stage, order 1.
#[must_use]
pub fn explicit_euler() -> Tableau {
    tableau(vec![vec![r(0, 1)]], vec![r(1, 1)])
}

/// Implicit Euler: one stage, order 1, L-stable.
#[must_use]
pub fn implicit_euler() -> Tableau {
    tableau(vec![vec![r(1, 1)]], vec![r(1, 1)])
}

/// Explicit midpoint rule: two stages, order 2.
#[must_use]
pub fn explicit_midpoint() -> Tableau {
    tableau(
        vec![vec![r(0, 1), r(0, 1)], vec![r(1, 2), r(0, 1)]],
        vec![r(0, 1), r(1, 1)],
    )
}

/// The classical explicit Runge-Kutta method: four stages, order 4.
#[must_use]
pub fn rk4() -> Tableau {
    tableau(
        vec![
            vec![r(0, 1), r(0, 1), r(0, 1), r(0, 1)],
            vec![r(1, 2), r(0, 1), r(0, 1), r(0, 1)],
            vec![r(0, 1), r(1, 2), r(0, 1), r(0, 1)],
            vec![r(0, 1), r(0, 1), r(1, 1), r(0, 1)],
        ],
        vec![r(1, 6), r(2, 6), r(2, 6), r(1, 6)],
    )
}

/// Gauss method on 2 points: order 4, symmetric, A-stable.
#[must_use]
pub fn gauss4() -> Tableau {
    tableau(
        vec![
            vec![r(1, 4), surd(1, 4, -1, 6, 3)],
            vec![surd(1, 4, 1, 6, 3), r(1, 4)],
        ],
        vec![r(1, 2), r(1, 2)],
    )
}

/// Radau IIA on 2 points: order 3, L-stable, stiffly accurate.
#[must_use]
pub fn radau2a() -> Tableau {
    tableau(
        vec![vec![r(5, 12), r(-1, 12)], vec![r(3, 4), r(1, 4)]],
        vec![r(3, 4), r(1, 4)],
    )
}

/// Radau method on 3 points: order 5. See Hairer-Wanner II.
#[must_use]
pub fn radau5() -> Tableau {
    tableau(
        vec![
            vec![r(1, 9), surd(-1, 18, -1, 18, 6), surd(-1, 18, 1, 18, 6)],
            vec![r(1, 9), surd(88, 360, 7, 360, 6), surd(88, 360, -43, 360, 6)],
            vec![r(1, 9), surd(88, 360, 43, 360, 6), surd(88, 360, -7, 360, 6)],
        ],
        vec![r(1, 9), surd(16, 36, 1, 36, 6), surd(16, 36, -1, 36, 6)],
    )
}

/// Lobatto method on 3 points, order 4. See Hairer-Nørsett-Wanner I,
/// page 211.
#[must_use]
pub fn lobatto4() -> Tableau {
    tableau(
        vec![
            vec![r(0, 1), r(0, 1), r(0, 1)],
            vec![r(1, 4), r(1, 4), r(0, 1)],
            vec![r(0, 1), r(1, 1), r(0, 1)],
        ],
        vec![r(1, 6), r(2, 3), r(1, 6)],
    )
}

/// Two-stage SDIRK with γ = (2 + √3)/6.
#[must_use]
pub fn sdirk3() -> Tableau {
    let g = surd(2, 6, 1, 6, 3);
    let row1 = Complex::from(1) - g.clone() - g.clone();
    tableau(
        vec![vec![g.clone(), r(0, 1)], vec![row1, g]],
        vec![r(1, 2), r(1, 2)],
    )
}

/// Five-stage SDIRK with γ = 1/4. See Hairer-Wanner II, page 100.
#[must_use]
pub fn sdirk5() -> Tableau {
    tableau(
        vec![
            vec![r(1, 4), r(0, 1), r(0, 1), r(0, 1), r(0, 1)],
            vec![r(1, 2), r(1, 4), r(0, 1), r(0, 1), r(0, 1)],
            vec![r(17, 50), r(-1, 25), r(1, 4), r(0, 1), r(0, 1)],
            vec![r(371, 1360), r(-137, 2720), r(15, 544), r(1, 4), r(0, 1)],
            vec![r(25, 24), r(-49, 48), r(125, 16), r(-85, 12), r(1, 4)],
        ],
        vec![r(25, 24), r(-49, 48), r(125, 16), r(-85, 12), r(1, 4)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::Ring;

    fn weight_sum(t: &Tableau) -> Complex {
        t.b().iter().fold(Complex::zero(), |acc, x| acc + x.clone())
    }

    #[test]
    fn test_all_catalog_weights_sum_to_one() {
        for t in [
            explicit_euler(),
            implicit_euler(),
            explicit_midpoint(),
            rk4(),
            gauss4(),
            radau2a(),
            radau5(),
            lobatto4(),
            sdirk3(),
            sdirk5(),
        ] {
            assert!(weight_sum(&t).is_one(), "ΣB ≠ 1 for {t}");
        }
    }

    #[test]
    fn test_gauss4_entries_cancel() {
        // A[0][1] + A[1][0] = 1/2
        let t = gauss4();
        let sum = t.a()[(0, 1)].clone() + t.a()[(1, 0)].clone();
        assert_eq!(sum, r(1, 2));
    }

    #[test]
    fn test_sdirk5_is_stiffly_accurate_by_construction() {
        let t = sdirk5();
        for j in 0..5 {
            assert_eq!(t.a()[(4, j)], t.b()[j]);
        }
    }

    #[test]
    fn test_radau5_row_sums_are_abscissae() {
        // abscissae are 0 and (6 ∓ √6)/10; row sums of A equal them
        let t = radau5();
        let row_sum = |i: usize| {
            t.a()
                .row(i)
                .iter()
                .fold(Complex::zero(), |acc, x| acc + x.clone())
        };
        assert!(row_sum(0).is_zero());
        assert_eq!(row_sum(1), surd(6, 10, -1, 10, 6));
        assert_eq!(row_sum(2), surd(6, 10, 1, 10, 6));
    }
}
