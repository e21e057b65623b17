//! Validated Butcher tableau data.

use std::fmt;

use butcher_linalg::DenseMatrix;
use butcher_rings::Complex;

use crate::error::{Result, RkError};

/// The (A, B, C) coefficient set of a Runge-Kutta method.
///
/// Validated once at construction and immutable afterwards; the stage
/// count is derived from B, never stored. Entries are exact by type —
/// there is no way to smuggle a float in here, which is what makes every
/// downstream yes/no answer definitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    a: DenseMatrix<Complex>,
    b: Vec<Complex>,
    c: Option<Vec<Complex>>,
}

impl Tableau {
    /// Creates a tableau, checking dimension consistency.
    ///
    /// # Errors
    ///
    /// Returns [`RkError::Dimensions`] unless A is square, B matches its
    /// size, and C (when present) matches as well.
    pub fn new(a: DenseMatrix<Complex>, b: Vec<Complex>, c: Option<Vec<Complex>>) -> Result<Self> {
        let consistent = a.is_square()
            && a.num_rows() == b.len()
            && c.as_ref().map_or(true, |c| c.len() == b.len());

        if !consistent {
            return Err(RkError::Dimensions {
                rows: a.num_rows(),
                cols: a.num_cols(),
                b_len: b.len(),
                c_len: c.map_or(0, |c| c.len()),
            });
        }

        Ok(Self { a, b, c })
    }

    /// The number of stages s.
    #[must_use]
    pub fn stages(&self) -> usize {
        self.b.len()
    }

    /// The s×s coefficient matrix A.
    #[must_use]
    pub fn a(&self) -> &DenseMatrix<Complex> {
        &self.a
    }

    /// The weight vector B.
    #[must_use]
    pub fn b(&self) -> &[Complex] {
        &self.b
    }

    /// The abscissa vector C, if one was supplied.
    #[must_use]
    pub fn c(&self) -> Option<&[Complex]> {
        self.c.as_deref()
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.stages() {
            let row: Vec<String> = self.a.row(i).iter().map(ToString::to_string).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        let b: Vec<String> = self.b.iter().map(ToString::to_string).collect();
        write!(f, "B = [{}]", b.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::Ring;

    fn matrix(n: usize) -> DenseMatrix<Complex> {
        DenseMatrix::identity(n)
    }

    #[test]
    fn test_consistent_dimensions() {
        let t = Tableau::new(matrix(2), vec![Complex::one(); 2], None).unwrap();
        assert_eq!(t.stages(), 2);
        assert!(t.c().is_none());
    }

    #[test]
    fn test_c_accepted_when_matching() {
        let t = Tableau::new(matrix(2), vec![Complex::one(); 2], Some(vec![Complex::zero(); 2]));
        assert!(t.is_ok());
    }

    #[test]
    fn test_b_length_mismatch() {
        let err = Tableau::new(matrix(2), vec![Complex::one(); 3], None).unwrap_err();
        assert!(matches!(err, RkError::Dimensions { b_len: 3, .. }));
    }

    #[test]
    fn test_c_length_mismatch() {
        let err =
            Tableau::new(matrix(2), vec![Complex::one(); 2], Some(vec![Complex::zero(); 1]))
                .unwrap_err();
        assert!(matches!(err, RkError::Dimensions { c_len: 1, .. }));
    }
}
