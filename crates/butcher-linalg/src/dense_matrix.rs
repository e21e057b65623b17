//! Dense matrix storage and exact linear algebra.

use std::ops::{Add, Index, IndexMut, Sub};

use butcher_rings::traits::{Field, Ring};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<R: Ring> DenseMatrix<R> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![R::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows have unequal lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<R>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<R> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols, "ragged rows");
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns true if every entry is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(Ring::is_zero)
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a column as a vector.
    #[must_use]
    pub fn col(&self, col: usize) -> Vec<R> {
        (0..self.num_rows)
            .map(|row| self[(row, col)].clone())
            .collect()
    }

    /// All entries in row-major order.
    #[must_use]
    pub fn entries(&self) -> &[R] {
        &self.data
    }

    /// Matrix-vector multiply: y = A·x.
    ///
    /// # Panics
    ///
    /// Panics if `x` has the wrong length.
    #[must_use]
    pub fn mv(&self, x: &[R]) -> Vec<R> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(x.iter())
                    .fold(R::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect()
    }

    /// Matrix-matrix multiply: C = A·B.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions are incompatible.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                let mut sum = R::zero();
                for k in 0..self.num_cols {
                    sum = sum + self[(i, k)].clone() * other[(k, j)].clone();
                }
                result[(i, j)] = sum;
            }
        }
        result
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.num_cols, self.num_rows);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                result[(j, i)] = self[(i, j)].clone();
            }
        }
        result
    }

    /// Scales all entries by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: &R) -> Self {
        Self {
            data: self
                .data
                .iter()
                .map(|v| v.clone() * scalar.clone())
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// The minor obtained by deleting one row and one column.
    fn minor(&self, skip_row: usize, skip_col: usize) -> Self {
        let mut data = Vec::with_capacity((self.num_rows - 1) * (self.num_cols - 1));
        for i in 0..self.num_rows {
            if i == skip_row {
                continue;
            }
            for j in 0..self.num_cols {
                if j == skip_col {
                    continue;
                }
                data.push(self[(i, j)].clone());
            }
        }
        Self {
            data,
            num_rows: self.num_rows - 1,
            num_cols: self.num_cols - 1,
        }
    }

    /// Computes the determinant by cofactor expansion.
    ///
    /// Works over any commutative ring; in particular the entries may be
    /// polynomials, which is how the stability function's determinants
    /// are evaluated without any division.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn det(&self) -> R {
        assert!(self.is_square(), "determinant of a non-square matrix");
        let n = self.num_rows;

        if n == 0 {
            return R::one();
        }
        if n == 1 {
            return self[(0, 0)].clone();
        }
        if n == 2 {
            return self[(0, 0)].clone() * self[(1, 1)].clone()
                - self[(0, 1)].clone() * self[(1, 0)].clone();
        }

        let mut acc = R::zero();
        for j in 0..n {
            if self[(0, j)].is_zero() {
                continue;
            }
            let term = self[(0, j)].clone() * self.minor(0, j).det();
            acc = if j % 2 == 0 { acc + term } else { acc - term };
        }
        acc
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    fn scale_row(&mut self, row: usize, scale: &R) {
        for k in 0..self.num_cols {
            self[(row, k)] = self[(row, k)].clone() * scale.clone();
        }
    }

    fn add_scaled_row(&mut self, target: usize, source: usize, scale: &R) {
        for k in 0..self.num_cols {
            let val = self[(source, k)].clone() * scale.clone();
            self[(target, k)] = self[(target, k)].clone() + val;
        }
    }
}

impl<K: Field> DenseMatrix<K> {
    /// Computes the inverse by Gauss-Jordan elimination.
    ///
    /// Returns `None` if the matrix is singular.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        assert!(self.is_square(), "inverse of a non-square matrix");
        let n = self.num_rows;

        let mut m = self.clone();
        let mut inv = Self::identity(n);

        for col in 0..n {
            let pivot = (col..n).find(|&r| !m[(r, col)].is_zero())?;
            m.swap_rows(col, pivot);
            inv.swap_rows(col, pivot);

            let pivot_inv = m[(col, col)].inv()?;
            m.scale_row(col, &pivot_inv);
            inv.scale_row(col, &pivot_inv);

            for row in 0..n {
                if row != col && !m[(row, col)].is_zero() {
                    let factor = -m[(row, col)].clone();
                    m.add_scaled_row(row, col, &factor);
                    inv.add_scaled_row(row, col, &factor);
                }
            }
        }

        Some(inv)
    }

    /// Solves the linear system A·x = b for a uniquely solvable system.
    ///
    /// Returns `None` if A is singular.
    ///
    /// # Panics
    ///
    /// Panics if `b` has the wrong length.
    #[must_use]
    pub fn solve(&self, b: &[K]) -> Option<Vec<K>> {
        assert_eq!(b.len(), self.num_rows);
        Some(self.inverse()?.mv(b))
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl<R: Ring> Add for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    fn add(self, other: Self) -> DenseMatrix<R> {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl<R: Ring> Sub for &DenseMatrix<R> {
    type Output = DenseMatrix<R>;

    fn sub(self, other: Self) -> DenseMatrix<R> {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a.clone() - b.clone())
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::Rational;

    fn q(n: i64) -> Rational {
        Rational::from_integer(n)
    }

    fn m(rows: &[&[i64]]) -> DenseMatrix<Rational> {
        DenseMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&n| q(n)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_identity_mm() {
        let a = m(&[&[1, 2], &[3, 4]]);
        let id = DenseMatrix::identity(2);
        assert_eq!(a.mm(&id), a);
    }

    #[test]
    fn test_mv() {
        let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
        let y = a.mv(&[q(1), q(2), q(3)]);
        assert_eq!(y, vec![q(14), q(32)]);
    }

    #[test]
    fn test_det_2x2() {
        assert_eq!(m(&[&[3, 8], &[4, 6]]).det(), q(-14));
    }

    #[test]
    fn test_det_cofactor() {
        // det of a singular 3x3
        assert_eq!(m(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]).det(), q(0));
        // and a regular one
        assert_eq!(m(&[&[2, 0, 1], &[1, 1, 0], &[0, 3, 1]]).det(), q(5));
    }

    #[test]
    fn test_inverse() {
        let a = m(&[&[4, 7], &[2, 6]]);
        let inv = a.inverse().unwrap();
        assert_eq!(a.mm(&inv), DenseMatrix::identity(2));
    }

    #[test]
    fn test_singular_inverse() {
        let a = m(&[&[1, 2], &[2, 4]]);
        assert!(a.inverse().is_none());
    }

    #[test]
    fn test_solve() {
        // [[1, 2], [3, 4]]·x = [5, 11] → x = [1, 2]
        let a = m(&[&[1, 2], &[3, 4]]);
        let x = a.solve(&[q(5), q(11)]).unwrap();
        assert_eq!(x, vec![q(1), q(2)]);
    }

    #[test]
    fn test_transpose() {
        let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
        let t = a.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t[(2, 1)], q(6));
    }
}
