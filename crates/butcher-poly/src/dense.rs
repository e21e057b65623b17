//! Dense univariate polynomials.
//!
//! Coefficients are stored in ascending degree order. The degrees this
//! stack manipulates are tiny (a stability function of an s-stage method
//! has degree at most s), so multiplication is plain schoolbook.

use butcher_rings::traits::{Field, Ring};
use std::ops::{Add, Mul, Neg, Sub};

/// A dense univariate polynomial over a ring.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DensePoly<R: Ring> {
    /// Coefficients in ascending degree order, no trailing zeros.
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(Ring::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c·xⁿ.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Returns the degree of the polynomial (0 for constants and zero).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns the leading coefficient.
    ///
    /// # Panics
    ///
    /// Never panics; the coefficient vector is nonempty by construction.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        self.coeffs.last().expect("coefficient vector is nonempty")
    }

    /// Returns the coefficient of xⁱ.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            let a = self.coeffs.get(i).cloned().unwrap_or_else(R::zero);
            let b = other.coeffs.get(i).cloned().unwrap_or_else(R::zero);
            result.push(a + b);
        }

        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![R::zero(); n + m - 1];

        for i in 0..n {
            for j in 0..m {
                result[i + j] =
                    result[i + j].clone() + self.coeffs[i].clone() * other.coeffs[j].clone();
            }
        }

        Self::new(result)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// Shifts the polynomial by multiplying by xⁿ.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }

        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.clone());
        Self::new(coeffs)
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }

        let mut result = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, c) in self.coeffs.iter().skip(1).enumerate() {
            result.push(c.mul_by_scalar((i + 1) as i64));
        }

        Self::new(result)
    }

    /// Substitutes another polynomial for the indeterminate: self ∘ q.
    #[must_use]
    pub fn compose(&self, q: &Self) -> Self {
        let mut result = Self::zero();
        for c in self.coeffs.iter().rev() {
            result = result.mul(q).add(&Self::constant(c.clone()));
        }
        result
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }
        if n == 1 {
            return self.clone();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            exp >>= 1;
        }

        result
    }
}

impl<K: Field> DensePoly<K> {
    /// Computes the antiderivative with zero constant term.
    #[must_use]
    pub fn integral(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }

        let mut result = Vec::with_capacity(self.coeffs.len() + 1);
        result.push(K::zero());
        for (i, c) in self.coeffs.iter().enumerate() {
            let divisor = K::one().mul_by_scalar((i + 1) as i64);
            result.push(c.field_div(&divisor));
        }

        Self::new(result)
    }
}

// The polynomial ring itself is a ring, which is what lets matrices of
// polynomials flow through the generic determinant.
impl<K: Field> Add for DensePoly<K> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        DensePoly::add(&self, &rhs)
    }
}

impl<K: Field> Sub for DensePoly<K> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        DensePoly::sub(&self, &rhs)
    }
}

impl<K: Field> Mul for DensePoly<K> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        DensePoly::mul(&self, &rhs)
    }
}

impl<K: Field> Neg for DensePoly<K> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        DensePoly::neg(&self)
    }
}

impl<K: Field> Ring for DensePoly<K> {
    fn zero() -> Self {
        DensePoly::zero()
    }

    fn one() -> Self {
        DensePoly::one()
    }

    fn is_zero(&self) -> bool {
        DensePoly::is_zero(self)
    }

    fn is_one(&self) -> bool {
        self.degree() == 0 && self.coeffs[0].is_one()
    }
}

impl<R: Ring + std::fmt::Display> std::fmt::Display for DensePoly<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }

            let term = match i {
                0 => format!("{c}"),
                1 => format!("({c})·x"),
                _ => format!("({c})·x^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}
