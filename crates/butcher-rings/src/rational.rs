//! Arbitrary precision rational numbers.
//!
//! This is the base field of every tableau the stack analyzes; all other
//! scalar types are built on top of it.

use dashu::base::{Abs, Inverse, Signed as DashuSigned};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::traits::{Field, Ring};

/// An arbitrary precision rational number.
///
/// Rationals are always stored in lowest terms with a positive denominator,
/// so structural equality is value equality.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: IBig, denominator: IBig) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let negative = DashuSigned::is_negative(&denominator);
        let num = if negative { -numerator } else { numerator };
        let den = UBig::try_from(denominator.abs()).expect("absolute value is non-negative");
        Self(RBig::from_parts(num, den))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(IBig::from(numerator), IBig::from(denominator))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(RBig::from(n))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> IBig {
        self.0.numerator().clone()
    }

    /// Returns the (positive) denominator.
    #[must_use]
    pub fn denominator(&self) -> IBig {
        IBig::from(self.0.denominator().clone())
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Attempts to convert to an i64. Returns `None` for non-integers
    /// and integers that do not fit.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.numerator().try_into().ok()
        } else {
            None
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.0.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Returns the closest f64 approximation.
    ///
    /// Only the plotting interface consumes this; every decision the
    /// stack makes is taken on the exact value.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Returns the inner `dashu::RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }
}

impl Ring for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl Field for Rational {
    fn inv(&self) -> Option<Self> {
        if self.0.is_zero() {
            None
        } else {
            Some(self.recip())
        }
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        assert!(!rhs.0.is_zero(), "division by zero");
        Self(self.0 / rhs.0)
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Self::Output {
        assert!(!rhs.0.is_zero(), "division by zero");
        Rational(&self.0 / &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Self::from_integer(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Rational::from_i64(1, 2);
        let b = Rational::from_i64(1, 3);

        // 1/2 + 1/3 = 5/6
        assert_eq!(a.clone() + b.clone(), Rational::from_i64(5, 6));

        // 1/2 * 1/3 = 1/6
        assert_eq!(a.clone() * b.clone(), Rational::from_i64(1, 6));

        // (1/2) / (1/3) = 3/2
        assert_eq!(a / b, Rational::from_i64(3, 2));
    }

    #[test]
    fn test_reduction() {
        // 4/6 reduces to 2/3
        assert_eq!(Rational::from_i64(4, 6), Rational::from_i64(2, 3));
        // negative denominators are normalized away
        assert_eq!(Rational::from_i64(1, -2), Rational::from_i64(-1, 2));
    }

    #[test]
    fn test_sign() {
        assert_eq!(Rational::from_i64(-2, 5).signum(), -1);
        assert_eq!(Rational::from_i64(0, 1).signum(), 0);
        assert_eq!(Rational::from_i64(7, 5).signum(), 1);
    }

    #[test]
    fn test_field_inverse() {
        let a = Rational::from_i64(3, 5);
        let inv = Field::inv(&a).unwrap();
        assert!(Ring::is_one(&(a * inv)));
        assert!(Field::inv(&Rational::from_i64(0, 1)).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::from_i64(3, 1).to_string(), "3");
        assert_eq!(Rational::from_i64(2, 3).to_string(), "2/3");
        assert_eq!(Rational::from_i64(-1, 4).to_string(), "-1/4");
    }
}
