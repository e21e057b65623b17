//! Exact complex values over the quadratic surds.
//!
//! `Complex` is the working field of the whole stack: Q(√d, i). Every
//! coefficient a stability-function derivation can produce — tableau
//! entries, imaginary-axis traces, quadratic roots with negative
//! discriminant — lives here, with decidable equality throughout.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::rational::Rational;
use crate::surd::Surd;
use crate::traits::{Field, Ring};

/// An exact complex number re + im·i with quadratic-surd components.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Complex {
    re: Surd,
    im: Surd,
}

impl Complex {
    /// Creates a complex value from its real and imaginary parts.
    #[must_use]
    pub fn new(re: Surd, im: Surd) -> Self {
        Self { re, im }
    }

    /// Creates a real value.
    #[must_use]
    pub fn from_surd(re: Surd) -> Self {
        Self {
            re,
            im: Surd::zero(),
        }
    }

    /// Creates a rational value.
    #[must_use]
    pub fn from_rational(r: Rational) -> Self {
        Self::from_surd(Surd::from_rational(r))
    }

    /// Creates the rational value n/d.
    ///
    /// # Panics
    ///
    /// Panics if `d` is zero.
    #[must_use]
    pub fn ratio(n: i64, d: i64) -> Self {
        Self::from_rational(Rational::from_i64(n, d))
    }

    /// The imaginary unit i.
    #[must_use]
    pub fn i() -> Self {
        Self {
            re: Surd::zero(),
            im: Surd::one(),
        }
    }

    /// The real part.
    #[must_use]
    pub fn re(&self) -> &Surd {
        &self.re
    }

    /// The imaginary part.
    #[must_use]
    pub fn im(&self) -> &Surd {
        &self.im
    }

    /// Returns true if the imaginary part is exactly zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        Ring::is_zero(&self.im)
    }

    /// The complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -self.im.clone(),
        }
    }

    /// The squared modulus re² + im², a real value.
    #[must_use]
    pub fn modulus_squared(&self) -> Surd {
        self.re.clone() * self.re.clone() + self.im.clone() * self.im.clone()
    }

    /// An exact square root, when one exists in Q(√d, i).
    ///
    /// Real values always have a representable root when their magnitude
    /// denests (negative reals root to the imaginary axis). Genuinely
    /// complex values use p + q·i with p = √((|w| + re)/2), q = im/2p,
    /// which stays in the tower only if |w| denests alongside re and im.
    #[must_use]
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_real() {
            return if self.re.signum() >= 0 {
                self.re.sqrt().map(Self::from_surd)
            } else {
                (-self.re.clone())
                    .sqrt()
                    .map(|magnitude| Self::new(Surd::zero(), magnitude))
            };
        }

        if !self.re.compatible(&self.im) {
            return None;
        }
        let m = self.modulus_squared().sqrt()?;
        if !m.compatible(&self.re) {
            return None;
        }

        let half = Surd::from_rational(Rational::from_i64(1, 2));
        let p = ((m + self.re.clone()) * half).sqrt()?;
        if Ring::is_zero(&p) || !p.compatible(&self.im) {
            return None;
        }

        let q = self.im.clone() / (Surd::from(2) * p.clone());
        let candidate = Self::new(p, q);
        if candidate.clone() * candidate.clone() == *self {
            Some(candidate)
        } else {
            None
        }
    }

    /// Returns (re, im) as f64 approximations for the plotting interface.
    #[must_use]
    pub fn to_f64_parts(&self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }
}

impl Ring for Complex {
    fn zero() -> Self {
        Self {
            re: Surd::zero(),
            im: Surd::zero(),
        }
    }

    fn one() -> Self {
        Self {
            re: Surd::one(),
            im: Surd::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        Ring::is_zero(&self.re) && Ring::is_zero(&self.im)
    }

    fn is_one(&self) -> bool {
        Ring::is_one(&self.re) && Ring::is_zero(&self.im)
    }
}

impl Field for Complex {
    fn inv(&self) -> Option<Self> {
        if Ring::is_zero(self) {
            return None;
        }

        // 1/(x + y·i) = (x − y·i)/(x² + y²)
        let norm = self.modulus_squared();
        let norm_inv = Field::inv(&norm).expect("nonzero modulus");
        Some(Self {
            re: self.re.clone() * norm_inv.clone(),
            im: -self.im.clone() * norm_inv,
        })
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let re = self.re.clone() * rhs.re.clone() - self.im.clone() * rhs.im.clone();
        let im = self.re * rhs.im + self.im * rhs.re;
        Self { re, im }
    }
}

impl Div for Complex {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self.field_div(&rhs)
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl From<i64> for Complex {
    fn from(value: i64) -> Self {
        Self::from_rational(Rational::from_integer(value))
    }
}

impl From<Rational> for Complex {
    fn from(value: Rational) -> Self {
        Self::from_rational(value)
    }
}

impl From<Surd> for Complex {
    fn from(value: Surd) -> Self {
        Self::from_surd(value)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if Ring::is_zero(&self.im) {
            return write!(f, "{}", self.re);
        }
        if Ring::is_zero(&self.re) {
            return write!(f, "({})·i", self.im);
        }
        write!(f, "{} + ({})·i", self.re, self.im)
    }
}
