//! Real quadratic surds a + b·√d.
//!
//! This is the real-algebraic layer of the scalar tower: wide enough to
//! hold every entry of the classical implicit tableaux (Gauss, Radau,
//! SDIRK all live in some Q(√d)) and every root the checked root finder
//! can express, while keeping equality, sign and ordering decidable.
//!
//! Canonical form: the radicand `d` is a squarefree integer ≥ 2 whenever
//! the irrational coefficient `b` is nonzero, and `b = 0 ⇒ d = 0`.
//! Distinct canonical representations denote distinct reals, so
//! structural equality is value equality.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use dashu::integer::IBig;

use crate::rational::Rational;
use crate::traits::{Field, Ring};

/// A real number of the form a + b·√d with rational a, b.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Surd {
    a: Rational,
    b: Rational,
    d: u64,
}

/// Integer square root by binary search: the largest s with s² ≤ n.
///
/// # Panics
///
/// Panics if `n` is negative.
fn isqrt(n: &IBig) -> IBig {
    use dashu::base::BitTest;

    assert!(!dashu::base::Signed::is_negative(n), "isqrt of negative integer");
    if n.is_zero() {
        return IBig::ZERO;
    }

    let mut lo = IBig::ONE;
    let mut hi = IBig::ONE << (n.bit_len() / 2 + 1);
    while lo < hi {
        let mid = (&lo + &hi + IBig::ONE) >> 1usize;
        if &mid * &mid <= *n {
            lo = mid;
        } else {
            hi = mid - IBig::ONE;
        }
    }
    lo
}

/// Splits n into s²·m with m free of small square factors.
///
/// Square factors whose prime exceeds the trial bound survive in m; the
/// radicands this stack produces are far below that regime.
fn extract_square_part(mut n: u64) -> (u64, u64) {
    let mut s = 1u64;
    let mut f = 2u64;
    while f <= 1_000 && f * f <= n {
        let sq = f * f;
        while n % sq == 0 {
            n /= sq;
            s *= f;
        }
        f += 1;
    }
    // the remainder may itself be a perfect square
    let r = (n as f64).sqrt().round() as u64;
    for cand in r.saturating_sub(1)..=r.saturating_add(1) {
        if cand > 1 && cand.checked_mul(cand) == Some(n) {
            return (s * cand, 1);
        }
    }
    (s, n)
}

impl Surd {
    /// Creates a surd a + b·√d, normalizing to canonical form.
    #[must_use]
    pub fn new(a: Rational, b: Rational, d: u64) -> Self {
        if Ring::is_zero(&b) || d == 0 {
            return Self {
                a,
                b: Rational::from_integer(0),
                d: 0,
            };
        }

        let (s, m) = extract_square_part(d);
        if m <= 1 {
            // √d collapsed to the integer s
            return Self {
                a: a + b * Rational::from_integer(s as i64),
                b: Rational::from_integer(0),
                d: 0,
            };
        }

        Self {
            a,
            b: b * Rational::from_integer(s as i64),
            d: m,
        }
    }

    /// Creates a rational surd.
    #[must_use]
    pub fn from_rational(a: Rational) -> Self {
        Self {
            a,
            b: Rational::from_integer(0),
            d: 0,
        }
    }

    /// Creates the surd √n for a non-negative integer n.
    #[must_use]
    pub fn sqrt_int(n: u64) -> Self {
        Self::new(Rational::from_integer(0), Rational::from_integer(1), n)
    }

    /// The exact square root of a non-negative rational, if the radicand
    /// fits the canonical representation.
    ///
    /// √(p/q) = √(p·q)/q, so the integer radicand is p·q; `None` when it
    /// overflows u64 or when `r` is negative.
    #[must_use]
    pub fn sqrt_rational(r: &Rational) -> Option<Self> {
        if r.is_negative() {
            return None;
        }
        if Ring::is_zero(r) {
            return Some(Self::from_rational(Rational::from_integer(0)));
        }

        let p = r.numerator();
        let q = r.denominator();
        let radicand: u64 = (&p * &q).try_into().ok()?;
        let scale = Rational::new(IBig::ONE, q);
        Some(Self::new(
            Rational::from_integer(0),
            scale,
            radicand,
        ))
    }

    /// The rational part a.
    #[must_use]
    pub fn rational_part(&self) -> &Rational {
        &self.a
    }

    /// The coefficient b of √d.
    #[must_use]
    pub fn surd_part(&self) -> &Rational {
        &self.b
    }

    /// The squarefree radicand d (0 for rational values).
    #[must_use]
    pub fn radicand(&self) -> u64 {
        self.d
    }

    /// Returns true if the value is rational.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.d == 0
    }

    /// Returns the value as a rational if it is one.
    #[must_use]
    pub fn as_rational(&self) -> Option<&Rational> {
        if self.is_rational() {
            Some(&self.a)
        } else {
            None
        }
    }

    /// Returns true if `self` and `other` live in a common Q(√d), i.e.
    /// arithmetic between them is closed.
    #[must_use]
    pub fn compatible(&self, other: &Self) -> bool {
        self.d == 0 || other.d == 0 || self.d == other.d
    }

    fn merged_radicand(&self, other: &Self) -> u64 {
        assert!(
            self.compatible(other),
            "incompatible radical extensions: √{} and √{}",
            self.d,
            other.d
        );
        if self.d == 0 {
            other.d
        } else {
            self.d
        }
    }

    /// Returns the sign: -1, 0, or 1. Exact.
    #[must_use]
    pub fn signum(&self) -> i8 {
        let sa = self.a.signum();
        let sb = self.b.signum();
        if sb == 0 {
            return sa;
        }
        if sa == 0 {
            return sb;
        }
        if sa == sb {
            return sa;
        }

        // a and b√d have opposite signs; compare a² against b²·d
        let lhs = self.a.pow(2);
        let rhs = self.b.pow(2) * Rational::from_integer(self.d as i64);
        match lhs.cmp(&rhs) {
            Ordering::Greater => sa,
            Ordering::Less => sb,
            Ordering::Equal => 0,
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// Rational bounds lo ≤ self ≤ hi with √d enclosed to k binary digits.
    fn bounds(&self, k: u32) -> (Rational, Rational) {
        if self.d == 0 {
            return (self.a.clone(), self.a.clone());
        }

        // s/2^k ≤ √d < (s+1)/2^k with s = isqrt(d·4^k)
        let scaled = IBig::from(self.d) << (2 * k as usize);
        let s = isqrt(&scaled);
        let denom = IBig::ONE << (k as usize);
        let lo_root = Rational::new(s.clone(), denom.clone());
        let hi_root = Rational::new(s + IBig::ONE, denom);

        let (lo, hi) = if self.b.is_negative() {
            (&self.b * &hi_root, &self.b * &lo_root)
        } else {
            (&self.b * &lo_root, &self.b * &hi_root)
        };
        (&self.a + &lo, &self.a + &hi)
    }

    /// An exact rational strictly between two distinct surds.
    ///
    /// Works across incompatible radicands (where the midpoint would not
    /// be representable) by refining the enclosing intervals until they
    /// separate.
    ///
    /// # Panics
    ///
    /// Panics if `lo == hi`.
    #[must_use]
    pub fn rational_between(lo: &Self, hi: &Self) -> Rational {
        let (lo, hi) = match lo.cmp(hi) {
            Ordering::Less => (lo, hi),
            Ordering::Greater => (hi, lo),
            Ordering::Equal => panic!("rational_between requires distinct endpoints"),
        };

        let mut k = 8;
        loop {
            let (_, lo_hi) = lo.bounds(k);
            let (hi_lo, _) = hi.bounds(k);
            if lo_hi < hi_lo {
                return (&lo_hi + &hi_lo) * Rational::from_i64(1, 2);
            }
            k *= 2;
        }
    }

    /// The exact square root, when it exists in some Q(√d).
    ///
    /// For rational values this defers to [`Surd::sqrt_rational`]; for
    /// irrational a + b√d it attempts the classical denesting
    /// √(a + b√d) = p + q√d with rational p, q. `None` when the value is
    /// negative or the root leaves the quadratic tower.
    #[must_use]
    pub fn sqrt(&self) -> Option<Self> {
        if self.signum() < 0 {
            return None;
        }
        if let Some(r) = self.as_rational() {
            return Self::sqrt_rational(r);
        }

        // (p + q√d)² = p² + q²d + 2pq√d, so p² solves
        // t² − a·t + b²d/4 = 0, which needs the discriminant a² − b²d to
        // be a rational square.
        let disc = self.a.pow(2) - self.b.pow(2) * Rational::from_integer(self.d as i64);
        let sdisc = Self::sqrt_rational(&disc)?;
        let sdisc = sdisc.as_rational()?.clone();

        let half = Rational::from_i64(1, 2);
        for t in [
            (&self.a + &sdisc) * half.clone(),
            (&self.a - &sdisc) * half.clone(),
        ] {
            if t.is_negative() || Ring::is_zero(&t) {
                continue;
            }
            let Some(p) = Self::sqrt_rational(&t) else {
                continue;
            };
            let Some(p) = p.as_rational() else {
                continue;
            };
            if Ring::is_zero(p) {
                continue;
            }
            let q = &self.b / &(Rational::from_integer(2) * p.clone());
            let candidate = Self::new(p.clone(), q, self.d);
            if candidate.signum() >= 0 && candidate.clone() * candidate.clone() == *self {
                return Some(candidate);
            }
        }
        None
    }

    /// Returns the closest f64 approximation.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.a.to_f64() + self.b.to_f64() * (self.d as f64).sqrt()
    }
}

impl Ring for Surd {
    fn zero() -> Self {
        Self::from_rational(Rational::from_integer(0))
    }

    fn one() -> Self {
        Self::from_rational(Rational::from_integer(1))
    }

    fn is_zero(&self) -> bool {
        Ring::is_zero(&self.a) && Ring::is_zero(&self.b)
    }

    fn is_one(&self) -> bool {
        Ring::is_one(&self.a) && Ring::is_zero(&self.b)
    }
}

impl Field for Surd {
    fn inv(&self) -> Option<Self> {
        if Ring::is_zero(self) {
            return None;
        }

        // 1/(a + b√d) = (a − b√d)/(a² − b²d)
        let norm = self.a.pow(2) - self.b.pow(2) * Rational::from_integer(self.d as i64);
        let norm_inv = norm.recip();
        Some(Self {
            a: &self.a * &norm_inv,
            b: -&self.b * norm_inv,
            d: if Ring::is_zero(&self.b) { 0 } else { self.d },
        })
    }
}

impl Add for Surd {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let d = self.merged_radicand(&rhs);
        Self::new(self.a + rhs.a, self.b + rhs.b, d)
    }
}

impl Sub for Surd {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let d = self.merged_radicand(&rhs);
        Self::new(self.a - rhs.a, self.b - rhs.b, d)
    }
}

impl Mul for Surd {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let d = self.merged_radicand(&rhs);
        let rd = Rational::from_integer(d as i64);
        Self::new(
            &self.a * &rhs.a + &(&self.b * &rhs.b) * &rd,
            &self.a * &rhs.b + &self.b * &rhs.a,
            d,
        )
    }
}

impl Div for Surd {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self.field_div(&rhs)
    }
}

impl Neg for Surd {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            a: -self.a,
            b: -self.b,
            d: self.d,
        }
    }
}

impl PartialOrd for Surd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Surd {
    fn cmp(&self, other: &Self) -> Ordering {
        // canonical forms are unique, so distinct representations are
        // distinct reals
        if self == other {
            return Ordering::Equal;
        }

        if self.compatible(other) {
            let diff = self.clone() - other.clone();
            return match diff.signum() {
                s if s < 0 => Ordering::Less,
                0 => Ordering::Equal,
                _ => Ordering::Greater,
            };
        }

        // incommensurable radicands: refine enclosing intervals until
        // they separate (they must, the values differ)
        let mut k = 8;
        loop {
            let (self_lo, self_hi) = self.bounds(k);
            let (other_lo, other_hi) = other.bounds(k);
            if self_hi < other_lo {
                return Ordering::Less;
            }
            if other_hi < self_lo {
                return Ordering::Greater;
            }
            k *= 2;
        }
    }
}

impl From<Rational> for Surd {
    fn from(value: Rational) -> Self {
        Self::from_rational(value)
    }
}

impl From<i64> for Surd {
    fn from(value: i64) -> Self {
        Self::from_rational(Rational::from_integer(value))
    }
}

impl fmt::Display for Surd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if Ring::is_zero(&self.b) {
            return write!(f, "{}", self.a);
        }
        if Ring::is_zero(&self.a) {
            return write!(f, "{}·√{}", self.b, self.d);
        }
        write!(f, "{} + {}·√{}", self.a, self.b, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(&IBig::from(0)), IBig::from(0));
        assert_eq!(isqrt(&IBig::from(1)), IBig::from(1));
        assert_eq!(isqrt(&IBig::from(8)), IBig::from(2));
        assert_eq!(isqrt(&IBig::from(9)), IBig::from(3));
        assert_eq!(isqrt(&IBig::from(10_000_000_001u64)), IBig::from(100_000u64));
    }

    #[test]
    fn test_canonicalization() {
        // √8 = 2√2
        let s = Surd::sqrt_int(8);
        assert_eq!(s.radicand(), 2);
        assert_eq!(*s.surd_part(), q(2, 1));

        // √9 = 3
        let s = Surd::sqrt_int(9);
        assert!(s.is_rational());
        assert_eq!(*s.as_rational().unwrap(), q(3, 1));
    }

    #[test]
    fn test_sqrt_rational() {
        // √(3/4) = √3/2... radicand 3·4 = 12 = 4·3 → 2√3/4 = √3/2
        let s = Surd::sqrt_rational(&q(3, 4)).unwrap();
        assert_eq!(s.radicand(), 3);
        assert_eq!(*s.surd_part(), q(1, 2));
        assert!(Surd::sqrt_rational(&q(-1, 4)).is_none());
    }

    #[test]
    fn test_arithmetic() {
        let s3 = Surd::sqrt_int(3);
        // (1 + √3)(1 − √3) = 1 − 3 = −2
        let p = (Surd::one() + s3.clone()) * (Surd::one() - s3.clone());
        assert_eq!(p, Surd::from(-2));

        // √3·√3 = 3
        assert_eq!(s3.clone() * s3, Surd::from(3));
    }

    #[test]
    fn test_inverse() {
        let x = Surd::new(q(1, 4), q(-1, 6), 3);
        let inv = Field::inv(&x).unwrap();
        assert!(Ring::is_one(&(x * inv)));
    }

    #[test]
    fn test_signum() {
        // 2 − √3 > 0, 1 − √3 < 0
        assert_eq!(Surd::new(q(2, 1), q(-1, 1), 3).signum(), 1);
        assert_eq!(Surd::new(q(1, 1), q(-1, 1), 3).signum(), -1);
        assert_eq!(Surd::zero().signum(), 0);
    }

    #[test]
    fn test_ordering_incompatible_radicands() {
        // √2 < √3 even though no common Q(√d) holds both
        let s2 = Surd::sqrt_int(2);
        let s3 = Surd::sqrt_int(3);
        assert!(s2 < s3);

        // 1 + √2 > √3
        assert!(Surd::new(q(1, 1), q(1, 1), 2) > s3);
    }

    #[test]
    fn test_rational_between() {
        let s2 = Surd::sqrt_int(2);
        let s3 = Surd::sqrt_int(3);
        let r = Surd::rational_between(&s2, &s3);
        let r = Surd::from_rational(r);
        assert!(s2 < r && r < s3);
    }

    #[test]
    fn test_denested_sqrt() {
        // √(3 + 2√2) = 1 + √2
        let x = Surd::new(q(3, 1), q(2, 1), 2);
        let root = x.sqrt().unwrap();
        assert_eq!(root, Surd::new(q(1, 1), q(1, 1), 2));

        // √(1 + √2) does not denest
        assert!(Surd::new(q(1, 1), q(1, 1), 2).sqrt().is_none());
    }
}
