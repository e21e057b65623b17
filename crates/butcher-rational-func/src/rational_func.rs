//! Core rational function type.

use butcher_poly::algorithms::gcd::{make_monic, poly_div_rem, poly_gcd};
use butcher_poly::dense::DensePoly;
use butcher_rings::traits::Field;

/// A rational function P(x)/Q(x) over a field K.
///
/// # Invariants
///
/// - `denominator` is always monic (leading coefficient = 1)
/// - `numerator` and `denominator` are coprime (gcd = 1)
/// - Zero is represented as `0 / 1`
#[derive(Clone, Debug)]
pub struct RationalFunction<K: Field> {
    numerator: DensePoly<K>,
    denominator: DensePoly<K>,
}

impl<K: Field> RationalFunction<K> {
    /// Creates a new rational function from numerator and denominator,
    /// normalized to canonical form.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: DensePoly<K>, denominator: DensePoly<K>) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");

        let mut rf = Self {
            numerator,
            denominator,
        };
        rf.normalize();
        rf
    }

    /// Creates a rational function from a polynomial (denominator = 1).
    #[must_use]
    pub fn from_poly(p: DensePoly<K>) -> Self {
        Self {
            numerator: p,
            denominator: DensePoly::one(),
        }
    }

    /// Creates the zero rational function (0/1).
    #[must_use]
    pub fn zero() -> Self {
        Self {
            numerator: DensePoly::zero(),
            denominator: DensePoly::one(),
        }
    }

    /// Creates the constant rational function 1/1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            numerator: DensePoly::one(),
            denominator: DensePoly::one(),
        }
    }

    /// Creates a constant rational function c/1.
    #[must_use]
    pub fn constant(c: K) -> Self {
        Self {
            numerator: DensePoly::constant(c),
            denominator: DensePoly::one(),
        }
    }

    /// Returns the numerator polynomial.
    #[must_use]
    pub fn numerator(&self) -> &DensePoly<K> {
        &self.numerator
    }

    /// Returns the denominator polynomial.
    #[must_use]
    pub fn denominator(&self) -> &DensePoly<K> {
        &self.denominator
    }

    /// Returns true if this is the zero rational function.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns true if this is a polynomial (denominator = 1).
    #[must_use]
    pub fn is_polynomial(&self) -> bool {
        self.denominator.degree() == 0 && self.denominator.leading_coeff().is_one()
    }

    /// Normalizes to canonical form: divide out the GCD, then make the
    /// denominator monic.
    fn normalize(&mut self) {
        if self.numerator.is_zero() {
            self.denominator = DensePoly::one();
            return;
        }

        let g = poly_gcd(&self.numerator, &self.denominator);
        if g.degree() > 0 {
            let (num, _) = poly_div_rem(&self.numerator, &g);
            let (den, _) = poly_div_rem(&self.denominator, &g);
            self.numerator = num;
            self.denominator = den;
        }

        let lead = self.denominator.leading_coeff().clone();
        if !lead.is_one() {
            let lead_inv = lead.inv().expect("nonzero leading coefficient");
            self.numerator = self.numerator.scale(&lead_inv);
            self.denominator = make_monic(&self.denominator);
        }
    }

    /// Degree of the numerator minus degree of the denominator.
    #[must_use]
    pub fn degree_at_infinity(&self) -> i64 {
        self.numerator.degree() as i64 - self.denominator.degree() as i64
    }

    /// Evaluates the rational function at a point.
    ///
    /// Returns `None` if the point is a pole.
    #[must_use]
    pub fn eval(&self, x: &K) -> Option<K> {
        let den_val = self.denominator.eval(x);
        let den_inv = den_val.inv()?;
        Some(self.numerator.eval(x) * den_inv)
    }

    /// Computes the derivative via the quotient rule:
    /// (P/Q)' = (P'Q − PQ')/Q².
    #[must_use]
    pub fn derivative(&self) -> Self {
        let p = &self.numerator;
        let q = &self.denominator;

        let num = p.derivative().mul(q).sub(&p.mul(&q.derivative()));
        let den = q.mul(q);

        Self::new(num, den)
    }

    /// Substitutes a polynomial for the indeterminate: x ↦ q(y).
    ///
    /// # Panics
    ///
    /// Panics if the substituted denominator vanishes identically (only
    /// possible when `q` is a constant at a pole).
    #[must_use]
    pub fn substitute(&self, q: &DensePoly<K>) -> Self {
        Self::new(self.numerator.compose(q), self.denominator.compose(q))
    }

    /// Adds two rational functions.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let num = self
            .numerator
            .mul(&other.denominator)
            .add(&other.numerator.mul(&self.denominator));
        let den = self.denominator.mul(&other.denominator);
        Self::new(num, den)
    }

    /// Subtracts two rational functions.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two rational functions.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self::new(
            self.numerator.mul(&other.numerator),
            self.denominator.mul(&other.denominator),
        )
    }

    /// Raises to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        Self::new(self.numerator.pow(n), self.denominator.pow(n))
    }

    /// Negates the rational function.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            numerator: self.numerator.neg(),
            denominator: self.denominator.clone(),
        }
    }
}

impl<K: Field> PartialEq for RationalFunction<K> {
    fn eq(&self, other: &Self) -> bool {
        // both sides are canonical, compare directly
        self.numerator == other.numerator && self.denominator == other.denominator
    }
}

impl<K: Field> Eq for RationalFunction<K> {}

impl<K: Field + std::fmt::Display> std::fmt::Display for RationalFunction<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_polynomial() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "({}) / ({})", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use butcher_rings::traits::Ring;
    use butcher_rings::Rational;

    fn q(n: i64) -> Rational {
        Rational::from_integer(n)
    }

    fn poly(coeffs: &[i64]) -> DensePoly<Rational> {
        DensePoly::new(coeffs.iter().map(|&n| q(n)).collect())
    }

    #[test]
    fn test_normalization_common_factor() {
        // (x² − 1)/(x − 1) = x + 1
        let rf = RationalFunction::new(poly(&[-1, 0, 1]), poly(&[-1, 1]));
        assert!(rf.is_polynomial());
        assert_eq!(*rf.numerator(), poly(&[1, 1]));
    }

    #[test]
    fn test_monic_denominator() {
        // 1/(2x + 2) = (1/2)/(x + 1)
        let rf = RationalFunction::new(poly(&[1]), poly(&[2, 2]));
        assert!(rf.denominator().leading_coeff().is_one());
        assert_eq!(rf.eval(&q(0)), Some(Rational::from_i64(1, 2)));
    }

    #[test]
    fn test_eval_at_pole() {
        let rf = RationalFunction::new(poly(&[1]), poly(&[-1, 1]));
        assert_eq!(rf.eval(&q(1)), None);
        assert_eq!(rf.eval(&q(2)), Some(q(1)));
    }

    #[test]
    fn test_derivative() {
        // d/dx (1/x) = −1/x²
        let rf = RationalFunction::new(poly(&[1]), poly(&[0, 1]));
        let d = rf.derivative();
        assert_eq!(*d.numerator(), poly(&[-1]));
        assert_eq!(*d.denominator(), poly(&[0, 0, 1]));
    }

    #[test]
    fn test_arithmetic() {
        // 1/x + x = (x² + 1)/x
        let a = RationalFunction::new(poly(&[1]), poly(&[0, 1]));
        let b = RationalFunction::from_poly(poly(&[0, 1]));
        let sum = a.add(&b);
        assert_eq!(*sum.numerator(), poly(&[1, 0, 1]));
        assert_eq!(*sum.denominator(), poly(&[0, 1]));

        // (1/x)² − 1 = (1 − x²)/x²
        let sq = a.pow(2).sub(&RationalFunction::one());
        assert_eq!(*sq.numerator(), poly(&[1, 0, -1]));
    }

    #[test]
    fn test_substitute() {
        // f(x) = 1/(1 − x); f(2y) = (−1/2)/(y − 1/2)
        let rf = RationalFunction::new(poly(&[1]), poly(&[1, -1]));
        let sub = rf.substitute(&poly(&[0, 2]));
        assert_eq!(sub.eval(&q(0)), Some(q(1)));
        assert_eq!(sub.eval(&q(1)), Some(q(-1)));
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn test_zero_denominator_panics() {
        let _ = RationalFunction::new(poly(&[1]), DensePoly::zero());
    }
}
