//! The classification engine.
//!
//! [`RkFormula`] wraps one immutable [`Tableau`] and derives its
//! analytic properties on demand: stability function, poles, A/L/
//! algebraic stability, symmetry, symplecticity, order. Every derived
//! property is memoized in a per-session cache keyed by name; failed
//! derivations are returned as errors and *not* cached, so independent
//! properties stay available and a failed one can be re-asked.
//!
//! See Hairer-Wanner vol. II for the stability theory (A-stability page
//! 43, stiff accuracy page 45, R(∞) pages 45 and 375).

use std::cell::RefCell;
use std::fmt;

use butcher_linalg::DenseMatrix;
use butcher_poly::DensePoly;
use butcher_rational_func::RationalFunction;
use butcher_rings::traits::Ring;
use butcher_rings::{Complex, Rational, Surd};
use rustc_hash::FxHashMap;

use crate::error::{Result, RkError};
use crate::order::OrderConditions;
use crate::split::{checked_roots, conj_poly, imag_part, real_part};
use crate::stability;
use crate::tableau::Tableau;

/// A three-valued answer for properties where the available criterion is
/// sufficient but not necessary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ternary {
    /// The criterion holds, the property is established.
    True,
    /// The property is refuted.
    False,
    /// The criterion is inconclusive.
    Undetermined,
}

/// The stability limit on the negative real axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StabilityLimit {
    /// Stable on the whole negative real axis.
    MinusInfinity,
    /// The largest (least negative) real z with |R(z)| = 1.
    Finite(Surd),
}

/// A derived property as stored in the session cache.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A yes/no property.
    Bool(bool),
    /// A three-valued property.
    Ternary(Ternary),
    /// An order (of the method, or of the stability function).
    Order(usize),
    /// An exact scalar.
    Scalar(Complex),
    /// A stability limit.
    Limit(StabilityLimit),
    /// Roots with multiplicities.
    Roots(Vec<(Complex, u32)>),
    /// Whether all pole real parts are ≥ 0, and how many poles are
    /// purely imaginary.
    PoleSigns {
        /// Every pole has real part ≥ 0.
        all_nonnegative: bool,
        /// Number of poles with real part exactly 0.
        purely_imaginary: usize,
    },
    /// A rational function of one variable.
    Function(RationalFunction<Complex>),
    /// An s×s matrix.
    Matrix(DenseMatrix<Complex>),
}

impl PropertyValue {
    fn expect_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            _ => unreachable!("property cached with a different shape"),
        }
    }

    fn expect_function(&self) -> RationalFunction<Complex> {
        match self {
            Self::Function(f) => f.clone(),
            _ => unreachable!("property cached with a different shape"),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Ternary(Ternary::True) => write!(f, "true"),
            Self::Ternary(Ternary::False) => write!(f, "false"),
            Self::Ternary(Ternary::Undetermined) => write!(f, "undetermined"),
            Self::Order(n) => write!(f, "{n}"),
            Self::Scalar(x) => write!(f, "{x}"),
            Self::Limit(StabilityLimit::MinusInfinity) => write!(f, "-infinity"),
            Self::Limit(StabilityLimit::Finite(x)) => write!(f, "{x}"),
            Self::Roots(roots) => {
                let items: Vec<String> = roots
                    .iter()
                    .map(|(root, m)| format!("{root} (×{m})"))
                    .collect();
                write!(f, "[{}]", items.join(", "))
            }
            Self::PoleSigns {
                all_nonnegative,
                purely_imaginary,
            } => write!(
                f,
                "all real parts ≥ 0: {all_nonnegative}, purely imaginary: {purely_imaginary}"
            ),
            Self::Function(rf) => write!(f, "{rf}"),
            Self::Matrix(m) => write!(f, "{}×{} matrix", m.num_rows(), m.num_cols()),
        }
    }
}

/// One analysis session over one immutable tableau.
pub struct RkFormula {
    tableau: Tableau,
    cache: RefCell<FxHashMap<&'static str, PropertyValue>>,
    order_engine: RefCell<OrderConditions>,
}

impl RkFormula {
    /// Wraps a tableau for analysis.
    #[must_use]
    pub fn new(tableau: Tableau) -> Self {
        Self {
            tableau,
            cache: RefCell::new(FxHashMap::default()),
            order_engine: RefCell::new(OrderConditions::new()),
        }
    }

    /// The wrapped tableau.
    #[must_use]
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// The number of stages.
    #[must_use]
    pub fn n_stages(&self) -> usize {
        self.tableau.stages()
    }

    /// Read-through memoization for infallible derivations.
    fn cached(&self, key: &'static str, derive: impl FnOnce() -> PropertyValue) -> PropertyValue {
        if let Some(v) = self.cache.borrow().get(key) {
            return v.clone();
        }
        let v = derive();
        self.cache.borrow_mut().insert(key, v.clone());
        v
    }

    /// Read-through memoization for fallible derivations. Errors are
    /// propagated and never cached.
    fn try_cached(
        &self,
        key: &'static str,
        derive: impl FnOnce() -> Result<PropertyValue>,
    ) -> Result<PropertyValue> {
        if let Some(v) = self.cache.borrow().get(key) {
            return Ok(v.clone());
        }
        let v = derive()?;
        self.cache.borrow_mut().insert(key, v.clone());
        Ok(v)
    }

    /// The stability function R(z) = det(N)/det(D).
    #[must_use]
    pub fn stability_function(&self) -> RationalFunction<Complex> {
        self.cached("stability_function", || {
            PropertyValue::Function(stability::stability_function(&self.tableau))
        })
        .expect_function()
    }

    /// Whether the matrix A of the Butcher tableau is invertible.
    #[must_use]
    pub fn a_is_invertible(&self) -> bool {
        self.cached("a_is_invertible", || {
            PropertyValue::Bool(self.tableau.a().inverse().is_some())
        })
        .expect_bool()
    }

    /// An explicit method has a polynomial stability function.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        self.cached("is_explicit", || {
            PropertyValue::Bool(self.stability_function().denominator().degree() == 0)
        })
        .expect_bool()
    }

    /// The poles of the stability function, with multiplicities.
    ///
    /// # Errors
    ///
    /// [`RkError::IncompleteRoots`] when the denominator has roots the
    /// working field cannot express.
    pub fn poles_of_stability_function(&self) -> Result<Vec<(Complex, u32)>> {
        let v = self.try_cached("poles_of_stability_function", || {
            if self.is_explicit() {
                return Ok(PropertyValue::Roots(Vec::new()));
            }
            let den = self.stability_function().denominator().clone();
            Ok(PropertyValue::Roots(checked_roots(&den)?))
        })?;
        match v {
            PropertyValue::Roots(roots) => Ok(roots),
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// Whether every pole has real part ≥ 0, together with the number of
    /// purely imaginary poles (real part exactly 0).
    ///
    /// # Errors
    ///
    /// Propagates pole computation failures.
    pub fn real_part_of_poles_all_nonnegative(&self) -> Result<(bool, usize)> {
        let v = self.try_cached("real_part_of_poles_all_nonnegative", || {
            let poles = self.poles_of_stability_function()?;
            let all_nonnegative = poles.iter().all(|(pole, _)| pole.re().signum() >= 0);
            let purely_imaginary = poles
                .iter()
                .filter(|(pole, _)| pole.re().signum() == 0)
                .count();
            Ok(PropertyValue::PoleSigns {
                all_nonnegative,
                purely_imaginary,
            })
        })?;
        match v {
            PropertyValue::PoleSigns {
                all_nonnegative,
                purely_imaginary,
            } => Ok((all_nonnegative, purely_imaginary)),
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// The largest p such that the derivatives of R at 0 agree with
    /// those of exp through order p (classical Taylor matching).
    #[must_use]
    pub fn order_of_stability_function(&self) -> usize {
        let v = self.cached("order_of_stability_function", || {
            let mut r = self.stability_function();
            let mut matching = 0usize;
            while r.eval(&Complex::zero()) == Some(Complex::one()) {
                matching += 1;
                r = r.derivative();
            }
            PropertyValue::Order(matching.saturating_sub(1))
        });
        match v {
            PropertyValue::Order(n) => n,
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// The trace of R on the imaginary axis: R(i·x) as a rational
    /// function of the real coordinate x.
    #[must_use]
    pub fn stability_function_on_im_axis(&self) -> RationalFunction<Complex> {
        self.cached("stability_function_on_im_axis", || {
            let substitution = DensePoly::monomial(Complex::i(), 1);
            PropertyValue::Function(self.stability_function().substitute(&substitution))
        })
        .expect_function()
    }

    /// |R(i·x)|² as an exact real rational function of x, computed by
    /// splitting N·conj(D) into real and imaginary parts.
    #[must_use]
    pub fn squared_modulus_on_im_axis(&self) -> RationalFunction<Complex> {
        self.cached("squared_modulus_on_im_axis", || {
            let trace = self.stability_function_on_im_axis();
            let num = trace.numerator();
            let den = trace.denominator();

            let cross = num.mul(&conj_poly(den));
            let re = real_part(&cross);
            let im = imag_part(&cross);
            let modulus_num = re.mul(&re).add(&im.mul(&im));
            let modulus_den = den.mul(&conj_poly(den)).pow(2);
            PropertyValue::Function(RationalFunction::new(modulus_num, modulus_den))
        })
        .expect_function()
    }

    /// Whether |R| is constant along the imaginary axis (derivative of
    /// the squared modulus is identically zero).
    #[must_use]
    pub fn is_modulus_constant_on_im_axis(&self) -> bool {
        self.cached("is_modulus_constant_on_im_axis", || {
            let m2 = self.squared_modulus_on_im_axis();
            PropertyValue::Bool(m2.derivative().is_zero())
        })
        .expect_bool()
    }

    /// Whether |R(i·x)| ≤ 1 for all real x, with equality only on a
    /// finite root set.
    ///
    /// This is the sign-sampling decision: the real non-negative roots
    /// of numerator − denominator of |R(i·x)|² partition the half-axis,
    /// and one exact probe per interval settles the inequality on the
    /// whole continuum. The probes are midpoints between consecutive
    /// roots (an exact rational separator when two roots live in
    /// incommensurable extensions) plus 3/2 times the largest root.
    ///
    /// # Errors
    ///
    /// [`RkError::IncompleteRoots`] when the root set cannot be fully
    /// expressed — approximate roots would invalidate the conclusion, so
    /// none are used.
    pub fn is_modulus_less_than_one(&self) -> Result<bool> {
        Ok(self
            .try_cached("is_modulus_less_than_one", || {
                if self.is_modulus_constant_on_im_axis() {
                    return Ok(PropertyValue::Bool(true));
                }

                let m2 = self.squared_modulus_on_im_axis();
                let defect = m2.numerator().sub(m2.denominator());
                let roots = checked_roots(&defect)?;

                let mut nonnegative: Vec<Surd> = roots
                    .iter()
                    .filter(|(root, _)| root.is_real() && root.re().signum() >= 0)
                    .map(|(root, _)| root.re().clone())
                    .collect();
                nonnegative.sort();
                nonnegative.dedup();

                if nonnegative.len() <= 1 {
                    // modulus reaches 1 only at x = 0: probe at x = 1
                    return Ok(PropertyValue::Bool(
                        modulus_defect_sign(&m2, &Surd::one()) < 0,
                    ));
                }

                let mut probes = Vec::with_capacity(nonnegative.len());
                for pair in nonnegative.windows(2) {
                    probes.push(probe_between(&pair[0], &pair[1]));
                }
                let largest = nonnegative.last().expect("at least two roots");
                probes
                    .push(largest.clone() * Surd::from_rational(Rational::from_i64(3, 2)));

                Ok(PropertyValue::Bool(
                    probes
                        .iter()
                        .all(|probe| modulus_defect_sign(&m2, probe) < 0),
                ))
            })?
            .expect_bool())
    }

    /// A-stability: |R| bounded by 1 on the imaginary axis and no pole
    /// in the open left half plane. See Hairer-Wanner II, page 43.
    ///
    /// # Errors
    ///
    /// Propagates root-completeness failures from the modulus and pole
    /// analyses.
    pub fn is_a_stable(&self) -> Result<bool> {
        Ok(self
            .try_cached("is_a_stable", || {
                let modulus_ok = self.is_modulus_constant_on_im_axis()
                    || self.is_modulus_less_than_one()?;
                let poles_ok = self.real_part_of_poles_all_nonnegative()?.0;
                Ok(PropertyValue::Bool(modulus_ok && poles_ok))
            })?
            .expect_bool())
    }

    /// Stiff accuracy: A-stable, and the last row of A equals B or the
    /// first column of A is constantly B₀. Proposition 3.8 in
    /// Hairer-Wanner II, page 45.
    ///
    /// # Errors
    ///
    /// Propagates A-stability failures.
    pub fn is_stiffly_accurate(&self) -> Result<bool> {
        Ok(self
            .try_cached("is_stiffly_accurate", || {
                let s = self.tableau.stages();
                let a = self.tableau.a();
                let b = self.tableau.b();

                let last_row = (0..s).all(|j| a[(s - 1, j)] == b[j]);
                let first_col = (0..s).all(|i| a[(i, 0)] == b[0]);
                Ok(PropertyValue::Bool(
                    self.is_a_stable()? && (last_row || first_col),
                ))
            })?
            .expect_bool())
    }

    /// R(∞) = 1 − B·A⁻¹·𝟙. See Hairer-Wanner II, pages 45 and 375.
    ///
    /// # Errors
    ///
    /// [`RkError::SingularMatrix`] when A is not invertible.
    pub fn r_at_infinity(&self) -> Result<Complex> {
        let v = self.try_cached("r_at_infinity", || {
            let Some(a_inv) = self.tableau.a().inverse() else {
                return Err(RkError::SingularMatrix { name: "A" });
            };
            let ones = vec![Complex::one(); self.tableau.stages()];
            let image = a_inv.mv(&ones);
            let dot = self
                .tableau
                .b()
                .iter()
                .zip(image.iter())
                .fold(Complex::zero(), |acc, (bi, vi)| {
                    acc + bi.clone() * vi.clone()
                });
            Ok(PropertyValue::Scalar(Complex::one() - dot))
        })?;
        match v {
            PropertyValue::Scalar(x) => Ok(x),
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// L-stability: A-stable and R(z) → 0 as z → ∞.
    ///
    /// # Errors
    ///
    /// Propagates A-stability and R(∞) failures.
    pub fn is_l_stable(&self) -> Result<bool> {
        Ok(self
            .try_cached("is_l_stable", || {
                if !self.is_a_stable()? {
                    return Ok(PropertyValue::Bool(false));
                }
                let r = self.stability_function();
                if r.denominator().degree() > r.numerator().degree() {
                    return Ok(PropertyValue::Bool(true));
                }
                Ok(PropertyValue::Bool(self.r_at_infinity()?.is_zero()))
            })?
            .expect_bool())
    }

    /// The algebraic-stability matrix M with
    /// M[i][j] = BᵢAᵢⱼ + BⱼAⱼᵢ − BᵢBⱼ.
    #[must_use]
    pub fn m_matrix(&self) -> DenseMatrix<Complex> {
        let v = self.cached("m_matrix", || {
            let s = self.tableau.stages();
            let a = self.tableau.a();
            let b = self.tableau.b();

            let mut m = DenseMatrix::zeros(s, s);
            for i in 0..s {
                for j in 0..s {
                    m[(i, j)] = b[i].clone() * a[(i, j)].clone()
                        + b[j].clone() * a[(j, i)].clone()
                        - b[i].clone() * b[j].clone();
                }
            }
            PropertyValue::Matrix(m)
        });
        match v {
            PropertyValue::Matrix(m) => m,
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// Algebraic stability: B ≥ 0 and M positive in every entry, for an
    /// implicit method.
    #[must_use]
    pub fn is_algebraically_stable(&self) -> bool {
        self.cached("is_algebraically_stable", || {
            if self.is_explicit()
                || self
                    .tableau
                    .b()
                    .iter()
                    .any(|bi| !bi.is_real() || bi.re().signum() < 0)
            {
                return PropertyValue::Bool(false);
            }

            let m = self.m_matrix();
            PropertyValue::Bool(
                m.entries()
                    .iter()
                    .all(|entry| entry.is_real() && entry.re().signum() >= 0),
            )
        })
        .expect_bool()
    }

    /// Whether the method conserves quadratic invariants: implicit with
    /// an identically zero M matrix.
    #[must_use]
    pub fn conserves_quadratic_invariants(&self) -> bool {
        self.cached("conserves_quadratic_invariants", || {
            PropertyValue::Bool(!self.is_explicit() && self.m_matrix().is_zero())
        })
        .expect_bool()
    }

    /// Symmetry: with P the anti-diagonal permutation, every row of
    /// PA + AP equals B and PB = B.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.cached("is_symmetric", || {
            let s = self.tableau.stages();
            let a = self.tableau.a();
            let b = self.tableau.b();

            let mut p: DenseMatrix<Complex> = DenseMatrix::zeros(s, s);
            for i in 0..s {
                p[(i, s - 1 - i)] = Complex::one();
            }

            let pa_ap = &p.mm(a) + &a.mm(&p);
            let rows_match = (0..s).all(|i| (0..s).all(|j| pa_ap[(i, j)] == b[j]));
            let pb_matches = p.mv(b) == b;
            PropertyValue::Bool(rows_match && pb_matches)
        })
        .expect_bool()
    }

    /// Symplecticity test. A zero M matrix is sufficient but not known
    /// to be necessary, hence the three-valued answer.
    #[must_use]
    pub fn is_symplectic(&self) -> Ternary {
        let v = self.cached("is_symplectic", || {
            let verdict = if self.is_explicit() {
                Ternary::False
            } else if self.m_matrix().is_zero() {
                Ternary::True
            } else {
                Ternary::Undetermined
            };
            PropertyValue::Ternary(verdict)
        });
        match v {
            PropertyValue::Ternary(t) => t,
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// For a method that is not A-stable, the largest (least negative)
    /// real negative z with |R(z)| = 1; −∞ when A-stable or when no such
    /// point exists.
    ///
    /// # Errors
    ///
    /// Propagates A-stability and root-completeness failures.
    pub fn stability_on_real_negative_axis(&self) -> Result<StabilityLimit> {
        let v = self.try_cached("stability_on_real_negative_axis", || {
            if self.is_a_stable()? {
                return Ok(PropertyValue::Limit(StabilityLimit::MinusInfinity));
            }

            let crossing = self
                .stability_function()
                .pow(2)
                .sub(&RationalFunction::one());
            let roots = checked_roots(crossing.numerator())?;

            let mut negatives: Vec<Surd> = roots
                .iter()
                .filter(|(root, _)| root.is_real() && root.re().signum() < 0)
                .map(|(root, _)| root.re().clone())
                .collect();
            negatives.sort();

            Ok(PropertyValue::Limit(match negatives.last() {
                Some(limit) => StabilityLimit::Finite(limit.clone()),
                None => StabilityLimit::MinusInfinity,
            }))
        })?;
        match v {
            PropertyValue::Limit(limit) => Ok(limit),
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// The method's order, established through the rooted-tree
    /// conditions.
    #[must_use]
    pub fn order(&self) -> usize {
        let v = self.cached("order", || {
            let order = self
                .order_engine
                .borrow_mut()
                .order(self.tableau.a(), self.tableau.b());
            PropertyValue::Order(order)
        });
        match v {
            PropertyValue::Order(n) => n,
            _ => unreachable!("property cached with a different shape"),
        }
    }

    /// Checks the order conditions for trees of exactly `k` nodes. Not
    /// cached: the underlying tree table carries the reusable state.
    ///
    /// # Errors
    ///
    /// [`RkError::InvalidTreeSize`] for k = 0.
    pub fn check_order(&self, k: usize) -> Result<bool> {
        self.order_engine
            .borrow_mut()
            .check_order(self.tableau.a(), self.tableau.b(), k)
    }

    /// The diagnostic witness for a failing order k, if any.
    ///
    /// # Errors
    ///
    /// [`RkError::InvalidTreeSize`] for k = 0.
    pub fn first_failing_tree(
        &self,
        k: usize,
    ) -> Result<Option<(crate::trees::RootedTree, Complex)>> {
        self.order_engine
            .borrow_mut()
            .first_failing_tree(self.tableau.a(), self.tableau.b(), k)
    }

    /// A snapshot of every property derived so far, sorted by name.
    #[must_use]
    pub fn known_properties(&self) -> Vec<(&'static str, PropertyValue)> {
        let mut entries: Vec<_> = self
            .cache
            .borrow()
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }

    /// Clears the property cache. Every subsequent accessor re-derives.
    pub fn forget_properties(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Forces derivation of the full property set in a fixed order,
    /// stopping at the first failure. Properties cached before the
    /// failure stay cached.
    ///
    /// # Errors
    ///
    /// The first derivation failure, if any.
    pub fn compute_all_properties(&self) -> Result<()> {
        self.a_is_invertible();
        self.is_explicit();
        self.stability_function();
        self.poles_of_stability_function()?;
        self.real_part_of_poles_all_nonnegative()?;
        self.order_of_stability_function();
        self.stability_function_on_im_axis();
        self.squared_modulus_on_im_axis();
        self.is_modulus_constant_on_im_axis();
        self.is_modulus_less_than_one()?;
        self.is_a_stable()?;
        self.is_stiffly_accurate()?;
        self.is_l_stable()?;
        self.is_algebraically_stable();
        self.is_symmetric();
        self.is_symplectic();
        self.conserves_quadratic_invariants();
        self.stability_on_real_negative_axis()?;
        self.order();
        Ok(())
    }
}

/// An exact point strictly between two distinct non-negative reals: the
/// midpoint when both live in a common Q(√d), otherwise a rational
/// separator.
fn probe_between(lo: &Surd, hi: &Surd) -> Surd {
    if lo.compatible(hi) {
        (lo.clone() + hi.clone()) * Surd::from_rational(Rational::from_i64(1, 2))
    } else {
        Surd::from_rational(Surd::rational_between(lo, hi))
    }
}

/// The exact sign of |m2(x)| − 1 at a real probe; a pole counts as +1.
fn modulus_defect_sign(m2: &RationalFunction<Complex>, x: &Surd) -> i8 {
    match m2.eval(&Complex::from_surd(x.clone())) {
        None => 1,
        Some(value) => {
            let re = value.re().clone();
            let magnitude = if re.signum() < 0 { -re } else { re };
            (magnitude - Surd::one()).signum()
        }
    }
}
