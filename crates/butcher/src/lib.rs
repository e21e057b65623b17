//! # Butcher
//!
//! Exact algebraic analysis of Runge-Kutta methods.
//!
//! Given a Butcher tableau over an exact field, this stack derives the
//! properties that decide a method's fitness for stiff or conservative
//! problems: consistency order via the rooted-tree conditions, the
//! rational stability function, A-/L-/algebraic stability, symmetry and
//! symplecticity — all with exact arithmetic, never floating point, so
//! every answer is a theorem about the method rather than an estimate.
//!
//! ## Quick Start
//!
//! ```
//! use butcher::prelude::*;
//!
//! let gauss = methods::gauss4();
//! let f = RkFormula::new(gauss);
//! assert_eq!(f.order(), 4);
//! assert!(f.is_a_stable().unwrap());
//! assert!(!f.is_l_stable().unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use butcher_formula as formula;
pub use butcher_linalg as linalg;
pub use butcher_poly as poly;
pub use butcher_rational_func as rational_func;
pub use butcher_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use butcher_formula::methods;
    pub use butcher_formula::{
        colloc, PropertyValue, Result, RkError, RkFormula, RootedTree, StabilityLimit, Tableau,
        Ternary, TreeTable,
    };
    pub use butcher_linalg::DenseMatrix;
    pub use butcher_poly::DensePoly;
    pub use butcher_rational_func::RationalFunction;
    pub use butcher_rings::{Complex, Field, Rational, Ring, Surd};
}
