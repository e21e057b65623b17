//! # butcher-formula
//!
//! Exact analysis of Runge-Kutta methods from their Butcher tableaux.
//!
//! Two engines do the real work:
//!
//! - the **rooted-tree order engine** ([`order`], [`trees`]): enumerates
//!   unordered rooted trees, evaluates the classical Butcher order
//!   conditions against (A, B), and probes for the method's order;
//! - the **stability classification engine** ([`formula`],
//!   [`stability`], [`split`]): derives R(z) = det(N)/det(D) in the
//!   polynomial ring, traces it along the imaginary axis, and decides
//!   A-/L-/algebraic stability, symmetry and symplecticity by exact
//!   root enumeration and sign analysis.
//!
//! Everything is computed over the exact field Q(√d, i); every yes/no
//! answer is definitive, and questions the field cannot settle surface
//! as explicit errors instead of approximations.
//!
//! ```
//! use butcher_formula::{methods, RkFormula};
//!
//! let f = RkFormula::new(methods::radau2a());
//! assert_eq!(f.order(), 3);
//! assert!(f.is_l_stable().unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod colloc;
pub mod error;
pub mod formula;
pub mod methods;
pub mod order;
pub mod plot;
pub mod split;
pub mod stability;
pub mod tableau;
pub mod trees;

#[cfg(test)]
mod proptests;

pub use colloc::colloc;
pub use error::{Result, RkError};
pub use formula::{PropertyValue, RkFormula, StabilityLimit, Ternary};
pub use order::OrderConditions;
pub use tableau::Tableau;
pub use trees::{RootedTree, TreeTable};
