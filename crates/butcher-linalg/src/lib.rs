//! # butcher-linalg
//!
//! Dense matrices over the exact scalar tower.
//!
//! The stage counts of practical Runge-Kutta methods are single digits,
//! so everything here favors exactness and generality over asymptotics:
//! the determinant is a cofactor expansion valid over any commutative
//! ring (including polynomial rings, which is how det(I − zA) is
//! computed), and inversion is Gauss-Jordan over a field.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dense_matrix;

pub use dense_matrix::DenseMatrix;
