//! # butcher-rational-func
//!
//! Rational functions P(x)/Q(x) over an exact field, kept in canonical
//! form: coprime numerator and denominator, monic denominator, zero
//! represented as 0/1. The stability function of a Runge-Kutta method
//! and every function derived from it (imaginary-axis trace, squared
//! modulus) is one of these.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod rational_func;

pub use rational_func::RationalFunction;
