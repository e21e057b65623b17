//! # butcher-poly
//!
//! Dense univariate polynomial arithmetic over the exact scalar tower.
//!
//! This crate provides:
//! - `DensePoly<R>` with evaluation, derivative, integral, composition
//! - Division, GCD and Yun squarefree decomposition over a field
//! - An exact root finder that reports completeness instead of
//!   approximating: roots outside Q(√d, i) are counted, not invented

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
pub mod dense;
pub mod roots;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
pub use roots::{all_roots, RootReport};
