//! The error taxonomy of the analysis engine.
//!
//! Every variant is either an input error or a genuine mathematical
//! limit of the working field; none is transient, so there is no retry
//! machinery anywhere. A derivation that fails is simply not cached and
//! can be re-asked.

use butcher_poly::DensePoly;
use butcher_rings::Complex;
use thiserror::Error;

/// Errors raised by tableau construction and property derivations.
#[derive(Debug, Clone, Error)]
pub enum RkError {
    /// A, B (and C if present) disagree on the stage count.
    #[error(
        "Butcher tableau dimensions are inconsistent: A is {rows}×{cols}, B has length {b_len}, C has length {c_len}"
    )]
    Dimensions {
        /// Rows of A.
        rows: usize,
        /// Columns of A.
        cols: usize,
        /// Length of B.
        b_len: usize,
        /// Length of C (0 when absent).
        c_len: usize,
    },

    /// A root query could not account for the polynomial's full degree
    /// in the working field. Carries the offending polynomial and the
    /// number of roots that were found; the shortfall is the difference.
    #[error("only {found} of {degree} roots (with multiplicity) of {poly} lie in the working field")]
    IncompleteRoots {
        /// The polynomial whose roots were requested.
        poly: Box<DensePoly<Complex>>,
        /// Its degree.
        degree: usize,
        /// Multiplicity-weighted number of roots found.
        found: usize,
    },

    /// An operation required an invertible matrix.
    #[error("matrix {name} is singular for this method")]
    SingularMatrix {
        /// Which matrix was singular.
        name: &'static str,
    },

    /// Rooted trees have at least one node.
    #[error("rooted trees have at least one node; size {size} is invalid")]
    InvalidTreeSize {
        /// The requested size.
        size: usize,
    },

    /// A collocation point fell outside the unit interval.
    #[error("collocation point {point} lies outside [0, 1]")]
    CollocationPointOutOfRange {
        /// Display form of the offending point.
        point: String,
    },

    /// The plot window cannot be bounded from the method's properties.
    #[error("cannot bound the plot window: the method has no poles and no finite stability limit")]
    UnboundedPlotWindow,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RkError>;
