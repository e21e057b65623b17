//! The plotting interface.
//!
//! Everything decision-grade in this crate is exact; plotting is the one
//! consumer that wants cheap f64 samples instead. These accessors
//! convert the exact stability function once and hand back closures a
//! plotting collaborator can sample over a grid, plus a window estimate
//! derived from the poles and the real-axis stability limit.

use butcher_rational_func::RationalFunction;
use butcher_rings::Complex;

use crate::error::{Result, RkError};
use crate::formula::{RkFormula, StabilityLimit};

/// A rectangular window in the complex plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotWindow {
    /// Horizontal (real-axis) extent.
    pub x_range: (f64, f64),
    /// Vertical (imaginary-axis) extent.
    pub y_range: (f64, f64),
}

fn f64_coeffs(p: &butcher_poly::DensePoly<Complex>) -> Vec<(f64, f64)> {
    p.coeffs().iter().map(Complex::to_f64_parts).collect()
}

/// Complex Horner evaluation of an f64 coefficient vector at x + iy.
fn horner(coeffs: &[(f64, f64)], x: f64, y: f64) -> (f64, f64) {
    let mut re = 0.0;
    let mut im = 0.0;
    for &(cr, ci) in coeffs.iter().rev() {
        let next_re = re * x - im * y + cr;
        let next_im = re * y + im * x + ci;
        re = next_re;
        im = next_im;
    }
    (re, im)
}

fn modulus_fn(r: &RationalFunction<Complex>) -> impl Fn(f64, f64) -> f64 {
    let num = f64_coeffs(r.numerator());
    let den = f64_coeffs(r.denominator());
    move |x, y| {
        let n = horner(&num, x, y);
        let d = horner(&den, x, y);
        ((n.0 * n.0 + n.1 * n.1) / (d.0 * d.0 + d.1 * d.1)).sqrt()
    }
}

/// |R(x + iy)| as a sampling closure for stability-region plots.
#[must_use]
pub fn stability_modulus(formula: &RkFormula) -> impl Fn(f64, f64) -> f64 {
    modulus_fn(&formula.stability_function())
}

/// |R(x + iy)/e^(x+iy)| as a sampling closure for order-star plots.
#[must_use]
pub fn order_star(formula: &RkFormula) -> impl Fn(f64, f64) -> f64 {
    let modulus = modulus_fn(&formula.stability_function());
    move |x, y| modulus(x, y) / x.exp()
}

/// Estimates a window around the origin that shows the interesting part
/// of the stability region: sized by the pole farthest from the axes and
/// by the real-axis stability limit, then inflated by `enlarge`.
///
/// # Errors
///
/// Propagates pole/limit derivation failures, and returns
/// [`RkError::UnboundedPlotWindow`] when neither poles nor a finite
/// limit bound the region (the caller must then supply explicit limits).
pub fn window(formula: &RkFormula, enlarge: f64) -> Result<PlotWindow> {
    let poles = formula.poles_of_stability_function()?;
    let limit = formula.stability_on_real_negative_axis()?;

    let pole_reach = poles
        .iter()
        .map(|(pole, _)| {
            let (re, im) = pole.to_f64_parts();
            re.abs().max(im.abs())
        })
        .fold(0.0f64, f64::max);

    let reach = match limit {
        StabilityLimit::Finite(x) => pole_reach.max(-x.to_f64()),
        StabilityLimit::MinusInfinity => pole_reach,
    };

    if reach == 0.0 {
        return Err(RkError::UnboundedPlotWindow);
    }

    let half = enlarge * reach;
    Ok(PlotWindow {
        x_range: (-half, half / 2.0),
        y_range: (-half, half),
    })
}
