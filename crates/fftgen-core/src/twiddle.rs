//! Twiddle-factor evaluation and coefficient classification.
//!
//! Twiddles are evaluated in `f64` at generation time and immediately
//! bucketed: the emitter only ever sees a [`Coeff`], so multiplications by
//! `0`/`+1`/`-1` can be folded away without re-testing floats downstream.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

use crate::config::Tolerances;
use std::f64::consts::PI;

/// A butterfly coefficient after classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coeff {
    /// Exactly zero on the twiddle grid; the whole summand is elided.
    Zero,
    /// Exactly `+1`; the factor disappears.
    One,
    /// Exactly `-1`; the factor becomes a sign flip.
    NegOne,
    /// Anything else, rendered through the configured number format.
    Value(f64),
}

/// Bucket a twiddle component against the size-derived thresholds.
#[inline]
#[must_use]
pub fn classify(w: f64, tol: &Tolerances) -> Coeff {
    if w.abs() <= tol.zero {
        Coeff::Zero
    } else if w >= tol.one {
        Coeff::One
    } else if w <= tol.neg_one {
        Coeff::NegOne
    } else {
        Coeff::Value(w)
    }
}

/// The `(wr, wi)` pair for inner index `m` of a stage with half-span `k`.
///
/// `wr + j*wi = exp(-j*pi*m/k)`; the inverse transform conjugates it.
#[inline]
#[must_use]
pub fn butterfly_coeffs(m: usize, k: usize, inverse: bool) -> (f64, f64) {
    let a = -PI * m as f64 / k as f64;
    let wi = if inverse { -a.sin() } else { a.sin() };
    (a.cos(), wi)
}
