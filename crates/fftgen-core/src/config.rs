//! Generator configuration and the classifier tolerances derived from it.
//!
//! A [`Config`] describes one generation run. Everything is plain data; the
//! driver in the crate root validates it once and threads it through the
//! planner and the emitter unchanged.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use anyhow::{ensure, Result};
use std::f64::consts::PI;

/// Default rendering spec for generic twiddle coefficients.
pub const DEFAULT_NUMBER_FORMAT: &str = "%21.14e";

/// Default per-statement indent.
pub const DEFAULT_INDENT: &str = "\t";

/// One generation run.
///
/// `n` must be a positive power of two; everything else defaults to off.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Transform size (number of points).
    pub n: usize,
    /// Generate the inverse transform (negates every twiddle sine).
    pub inverse: bool,
    /// The imaginary input is known to be all zero.
    pub real_in: bool,
    /// Suppress imaginary stores in the final stage.
    pub real_out: bool,
    /// The input is Hermitian-symmetric about `n/2`; cells above `n/2`
    /// may be uninitialized and are derived by reflection.
    pub symm_in: bool,
    /// Suppress final-stage stores to indices above `n/2`.
    pub symm_out: bool,
    /// Prefix the output with the license banner.
    pub license: bool,
    /// printf-style spec used to render generic real coefficients.
    pub number_format: String,
    /// String prefixed to every emitted statement.
    pub indent: String,
}

impl Config {
    /// A configuration for `n` points with every option at its default.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            inverse: false,
            real_in: false,
            real_out: false,
            symm_in: false,
            symm_out: false,
            license: false,
            number_format: DEFAULT_NUMBER_FORMAT.to_owned(),
            indent: DEFAULT_INDENT.to_owned(),
        }
    }

    /// Check the size constraint: `n >= 1` and a power of two.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.n >= 1, "point count must be positive, got {}", self.n);
        ensure!(
            self.n.is_power_of_two(),
            "point count must be a power of two, got {}",
            self.n
        );
        Ok(())
    }
}

/// Thresholds used to recognize twiddle components that are exactly
/// `0`, `+1` or `-1` on the size-`n` twiddle grid.
///
/// The smallest non-trivial twiddle angle is `pi/(n/2)`, so half of its
/// sine (resp. half of the gap below `1` of its cosine) cleanly separates
/// the exact values from their nearest neighbors.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    /// `|w| <= zero` classifies as exactly zero.
    pub zero: f64,
    /// `w >= one` classifies as exactly `+1`.
    pub one: f64,
    /// `w <= neg_one` classifies as exactly `-1`.
    pub neg_one: f64,
}

impl Tolerances {
    /// Thresholds for a size-`n` transform. `n` must be a power of two `>= 2`.
    #[must_use]
    pub fn for_points(n: usize) -> Self {
        debug_assert!(n >= 2 && n.is_power_of_two());
        let step = PI / (n / 2) as f64;
        let zero = 0.5 * step.sin();
        let one = 1.0 - 0.5 * (1.0 - step.cos());
        Self {
            zero,
            one,
            neg_one: -one,
        }
    }
}
