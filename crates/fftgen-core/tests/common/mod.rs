//! Shared test support: a tiny interpreter for the emitted statement
//! language, a naive DFT reference, and deterministic input vectors.
//!
//! The interpreter stands in for the C host the fragment is meant to be
//! embedded in: it provides `xr`, `xi`, `tr`, `ti` and executes assignments
//! and `+=` accumulations whose right-hand sides are sums of optionally
//! scaled cells. Feeding NaN into cells a fragment promises not to read is
//! how the elision properties are checked for real.

#![allow(dead_code)]

use std::f64::consts::PI;

/// Mutable host state for one fragment run.
pub struct Host {
    pub xr: Vec<f64>,
    pub xi: Vec<f64>,
    tr: f64,
    ti: f64,
}

impl Host {
    #[must_use]
    pub fn new(xr: &[f64], xi: &[f64]) -> Self {
        assert_eq!(xr.len(), xi.len());
        Self {
            xr: xr.to_vec(),
            xi: xi.to_vec(),
            tr: f64::NAN,
            ti: f64::NAN,
        }
    }

    /// Execute every statement of `fragment` in order.
    pub fn run(&mut self, fragment: &str) {
        for line in fragment.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let stmt = line
                .strip_suffix(';')
                .unwrap_or_else(|| panic!("statement without terminator: {line:?}"));
            if let Some((lhs, rhs)) = stmt.split_once("+=") {
                let v = self.eval_sum(rhs);
                self.store(lhs.trim(), v, true);
            } else if let Some((lhs, rhs)) = stmt.split_once('=') {
                let v = self.eval_sum(rhs);
                self.store(lhs.trim(), v, false);
            } else {
                panic!("unparsable statement: {line:?}");
            }
        }
    }

    /// Evaluate a sum of terms. Terms never contain spaces, so connectives
    /// are exactly the whitespace-separated `+` / `-` tokens.
    fn eval_sum(&self, rhs: &str) -> f64 {
        let mut tokens = rhs.split_whitespace();
        let first = tokens.next().unwrap_or_else(|| panic!("empty rhs: {rhs:?}"));
        let mut total = self.load(first);
        while let Some(op) = tokens.next() {
            let term = tokens
                .next()
                .unwrap_or_else(|| panic!("dangling `{op}` in {rhs:?}"));
            match op {
                "+" => total += self.load(term),
                "-" => total -= self.load(term),
                _ => panic!("bad connective `{op}` in {rhs:?}"),
            }
        }
        total
    }

    /// Evaluate one term: `[-][coef*]var` or a bare literal.
    fn load(&self, term: &str) -> f64 {
        let (sign, body) = match term.strip_prefix('-') {
            Some(rest) => (-1.0, rest),
            None => (1.0, term),
        };
        let (coef, var) = match body.split_once('*') {
            Some((c, v)) => {
                let c: f64 = c.parse().unwrap_or_else(|_| panic!("bad coefficient {c:?}"));
                (c, v)
            }
            None => (1.0, body),
        };
        let value = match var {
            "tr" => self.tr,
            "ti" => self.ti,
            _ => {
                if let Some(idx) = parse_cell(var, "xr") {
                    self.xr[idx]
                } else if let Some(idx) = parse_cell(var, "xi") {
                    self.xi[idx]
                } else {
                    var.parse()
                        .unwrap_or_else(|_| panic!("unknown operand {var:?}"))
                }
            }
        };
        sign * coef * value
    }

    fn store(&mut self, lhs: &str, v: f64, accumulate: bool) {
        let slot = match lhs {
            "tr" => &mut self.tr,
            "ti" => &mut self.ti,
            _ => {
                if let Some(idx) = parse_cell(lhs, "xr") {
                    &mut self.xr[idx]
                } else if let Some(idx) = parse_cell(lhs, "xi") {
                    &mut self.xi[idx]
                } else {
                    panic!("unknown store target {lhs:?}");
                }
            }
        };
        if accumulate {
            *slot += v;
        } else {
            *slot = v;
        }
    }
}

fn parse_cell(token: &str, array: &str) -> Option<usize> {
    token
        .strip_prefix(array)?
        .strip_prefix('[')?
        .strip_suffix(']')?
        .parse()
        .ok()
}

/// Run `fragment` on a fresh host and return the resulting arrays.
#[must_use]
pub fn run_fragment(fragment: &str, xr: &[f64], xi: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut host = Host::new(xr, xi);
    host.run(fragment);
    (host.xr, host.xi)
}

/// Naive O(n^2) DFT reference: `X_k = sum_j x_j * exp(sign*2*pi*i*j*k/n)`
/// with `sign = -1` forward, `+1` inverse (unnormalized).
#[must_use]
pub fn dft_reference(xr: &[f64], xi: &[f64], inverse: bool) -> (Vec<f64>, Vec<f64>) {
    let n = xr.len();
    let sign = if inverse { 1.0 } else { -1.0 };
    let mut out_r = vec![0.0; n];
    let mut out_i = vec![0.0; n];
    for k in 0..n {
        let mut re = 0.0;
        let mut im = 0.0;
        for j in 0..n {
            let theta = sign * 2.0 * PI * (j * k % n) as f64 / n as f64;
            let (s, c) = theta.sin_cos();
            re += xr[j] * c - xi[j] * s;
            im += xr[j] * s + xi[j] * c;
        }
        out_r[k] = re;
        out_i[k] = im;
    }
    (out_r, out_i)
}

/// Deterministic pseudo-random vector in `[-1, 1)`.
#[must_use]
pub fn seeded_vec(n: usize, seed: u64) -> Vec<f64> {
    use rand::{rngs::StdRng, Rng as _, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
}

/// Elementwise comparison with a helpful failure message.
#[track_caller]
pub fn assert_close(got: &[f64], want: &[f64], tol: f64, what: &str) {
    assert_eq!(got.len(), want.len());
    for (k, (g, w)) in got.iter().zip(want).enumerate() {
        assert!(
            (g - w).abs() <= tol,
            "{what}: index {k}: got {g}, want {w} (tol {tol})"
        );
    }
}
