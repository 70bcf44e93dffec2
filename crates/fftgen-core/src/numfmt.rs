//! Portable rendering of printf-style numeric format specs.
//!
//! The generator inherits a printf format string for its real constants
//! (default `%21.14e`). Rust's formatter has no C-compatible `%e`, so the
//! spec is parsed once up front and rendered by hand: C pads exponents to
//! at least two digits and always signs them.
//!
//! Supported: `%[flags][width][.precision]{e,E,f,F}` with the `-`, `+`,
//! space and `0` flags. Anything else is rejected at validation time.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(missing_docs, clippy::all, clippy::unwrap_used, clippy::expect_used)]

use anyhow::{bail, ensure, Context, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conv {
    Exp { upper: bool },
    Fixed,
}

/// A parsed numeric format, ready to render `f64` values.
#[derive(Clone, Debug)]
pub struct NumberFormat {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: usize,
    precision: usize,
    conv: Conv,
}

impl NumberFormat {
    /// Parse a printf-style spec such as `%21.14e`.
    pub fn parse(spec: &str) -> Result<Self> {
        let body = spec
            .strip_prefix('%')
            .with_context(|| format!("number format `{spec}` must start with `%`"))?;
        let mut chars = body.chars().peekable();

        let (mut left, mut plus, mut space, mut zero) = (false, false, false, false);
        while let Some(&c) = chars.peek() {
            match c {
                '-' => left = true,
                '+' => plus = true,
                ' ' => space = true,
                '0' => zero = true,
                _ => break,
            }
            chars.next();
        }

        let mut width = 0usize;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width * 10 + d as usize;
            chars.next();
        }

        // C defaults to six digits when no precision is given.
        let mut precision = 6usize;
        if chars.peek() == Some(&'.') {
            chars.next();
            precision = 0;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                precision = precision * 10 + d as usize;
                chars.next();
            }
        }

        let conv = match chars.next() {
            Some('e') => Conv::Exp { upper: false },
            Some('E') => Conv::Exp { upper: true },
            Some('f' | 'F') => Conv::Fixed,
            Some(c) => bail!("unsupported conversion `{c}` in number format `{spec}`"),
            None => bail!("number format `{spec}` has no conversion"),
        };
        ensure!(
            chars.next().is_none(),
            "trailing characters in number format `{spec}`"
        );

        Ok(Self {
            left,
            plus,
            space,
            zero,
            width,
            precision,
            conv,
        })
    }

    /// Render `v` exactly as C's printf would under this spec.
    #[must_use]
    pub fn render(&self, v: f64) -> String {
        let body = match self.conv {
            Conv::Exp { upper } => exp_body(v.abs(), self.precision, upper),
            Conv::Fixed => format!("{:.*}", self.precision, v.abs()),
        };
        let sign = if v.is_sign_negative() {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };

        let mut s = String::with_capacity(self.width.max(sign.len() + body.len()));
        s.push_str(sign);
        s.push_str(&body);
        if s.len() < self.width {
            let pad = self.width - s.len();
            if self.left {
                s.push_str(&" ".repeat(pad));
            } else if self.zero {
                s.insert_str(sign.len(), &"0".repeat(pad));
            } else {
                s.insert_str(0, &" ".repeat(pad));
            }
        }
        s
    }
}

/// `|v|` in C `%e` shape: `d.ddd` mantissa plus a signed, two-digit-minimum
/// exponent.
fn exp_body(v: f64, precision: usize, upper: bool) -> String {
    let rendered = format!("{v:.precision$e}");
    let (mantissa, exp) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let e: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if e < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", e.abs())
}
