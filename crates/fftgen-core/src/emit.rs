//! Statement framing and right-hand-side assembly.
//!
//! Every statement is one line: indent, body, `;`, newline. Sums are built
//! term by term in a small buffer because each summand is conditional and
//! the connective depends on whether a leading term was already placed.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

use crate::numfmt::NumberFormat;
use crate::twiddle::Coeff;
use std::fmt::{self, Write as _};
use std::io;

/// Destination for generated statements.
pub(crate) struct Sink<'a> {
    out: &'a mut dyn io::Write,
    indent: &'a str,
}

impl<'a> Sink<'a> {
    pub(crate) fn new(out: &'a mut dyn io::Write, indent: &'a str) -> Self {
        Self { out, indent }
    }

    /// Write one statement line: indent, body, newline.
    pub(crate) fn stmt(&mut self, body: fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_all(self.indent.as_bytes())?;
        self.out.write_fmt(body)?;
        self.out.write_all(b"\n")
    }

    /// The blank separator between the permutation and butterfly blocks.
    pub(crate) fn blank(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")
    }
}

/// Builder for the right-hand side of `tr = ...` / `ti = ...`.
///
/// Terms arrive as a classified coefficient applied to an array cell; the
/// builder renders ` x`, ` -x` or ` <num>*x` for the leading term and
/// ` + ...` / ` - ...` for every following one. An all-elided sum stays
/// empty, which callers read as "provably zero".
pub(crate) struct Sum<'n> {
    num: &'n NumberFormat,
    buf: String,
}

impl<'n> Sum<'n> {
    pub(crate) fn new(num: &'n NumberFormat) -> Self {
        Self {
            num,
            buf: String::new(),
        }
    }

    /// True when every term so far was elided.
    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }

    /// Append `coeff * var` (or `-coeff * var` when `negate` is set).
    /// A [`Coeff::Zero`] contributes nothing.
    pub(crate) fn term(&mut self, coeff: Coeff, negate: bool, var: fmt::Arguments<'_>) {
        let leading = self.buf.is_empty();
        let plus = match coeff {
            Coeff::Zero => return,
            Coeff::One => !negate,
            Coeff::NegOne => negate,
            Coeff::Value(w) => {
                let c = if negate { -w } else { w };
                if leading {
                    let _ = write!(self.buf, " {}*{var}", self.num.render(c));
                } else if c >= 0.0 {
                    let _ = write!(self.buf, " + {}*{var}", self.num.render(c));
                } else {
                    let _ = write!(self.buf, " - {}*{var}", self.num.render(-c));
                }
                return;
            }
        };
        match (leading, plus) {
            (true, true) => {
                let _ = write!(self.buf, " {var}");
            }
            (true, false) => {
                let _ = write!(self.buf, " -{var}");
            }
            (false, true) => {
                let _ = write!(self.buf, " + {var}");
            }
            (false, false) => {
                let _ = write!(self.buf, " - {var}");
            }
        }
    }
}
