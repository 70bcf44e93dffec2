//! Offline generator of fully loop-unrolled radix-2 FFT/IFFT fragments.
//!
//! For a fixed power-of-two size `n` the generator writes a flat, straight-line
//! sequence of arithmetic statements operating in place on two parallel arrays
//! `xr[0..n]` and `xi[0..n]`. Twiddle factors are evaluated at generation time
//! and every multiplication by an exact `0`/`+1`/`-1` is folded away, as is
//! every summand whose imaginary operand is provably still zero.
//!
//! - `config`: the [`Config`] record and the classifier tolerances.
//! - `permute`: the bit-reversal plan, rescheduled for Hermitian input.
//! - `butterfly`: the stage loop and the symbolic-zero emission discipline.
//! - `twiddle` / `numfmt` / `emit`: classification, printf-style rendering,
//!   statement framing.
//!
//! The output is a fragment: no declarations, no function signature. The host
//! embedding it must provide `xr`, `xi` (length `n`) and scalars `tr`, `ti`
//! of the same element type. Identical configurations generate byte-identical
//! output.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown
)]

pub mod config;
pub use config::Config;

pub mod license;
pub mod numfmt;
pub mod permute;
pub mod twiddle;

mod butterfly;
mod emit;

use anyhow::{Context, Result};
use emit::Sink;
use numfmt::NumberFormat;
use std::io::Write;

/// Generate the unrolled transform described by `cfg` into `out`.
///
/// The stream is, in order: the optional license banner, the bit-reversal
/// permutation block, one blank separator line, and the butterfly block.
/// `n = 1` produces nothing beyond the optional banner.
///
/// # Errors
///
/// Fails on an invalid point count, an unsupported number format, or a sink
/// write error. Nothing is retried; partial output may have been written.
pub fn generate<W: Write>(cfg: &Config, out: &mut W) -> Result<()> {
    cfg.validate()?;
    let num = NumberFormat::parse(&cfg.number_format)
        .with_context(|| format!("bad number format `{}`", cfg.number_format))?;

    if cfg.license {
        out.write_all(license::BANNER.as_bytes())
            .context("writing license banner")?;
    }
    if cfg.n == 1 {
        return Ok(());
    }

    let mut sink = Sink::new(out, &cfg.indent);
    let perm = permute::plan(cfg.n, cfg.symm_in);
    permute::emit(&perm, cfg, &mut sink).context("emitting permutation block")?;
    sink.blank()?;
    butterfly::emit(cfg, &num, &mut sink).context("emitting butterfly block")?;
    Ok(())
}

/// Convenience wrapper returning the generated fragment as a `String`.
///
/// # Errors
///
/// Same failure modes as [`generate`].
pub fn generate_to_string(cfg: &Config) -> Result<String> {
    let mut buf = Vec::new();
    generate(cfg, &mut buf)?;
    String::from_utf8(buf).context("generated fragment is not UTF-8")
}
