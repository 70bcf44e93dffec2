//! Stage loop and constant-folded butterfly emission.
//!
//! Each butterfly conceptually computes
//!
//! ```text
//! tr = wr*xr[jj] - wi*xi[jj]
//! ti = wr*xi[jj] + wi*xr[jj]
//! xr[jj] = xr[ii] - tr;   xi[jj] = xi[ii] - ti
//! xr[ii] += tr;           xi[ii] += ti
//! ```
//!
//! and the emitter folds away every summand whose coefficient classified as
//! zero or whose imaginary operand is still provably zero. `imag_live[i]`
//! is the running approximation: true once emitted code may have left a
//! non-zero value in `xi[i]`. A store that merely copies a known-zero cell
//! does not set it.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::unwrap_used, clippy::expect_used)]

use crate::config::{Config, Tolerances};
use crate::emit::{Sink, Sum};
use crate::numfmt::NumberFormat;
use crate::twiddle::{butterfly_coeffs, classify, Coeff};
use anyhow::Result;

/// Emit all `log2(n)` butterfly stages.
pub(crate) fn emit(cfg: &Config, num: &NumberFormat, sink: &mut Sink<'_>) -> Result<()> {
    let tol = Tolerances::for_points(cfg.n);
    let mut imag_live = vec![!cfg.real_in; cfg.n];
    let mut k = 1;
    while k < cfg.n {
        emit_stage(cfg, &tol, num, sink, k, &mut imag_live)?;
        k *= 2;
    }
    Ok(())
}

/// Emit one stage: half-span `k`, butterflies `(ii, ii + k)` for every
/// inner index `m` in `0..k`.
fn emit_stage(
    cfg: &Config,
    tol: &Tolerances,
    num: &NumberFormat,
    sink: &mut Sink<'_>,
    k: usize,
    imag_live: &mut [bool],
) -> Result<()> {
    let istep = 2 * k;
    let last_stage = istep == cfg.n;
    for m in 0..k {
        let (wr, wi) = butterfly_coeffs(m, k, cfg.inverse);
        let cr = classify(wr, tol);
        let ci = classify(wi, tol);
        for ii in (m..cfg.n).step_by(istep) {
            emit_butterfly(cfg, num, sink, ii, ii + k, cr, ci, last_stage, imag_live)?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn emit_butterfly(
    cfg: &Config,
    num: &NumberFormat,
    sink: &mut Sink<'_>,
    ii: usize,
    jj: usize,
    cr: Coeff,
    ci: Coeff,
    last_stage: bool,
    imag_live: &mut [bool],
) -> Result<()> {
    let half = cfg.n / 2;
    let drop_imag = cfg.real_out && last_stage;

    // tr = wr*xr[jj] - wi*xi[jj]
    let mut tr = Sum::new(num);
    tr.term(cr, false, format_args!("xr[{jj}]"));
    if imag_live[jj] {
        tr.term(ci, true, format_args!("xi[{jj}]"));
    }
    if !tr.is_empty() {
        sink.stmt(format_args!("tr ={};", tr.as_str()))?;
    }

    // ti = wr*xi[jj] + wi*xr[jj]
    let mut ti = Sum::new(num);
    if !drop_imag {
        if imag_live[jj] {
            ti.term(cr, false, format_args!("xi[{jj}]"));
        }
        ti.term(ci, false, format_args!("xr[{jj}]"));
        if !ti.is_empty() {
            sink.stmt(format_args!("ti ={};", ti.as_str()))?;
        }
    }

    // Stores to the upper leg.
    if !(cfg.symm_out && last_stage && jj != half) {
        if tr.is_empty() {
            sink.stmt(format_args!("xr[{jj}] = xr[{ii}];"))?;
        } else {
            sink.stmt(format_args!("xr[{jj}] = xr[{ii}] - tr;"))?;
        }
        if !drop_imag {
            if !ti.is_empty() {
                if imag_live[ii] {
                    sink.stmt(format_args!("xi[{jj}] = xi[{ii}] - ti;"))?;
                } else {
                    sink.stmt(format_args!("xi[{jj}] = -ti;"))?;
                }
                imag_live[jj] = true;
            } else if imag_live[ii] {
                sink.stmt(format_args!("xi[{jj}] = xi[{ii}];"))?;
                imag_live[jj] = true;
            } else if cfg.real_in && last_stage {
                // The host never initialized xi; the contract still promises
                // zeros at every output index.
                sink.stmt(format_args!("xi[{jj}] = 0.0;"))?;
            }
        }
    }

    // Accumulation into the lower leg.
    if !tr.is_empty() {
        sink.stmt(format_args!("xr[{ii}] += tr;"))?;
    }
    if !drop_imag {
        if !ti.is_empty() {
            if imag_live[ii] {
                sink.stmt(format_args!("xi[{ii}] += ti;"))?;
            } else {
                sink.stmt(format_args!("xi[{ii}] = ti;"))?;
                imag_live[ii] = true;
            }
        } else if !imag_live[ii] && cfg.real_in && last_stage {
            sink.stmt(format_args!("xi[{ii}] = 0.0;"))?;
        }
    }

    Ok(())
}
