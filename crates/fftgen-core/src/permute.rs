//! Bit-reversal permutation planning and emission.
//!
//! The planner produces an ordered list of cell exchanges realizing the
//! radix-2 bit-reversal prologue. Under Hermitian-symmetric input the list
//! is rescheduled so every reflected read happens before the cell it reads
//! from is overwritten, and cells above `n/2` that no exchange touches are
//! seeded from their mirror image up front.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(missing_docs, clippy::all, clippy::unwrap_used, clippy::expect_used)]

use crate::config::Config;
use crate::emit::Sink;
use anyhow::Result;

/// One exchange of the bit-reversal stage.
///
/// `lo < hi` always. For a mirrored exchange the values are not swapped in
/// place; each destination is assigned from a reflected source cell
/// (`lo_src`/`hi_src`, both `<= n/2`) with the imaginary part negated
/// whenever the reflection actually moved the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swap {
    /// Smaller destination cell.
    pub lo: usize,
    /// Larger destination cell.
    pub hi: usize,
    /// Source for `hi` (equals `lo` unless mirrored).
    pub lo_src: usize,
    /// Source for `lo` (equals `hi` unless mirrored).
    pub hi_src: usize,
    /// Whether the reflected-source form is in effect.
    pub mirrored: bool,
}

impl Swap {
    #[inline]
    fn direct(lo: usize, hi: usize) -> Self {
        Self {
            lo,
            hi,
            lo_src: lo,
            hi_src: hi,
            mirrored: false,
        }
    }

    #[inline]
    fn touches(&self, cell: usize) -> bool {
        self.lo == cell || self.hi == cell
    }
}

/// The complete permutation block: mirror fills first, then the exchanges.
#[derive(Clone, Debug, Default)]
pub struct Permutation {
    /// Cells above `n/2` never touched by an exchange; each is assigned
    /// `x[i] = reflect(x[n - i])` before any exchange runs.
    pub fills: Vec<usize>,
    /// Exchanges in emission order.
    pub swaps: Vec<Swap>,
}

/// Plan the bit-reversal stage for `n` points.
///
/// The companion index follows the usual decrement-carry update; a swap is
/// recorded whenever the reversed index is above the running one, so each
/// 2-cycle of the permutation appears exactly once.
#[must_use]
pub fn plan(n: usize, symm_in: bool) -> Permutation {
    let half = n / 2;
    let mut swaps: Vec<Swap> = Vec::new();
    let mut rev = 0usize;
    for m in 1..n.saturating_sub(1) {
        let mut k = n;
        while rev + k > n - 1 {
            k >>= 1;
        }
        rev = (rev % k) + k;
        if rev <= m {
            continue;
        }
        if !symm_in || (m <= half && rev <= half) {
            swaps.push(Swap::direct(m, rev));
            continue;
        }
        let lo_src = if m <= half { m } else { n - m };
        let hi_src = if rev <= half { rev } else { n - rev };
        let swap = Swap {
            lo: m,
            hi: rev,
            lo_src,
            hi_src,
            mirrored: true,
        };
        // The reflected reads must run before any exchange that overwrites
        // one of the source cells. Scan back to front without stopping, so
        // `pos` ends on the earliest such exchange. Position 0 always holds
        // the (1, n/2) pair and neither 1 nor n/2 can occur as a mirrored
        // source, so 0 doubles as "no dependency".
        let mut pos = 0usize;
        for (j, s) in swaps.iter().enumerate().rev() {
            if s.touches(lo_src) || s.touches(hi_src) {
                pos = j;
            }
        }
        if pos > 0 {
            swaps.insert(pos, swap);
        } else {
            swaps.push(swap);
        }
    }

    let mut fills = Vec::new();
    if symm_in {
        let mut touched = vec![false; n];
        for s in &swaps {
            touched[s.lo] = true;
            touched[s.hi] = true;
        }
        fills.extend((half + 1..n).filter(|&i| !touched[i]));
    }

    Permutation { fills, swaps }
}

/// Emit the permutation block.
pub(crate) fn emit(perm: &Permutation, cfg: &Config, sink: &mut Sink<'_>) -> Result<()> {
    let n = cfg.n;
    let half = n / 2;
    for &i in &perm.fills {
        sink.stmt(format_args!("xr[{i}] = xr[{}];", n - i))?;
        if !cfg.real_in {
            sink.stmt(format_args!("xi[{i}] = -xi[{}];", n - i))?;
        }
    }
    for s in &perm.swaps {
        if s.mirrored {
            sink.stmt(format_args!("xr[{}] = xr[{}];", s.hi, s.lo_src))?;
            sink.stmt(format_args!("xr[{}] = xr[{}];", s.lo, s.hi_src))?;
            if !cfg.real_in {
                if s.lo <= half {
                    sink.stmt(format_args!("xi[{}] = xi[{}];", s.hi, s.lo_src))?;
                } else {
                    sink.stmt(format_args!("xi[{}] = -xi[{}];", s.hi, s.lo_src))?;
                }
                if s.hi <= half {
                    sink.stmt(format_args!("xi[{}] = xi[{}];", s.lo, s.hi_src))?;
                } else {
                    sink.stmt(format_args!("xi[{}] = -xi[{}];", s.lo, s.hi_src))?;
                }
            }
        } else {
            sink.stmt(format_args!("tr = xr[{}];", s.lo))?;
            sink.stmt(format_args!("xr[{}] = xr[{}];", s.lo, s.hi))?;
            sink.stmt(format_args!("xr[{}] = tr;", s.hi))?;
            if !cfg.real_in {
                sink.stmt(format_args!("ti = xi[{}];", s.lo))?;
                sink.stmt(format_args!("xi[{}] = xi[{}];", s.lo, s.hi))?;
                sink.stmt(format_args!("xi[{}] = ti;", s.hi))?;
            }
        }
    }
    Ok(())
}
