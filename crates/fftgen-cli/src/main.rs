// crates/fftgen-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

//! `fftgen`: emit a fully unrolled, constant-folded radix-2 FFT or IFFT.
//!
//! The generated fragment goes to stdout; diagnostics go to stderr. Grouped
//! short flags work as usual (`-rsn1024` is `-r -s -n 1024`).

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use fftgen_core::{generate, Config};
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "fftgen",
    about = "Generate a loop-unrolled radix-2 FFT/IFFT fragment",
    long_about = "Generate a loop-unrolled radix-2 FFT/IFFT fragment.\n\n\
        The output operates in place on arrays `xr` and `xi` of length N and\n\
        uses scalar temporaries `tr` and `ti`; the embedding code declares\n\
        all four. Statements are emitted to stdout only.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// Number of points N (power of two)
    #[arg(short = 'n', long = "points", value_name = "N", value_parser = parse_points)]
    points: usize,

    /// Generate the inverse transform
    #[arg(short, long)]
    inverse: bool,

    /// Assume the imaginary input is all zero
    #[arg(short = 'r', long = "real-in-opt")]
    real_in: bool,

    /// Omit imaginary stores in the final stage (real result)
    #[arg(short = 'o', long = "real-out-opt")]
    real_out: bool,

    /// Assume Hermitian-symmetric input; cells above N/2 may be uninitialized
    #[arg(short = 'm', long = "symm-in-opt")]
    symm_in: bool,

    /// Omit final-stage stores above N/2 (symmetric result)
    #[arg(short = 's', long = "symm-out-opt")]
    symm_out: bool,

    /// Prefix the output with the license banner
    #[arg(short, long)]
    license: bool,

    /// Increase stderr verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Parse and pre-validate the point count so clap reports it as a usage error.
fn parse_points(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a decimal integer"))?;
    if n == 0 || !n.is_power_of_two() {
        return Err(format!("point count must be a positive power of two, got {n}"));
    }
    Ok(n)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = Config::new(cli.points);
    cfg.inverse = cli.inverse;
    cfg.real_in = cli.real_in;
    cfg.real_out = cli.real_out;
    cfg.symm_in = cli.symm_in;
    cfg.symm_out = cli.symm_out;
    cfg.license = cli.license;

    info!(
        n = cfg.n,
        inverse = cfg.inverse,
        real_in = cfg.real_in,
        real_out = cfg.real_out,
        symm_in = cfg.symm_in,
        symm_out = cfg.symm_out,
        "generating unrolled transform"
    );
    debug!(number_format = %cfg.number_format, indent = ?cfg.indent);

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    generate(&cfg, &mut out).context("generating transform fragment")?;
    out.flush().context("flushing stdout")?;
    Ok(())
}

/// Initialize tracing on stderr; `-v` sets the default level, `RUST_LOG`
/// still overrides.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn grouped_short_flags_parse() {
        let cli = Cli::try_parse_from(["fftgen", "-irn8"]).unwrap();
        assert!(cli.inverse && cli.real_in);
        assert_eq!(cli.points, 8);
    }

    #[test]
    fn separated_and_attached_values_parse() {
        for argv in [
            vec!["fftgen", "-n", "1024"],
            vec!["fftgen", "-n1024"],
            vec!["fftgen", "--points=1024"],
            vec!["fftgen", "--points", "1024"],
        ] {
            let cli = Cli::try_parse_from(argv).unwrap();
            assert_eq!(cli.points, 1024);
        }
    }

    #[test]
    fn missing_or_invalid_points_is_a_usage_error() {
        assert!(Cli::try_parse_from(["fftgen"]).is_err());
        assert!(Cli::try_parse_from(["fftgen", "-n", "24"]).is_err());
        assert!(Cli::try_parse_from(["fftgen", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["fftgen", "-n", "four"]).is_err());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["fftgen", "-n", "8", "--frobnicate"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["fftgen", "-n8", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }
}
