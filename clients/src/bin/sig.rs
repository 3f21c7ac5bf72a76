//! `sig`: sweeps a polynomial Hermitian matrix over the unit circle and
//! prints the signature of every sampled matrix.
//!
//! **Input:** a JSON document
//! `{"indeterminates": ["x", ...], "matrix": [["<expr>", ...], ...]}`.
//!
//! **Output:** one `(i1, i2, ...) : (p, n, z)` line per interesting sample on
//! stdout; diagnostics and timings on stderr.
//!
//! **Usage:**
//! ```
//! sig <filename> -s <S> [-z <delta>] [-g <g>] [-r <r>] [-c] [-v]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use sig::input::InputDocument;
use sig::{Driver, EvaluationStrategy, IndexSweep, LookupTables, MatrixSampler, SweepConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compute signatures of a polynomial Hermitian matrix sampled on the unit circle.
#[derive(Parser, Debug)]
#[command(
    name = "sig",
    about = "Compute signatures of a polynomial Hermitian matrix sampled on the unit circle"
)]
struct Args {
    /// JSON file holding the indeterminates and the matrix.
    filename: PathBuf,

    /// Number of subdivisions of the half circle (at least 1).
    #[arg(
        short = 's',
        short_alias = 'n',
        long = "sampling-number",
        value_parser = parse_steps
    )]
    steps: usize,

    /// Eigenvalues with absolute value at most this are treated as zero.
    #[arg(
        short = 'z',
        long = "zero-threshold",
        default_value_t = SweepConfig::DEFAULT_ZERO_THRESHOLD,
        value_parser = parse_zero_threshold
    )]
    zero_threshold: f64,

    /// Only print signatures with |p - n| >= z + g.
    #[arg(short = 'g', long = "signature-parameter", allow_negative_numbers = true)]
    signature_parameter: Option<i64>,

    /// Restrict the first two indices to the pairs selected by this parameter.
    #[arg(short = 'r', long = "periodicity-parameter", allow_negative_numbers = true)]
    periodicity: Option<i64>,

    /// Check every sampled matrix for being close to Hermitian.
    #[arg(short = 'c', long = "with-caution")]
    caution: bool,

    /// Emit per-sample debug diagnostics.
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> SweepConfig {
        SweepConfig {
            steps: self.steps,
            zero_threshold: self.zero_threshold,
            signature_parameter: self.signature_parameter,
            periodicity: self.periodicity,
            caution: self.caution,
            ..SweepConfig::default()
        }
    }
}

fn parse_steps(s: &str) -> std::result::Result<usize, String> {
    let steps: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a non-negative integer", s))?;
    if steps == 0 {
        return Err("sampling number must be at least 1".to_string());
    }
    Ok(steps)
}

fn parse_zero_threshold(s: &str) -> std::result::Result<f64, String> {
    let delta: f64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if !(0.0..1.0).contains(&delta) {
        return Err("zero threshold must lie in [0, 1)".to_string());
    }
    Ok(delta)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.config();
    config.validate()?;

    let start = Instant::now();
    let matrix = InputDocument::from_path(&args.filename)
        .and_then(InputDocument::into_problem)
        .with_context(|| format!("failed to load {}", args.filename.display()))?;
    info!(
        indeterminates = matrix.indeterminate_count(),
        dimension = matrix.dimension(),
        "input parsed in {:.3?}",
        start.elapsed()
    );

    let start = Instant::now();
    let tables = LookupTables::new(config.steps)?;
    let sampler = MatrixSampler::new(&matrix, &tables, EvaluationStrategy::ExponentTable)?;
    let sweep = IndexSweep::from_tables(sampler.indeterminate_count(), &tables, config.periodicity)?;
    let driver = Driver::new(&sampler, &sweep, &config)?;
    info!(samples = sweep.len(), "initialized in {:.3?}", start.elapsed());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let report = driver.run(&mut out)?;

    if !report.anomalies.is_empty() {
        info!(
            suspicious = report.suspicious_count(),
            non_hermitian = report.non_hermitian_count(),
            "numerical anomalies reported"
        );
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_steps("4"), Ok(4));
        assert!(parse_steps("0").is_err());
        assert!(parse_steps("-2").is_err());
        assert!(parse_steps("two").is_err());
    }

    #[test]
    fn test_parse_zero_threshold() {
        assert_eq!(parse_zero_threshold("0"), Ok(0.0));
        assert_eq!(parse_zero_threshold("1e-8"), Ok(1e-8));
        assert!(parse_zero_threshold("1").is_err());
        assert!(parse_zero_threshold("-0.5").is_err());
        assert!(parse_zero_threshold("NaN").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sig", "m.json", "-s", "8"]).unwrap();
        assert_eq!(args.filename, PathBuf::from("m.json"));
        assert_eq!(args.steps, 8);
        assert_eq!(args.zero_threshold, 1e-12);
        assert_eq!(args.signature_parameter, None);
        assert_eq!(args.periodicity, None);
        assert!(!args.caution);
        assert_eq!(args.config(), SweepConfig::new(8));
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "sig", "m.json", "-n", "5", "-z", "1e-6", "-g", "0", "-r", "-3", "-c",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.steps, 5);
        assert_eq!(config.zero_threshold, 1e-6);
        assert_eq!(config.signature_parameter, Some(0));
        assert_eq!(config.periodicity, Some(-3));
        assert!(config.caution);
    }

    #[test]
    fn test_sampling_number_is_required() {
        assert!(Args::try_parse_from(["sig", "m.json"]).is_err());
        assert!(Args::try_parse_from(["sig", "m.json", "-s", "0"]).is_err());
    }
}
