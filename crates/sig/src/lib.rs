//! Signatures of polynomial Hermitian matrices sampled on the unit circle.
//!
//! A run takes a square matrix whose entries are polynomials in `n`
//! indeterminates, evaluates it at tuples of points on the unit circle,
//! and reports the inertia (signature) of every sampled matrix.
//!
//! # Pipeline
//!
//! ```text
//! IndexSweep ──► MatrixSampler ──► hermitianize ──► eigenvalues ──► SignatureAnalyzer ──► output
//!                     ▲
//!               LookupTables
//! ```
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Root-of-unity tables | [`lut`] | `t1`, `t2`, `t3` |
//! | Index enumeration | [`sweep`] | [`SampleIndex`] tuples |
//! | Matrix evaluation | [`sampler`] | `DMatrix<Complex64>` |
//! | Spectrum | [`eigen`] | ascending eigenvalues |
//! | Inertia | [`analysis`] | [`Signature`] + suspicious values |
//! | Main loop | [`driver`] | [`SweepReport`] |
//!
//! # Example
//!
//! ```
//! use sig::{Driver, IndexSweep, LookupTables, MatrixSampler, EvaluationStrategy, SweepConfig};
//! use sig::input::InputDocument;
//!
//! let doc = InputDocument::from_json_str(
//!     r#"{"indeterminates": ["x"], "matrix": [["2", "0"], ["0", "-1"]]}"#,
//! ).unwrap();
//! let matrix = doc.into_problem().unwrap();
//!
//! let config = SweepConfig::new(4);
//! let tables = LookupTables::new(config.steps).unwrap();
//! let sampler = MatrixSampler::new(&matrix, &tables, EvaluationStrategy::ExponentTable).unwrap();
//! let sweep = IndexSweep::from_tables(matrix.indeterminate_count(), &tables, None).unwrap();
//!
//! let driver = Driver::new(&sampler, &sweep, &config).unwrap();
//! let mut out = Vec::new();
//! let report = driver.run(&mut out).unwrap();
//!
//! assert_eq!(report.samples, 4);
//! assert_eq!(report.interesting, 4);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![deny(missing_docs, clippy::missing_errors_doc)]

pub mod analysis;
pub mod driver;
pub mod eigen;
pub mod error;
pub mod hermitian;
pub mod input;
pub mod lut;
pub mod poly;
pub mod sampler;
pub mod sweep;

pub use analysis::{Analysis, InterestFilter, Signature, SignatureAnalyzer, SuspiciousEigenvalues};
pub use driver::{Anomaly, Driver, PhaseTimings, SampleOutcome, SweepConfig, SweepReport};
pub use error::{SigError, SigResult};
pub use lut::{LookupTables, SamplePoint};
pub use poly::{Polynomial, PolynomialMatrix};
pub use sampler::{EntryEvaluator, EvaluationStrategy, MatrixSampler};
pub use sweep::{IndexSweep, SampleIndex, SampleIndices};

/// Complex scalar used for every sampled matrix entry.
pub use num_complex::Complex64;
