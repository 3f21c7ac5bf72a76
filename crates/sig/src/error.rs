//! Error types for signature sweeps.

use thiserror::Error;

use crate::sweep::SampleIndex;

/// Errors raised while configuring or running a sweep.
///
/// Numerical anomalies (near-threshold eigenvalues, matrices that are not
/// close to Hermitian) are not errors; see [`crate::Anomaly`].
#[derive(Debug, Error)]
pub enum SigError {
    /// The sampling resolution must be at least 1.
    #[error("invalid sampling number {0}: must be at least 1")]
    InvalidSteps(usize),

    /// The eigenvalue zero threshold must lie in `[0, 1)`.
    #[error("invalid zero threshold {0}: must be in the interval [0, 1)")]
    InvalidZeroThreshold(f64),

    /// The number of indeterminates must be at least 1.
    #[error("invalid number of indeterminates {0}: must be at least 1")]
    InvalidDimension(usize),

    /// A monomial exponent vector does not match the indeterminate count.
    #[error("exponent vector of length {found} does not match {expected} indeterminates")]
    ExponentLength {
        /// Number of indeterminates.
        expected: usize,
        /// Length of the offending exponent vector.
        found: usize,
    },

    /// A sample-index tuple does not match the indeterminate count.
    #[error("sample index of length {found} does not match {expected} indeterminates")]
    IndexLength {
        /// Number of indeterminates.
        expected: usize,
        /// Length of the offending tuple.
        found: usize,
    },

    /// The number of sample tuples does not fit in `usize`.
    #[error("sweep over {dimension} indeterminates at sampling number {steps} has too many samples")]
    SweepTooLarge {
        /// Number of indeterminates.
        dimension: usize,
        /// Sampling resolution.
        steps: usize,
    },

    /// The input matrix has no rows.
    #[error("matrix is empty")]
    EmptyMatrix,

    /// A row of the input matrix has the wrong length.
    #[error("matrix is not square: row {row} has {found} entries, expected {expected}")]
    NonSquareMatrix {
        /// Zero-based row number.
        row: usize,
        /// Length of that row.
        found: usize,
        /// Number of rows.
        expected: usize,
    },

    /// The same indeterminate name was declared twice.
    #[error("indeterminate `{0}` is declared more than once")]
    DuplicateIndeterminate(String),

    /// A polynomial expression could not be parsed.
    #[error("cannot parse `{expression}` at offset {offset}: {message}")]
    Parse {
        /// The full expression text.
        expression: String,
        /// Byte offset of the failure.
        offset: usize,
        /// What went wrong.
        message: String,
    },

    /// The Hermitian eigenvalue solver did not converge.
    #[error("eigenvalue computation did not converge for sample {indices}")]
    EigenSolver {
        /// The sample whose matrix failed.
        indices: SampleIndex,
    },

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input document is not valid JSON of the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for sweep operations.
pub type SigResult<T> = Result<T, SigError>;
