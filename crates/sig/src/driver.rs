//! The sampling main loop.
//!
//! For every tuple of the sweep the driver samples the matrix, optionally
//! checks that it is close to Hermitian, hermitianizes it, computes its
//! ascending spectrum and classifies it. Interesting signatures are written
//! to the primary output, one line per sample:
//!
//! ```text
//! (1, -2) : (2, 1, 0)
//! ```
//!
//! Numerical anomalies never stop the loop: they are logged with
//! `tracing::warn!` and collected in the returned [`SweepReport`]. Solver
//! and output failures abort the run.

use std::io::Write;
use std::time::{Duration, Instant};

use nalgebra::DMatrix;
use num_complex::Complex64;
use tracing::{debug, info, warn};

use crate::analysis::{Analysis, InterestFilter, SignatureAnalyzer, SuspiciousEigenvalues};
use crate::eigen::ascending_eigenvalues;
use crate::error::{SigError, SigResult};
use crate::hermitian::{hermitianize, is_hermitian, DEFAULT_HERMITIAN_TOLERANCE};
use crate::sampler::MatrixSampler;
use crate::sweep::{IndexSweep, SampleIndex};

/// Run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Sampling resolution `S`, at least 1.
    pub steps: usize,
    /// Eigenvalue zero threshold `δ` in `[0, 1)`.
    pub zero_threshold: f64,
    /// Interesting-signature parameter `g`; `None` disables the filter.
    pub signature_parameter: Option<i64>,
    /// Periodicity parameter `r` for the index sweep.
    pub periodicity: Option<i64>,
    /// Check every sample for being close to Hermitian.
    pub caution: bool,
    /// Relative discrepancy accepted by the caution check.
    pub hermitian_tolerance: f64,
}

impl SweepConfig {
    /// Default eigenvalue zero threshold.
    pub const DEFAULT_ZERO_THRESHOLD: f64 = 1e-12;

    /// Defaults at resolution `steps`.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    /// Check the numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::InvalidSteps`] or
    /// [`SigError::InvalidZeroThreshold`].
    pub fn validate(&self) -> SigResult<()> {
        if self.steps == 0 {
            return Err(SigError::InvalidSteps(self.steps));
        }
        if !(0.0..1.0).contains(&self.zero_threshold) {
            return Err(SigError::InvalidZeroThreshold(self.zero_threshold));
        }
        Ok(())
    }

    /// The predicate selected by `signature_parameter`.
    #[must_use]
    pub fn interest_filter(&self) -> InterestFilter {
        InterestFilter::from_parameter(self.signature_parameter)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            steps: 1,
            zero_threshold: Self::DEFAULT_ZERO_THRESHOLD,
            signature_parameter: None,
            periodicity: None,
            caution: false,
            hermitian_tolerance: DEFAULT_HERMITIAN_TOLERANCE,
        }
    }
}

/// A non-fatal numerical finding.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// The sampled matrix was not close to Hermitian before hermitianization.
    NonHermitian {
        /// Where it was sampled.
        indices: SampleIndex,
        /// The offending matrix.
        matrix: DMatrix<Complex64>,
    },
    /// Some eigenvalues were classified as non-zero but lie near the threshold.
    Suspicious {
        /// Where it was sampled.
        indices: SampleIndex,
        /// The near-threshold values.
        eigenvalues: SuspiciousEigenvalues,
    },
}

impl Anomaly {
    /// The sample the anomaly belongs to.
    #[must_use]
    pub fn indices(&self) -> &SampleIndex {
        match self {
            Self::NonHermitian { indices, .. } | Self::Suspicious { indices, .. } => indices,
        }
    }
}

/// Cumulative time spent per phase of the main loop.
///
/// Durations are wall-clock time measured with [`Instant`], not process CPU
/// time, so they include time the process spent descheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseTimings {
    /// Sampling, caution check and hermitianization.
    pub matrix: Duration,
    /// Eigenvalue computation.
    pub eigen: Duration,
    /// Eigenvalue classification.
    pub analysis: Duration,
    /// The whole loop, output included.
    pub total: Duration,
}

/// Result of processing one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutcome {
    /// Signature and suspicious values.
    pub analysis: Analysis,
    /// Whether the signature passed the interest filter.
    pub interesting: bool,
    /// Findings for this sample.
    pub anomalies: Vec<Anomaly>,
}

/// Summary of a completed sweep.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepReport {
    /// Tuples processed.
    pub samples: usize,
    /// Lines written to the primary output.
    pub interesting: usize,
    /// Every anomaly, in enumeration order.
    pub anomalies: Vec<Anomaly>,
    /// Phase timings.
    pub timings: PhaseTimings,
}

impl SweepReport {
    /// Number of samples with suspicious eigenvalues.
    #[must_use]
    pub fn suspicious_count(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| matches!(a, Anomaly::Suspicious { .. }))
            .count()
    }

    /// Number of samples that failed the caution check.
    #[must_use]
    pub fn non_hermitian_count(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| matches!(a, Anomaly::NonHermitian { .. }))
            .count()
    }
}

/// Ties the sweep, sampler and analyzer together.
#[derive(Debug)]
pub struct Driver<'a> {
    sampler: &'a MatrixSampler<'a>,
    sweep: &'a IndexSweep,
    analyzer: SignatureAnalyzer,
    filter: InterestFilter,
    caution: bool,
    hermitian_tolerance: f64,
}

impl<'a> Driver<'a> {
    /// Assemble a driver.
    ///
    /// # Errors
    ///
    /// - the errors of [`SweepConfig::validate`]
    /// - [`SigError::IndexLength`] if the sweep's tuples do not match the
    ///   sampler's indeterminate count
    pub fn new(
        sampler: &'a MatrixSampler<'a>,
        sweep: &'a IndexSweep,
        config: &SweepConfig,
    ) -> SigResult<Self> {
        config.validate()?;
        if sweep.dimension() != sampler.indeterminate_count() {
            return Err(SigError::IndexLength {
                expected: sampler.indeterminate_count(),
                found: sweep.dimension(),
            });
        }

        Ok(Self {
            sampler,
            sweep,
            analyzer: SignatureAnalyzer::new(config.zero_threshold)?,
            filter: config.interest_filter(),
            caution: config.caution,
            hermitian_tolerance: config.hermitian_tolerance,
        })
    }

    /// Process a single tuple.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::IndexLength`] for a malformed tuple and
    /// [`SigError::EigenSolver`] if the spectrum cannot be computed.
    pub fn process(&self, indices: &SampleIndex) -> SigResult<SampleOutcome> {
        self.process_timed(indices, &mut PhaseTimings::default())
    }

    /// Process every tuple of the sweep, writing interesting signatures to
    /// `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::EigenSolver`] on the first solver failure and
    /// [`SigError::Io`] if writing fails.
    pub fn run<W: Write>(&self, out: &mut W) -> SigResult<SweepReport> {
        let start = Instant::now();
        let mut report = SweepReport::default();

        for indices in self.sweep {
            let outcome = self.process_timed(&indices, &mut report.timings)?;
            report.samples += 1;
            if outcome.interesting {
                writeln!(out, "{} : {}", indices, outcome.analysis.signature)?;
                report.interesting += 1;
            }
            report.anomalies.extend(outcome.anomalies);
        }
        out.flush()?;

        report.timings.total = start.elapsed();
        info!(
            samples = report.samples,
            interesting = report.interesting,
            "total time spent in the main loop: {:.3?}",
            report.timings.total
        );
        info!(
            "including computing matrices: {:.3?}, computing eigenvalues: {:.3?}, analysing eigenvalues: {:.3?}",
            report.timings.matrix, report.timings.eigen, report.timings.analysis
        );
        Ok(report)
    }

    fn process_timed(
        &self,
        indices: &SampleIndex,
        timings: &mut PhaseTimings,
    ) -> SigResult<SampleOutcome> {
        let mut anomalies = Vec::new();

        let time0 = Instant::now();
        let mat = self.sampler.sample(indices)?;
        if self.caution && !is_hermitian(&mat, self.hermitian_tolerance) {
            warn!(
                indices = %indices,
                "computed matrix does not seem to be sufficiently close to Hermitian:{}",
                mat
            );
            anomalies.push(Anomaly::NonHermitian {
                indices: indices.clone(),
                matrix: mat.clone(),
            });
        }
        let mat = hermitianize(&mat);

        let time1 = Instant::now();
        let eigenvalues = ascending_eigenvalues(mat).ok_or_else(|| SigError::EigenSolver {
            indices: indices.clone(),
        })?;

        let time2 = Instant::now();
        let analysis = self.analyzer.analyze(&eigenvalues);
        let time3 = Instant::now();

        timings.matrix += time1 - time0;
        timings.eigen += time2 - time1;
        timings.analysis += time3 - time2;

        if !analysis.suspicious.is_empty() {
            warn!(
                indices = %indices,
                negative = ?analysis.suspicious.negative,
                positive = ?analysis.suspicious.positive,
                "eigenvalues treated as non-zero are suspiciously close to 0"
            );
            anomalies.push(Anomaly::Suspicious {
                indices: indices.clone(),
                eigenvalues: analysis.suspicious.clone(),
            });
        }

        let interesting = self.filter.accepts(&analysis.signature);
        debug!(indices = %indices, signature = %analysis.signature, interesting, "sample analysed");

        Ok(SampleOutcome {
            analysis,
            interesting,
            anomalies,
        })
    }
}
