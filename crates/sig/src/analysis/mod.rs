//! Eigenvalue classification.
//!
//! An ascending eigenvalue sequence is split into negative, zero and
//! positive parts using the zero threshold `δ`. Values classified as
//! non-zero but lying within the wider margin `σ = sqrt(δ)` are reported as
//! **suspicious**: the classification holds, but a human should look.
//!
//! ```text
//!   negative      negative,      zero       positive,     positive
//!                 suspicious                suspicious
//! ─────────────┬──────────────┬─────────┬──────────────┬─────────────
//!             -σ             -δ         δ              σ
//! ```
//!
//! # Example
//!
//! ```
//! use sig::{Signature, SignatureAnalyzer};
//!
//! let analyzer = SignatureAnalyzer::new(1e-4).unwrap();
//! let analysis = analyzer.analyze(&[-3.0, -5e-3, 1e-6, 2e-3, 7.0]);
//!
//! assert_eq!(analysis.signature, Signature::new(2, 2, 1));
//! assert_eq!(analysis.suspicious.negative, vec![-5e-3]);
//! assert_eq!(analysis.suspicious.positive, vec![2e-3]);
//! ```

mod signature;

pub use signature::Signature;

use crate::error::{SigError, SigResult};

/// Eigenvalues classified as non-zero but close to the threshold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuspiciousEigenvalues {
    /// Values in `[-σ, -δ)`, ascending.
    pub negative: Vec<f64>,
    /// Values in `(δ, σ]`, ascending.
    pub positive: Vec<f64>,
}

impl SuspiciousEigenvalues {
    /// True if neither list has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.negative.is_empty() && self.positive.is_empty()
    }
}

/// Signature plus suspicious values for one eigenvalue sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analysis {
    /// The inertia.
    pub signature: Signature,
    /// Near-threshold values.
    pub suspicious: SuspiciousEigenvalues,
}

/// Classifies ascending eigenvalue sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureAnalyzer {
    zero_threshold: f64,
    suspicion_threshold: f64,
}

impl SignatureAnalyzer {
    /// Analyzer for zero threshold `delta`.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::InvalidZeroThreshold`] unless `0 <= delta < 1`.
    pub fn new(delta: f64) -> SigResult<Self> {
        if !(0.0..1.0).contains(&delta) {
            return Err(SigError::InvalidZeroThreshold(delta));
        }
        Ok(Self {
            zero_threshold: delta,
            suspicion_threshold: delta.sqrt(),
        })
    }

    /// `δ`.
    #[must_use]
    pub fn zero_threshold(&self) -> f64 {
        self.zero_threshold
    }

    /// `σ = sqrt(δ)`.
    #[must_use]
    pub fn suspicion_threshold(&self) -> f64 {
        self.suspicion_threshold
    }

    /// Classify `eigenvalues`, which must be in ascending order.
    #[must_use]
    pub fn analyze(&self, eigenvalues: &[f64]) -> Analysis {
        let delta = self.zero_threshold;
        let sigma = self.suspicion_threshold;
        let d = eigenvalues.len();

        let mut negative = eigenvalues.iter().take_while(|&&v| v < -sigma).count();
        if negative == d {
            return Analysis {
                signature: Signature::new(0, negative, 0),
                suspicious: SuspiciousEigenvalues::default(),
            };
        }

        let suspicious_negative: Vec<f64> = eigenvalues[negative..]
            .iter()
            .copied()
            .take_while(|&v| v < -delta)
            .collect();
        negative += suspicious_negative.len();
        if negative == d {
            return Analysis {
                signature: Signature::new(0, negative, 0),
                suspicious: SuspiciousEigenvalues {
                    negative: suspicious_negative,
                    positive: Vec::new(),
                },
            };
        }

        let zero = eigenvalues[negative..]
            .iter()
            .take_while(|&&v| v <= delta)
            .count();
        if negative + zero == d {
            return Analysis {
                signature: Signature::new(0, negative, zero),
                suspicious: SuspiciousEigenvalues {
                    negative: suspicious_negative,
                    positive: Vec::new(),
                },
            };
        }

        let positive = d - (negative + zero);
        let suspicious_positive = eigenvalues[negative + zero..]
            .iter()
            .copied()
            .take_while(|&v| v <= sigma)
            .collect();

        Analysis {
            signature: Signature::new(positive, negative, zero),
            suspicious: SuspiciousEigenvalues {
                negative: suspicious_negative,
                positive: suspicious_positive,
            },
        }
    }
}

/// The "interesting signature" predicate.
///
/// `Threshold(g)` accepts `(p, n, z)` iff `|p - n| >= z + g`. An explicit
/// `g = 0` is a real filter, distinct from having no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterestFilter {
    /// Every signature is interesting.
    #[default]
    All,
    /// `|p - n| >= z + g`.
    Threshold(i64),
}

impl InterestFilter {
    /// Map an optional signature parameter to a filter.
    #[must_use]
    pub fn from_parameter(parameter: Option<i64>) -> Self {
        parameter.map_or(Self::All, Self::Threshold)
    }

    /// Apply the predicate.
    #[must_use]
    pub fn accepts(&self, signature: &Signature) -> bool {
        match *self {
            Self::All => true,
            Self::Threshold(g) => {
                signature.excess() as i128 >= signature.zero as i128 + i128::from(g)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_threshold() {
        for delta in [-0.1, 1.0, 2.0, f64::NAN] {
            assert!(SignatureAnalyzer::new(delta).is_err(), "delta = {}", delta);
        }
        assert!(SignatureAnalyzer::new(0.0).is_ok());
        assert!(SignatureAnalyzer::new(0.999).is_ok());
    }

    #[test]
    fn test_all_confidently_negative() {
        let a = SignatureAnalyzer::new(1e-4).unwrap();
        let r = a.analyze(&[-3.0, -2.0, -1.0]);
        assert_eq!(r.signature, Signature::new(0, 3, 0));
        assert!(r.suspicious.is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        let a = SignatureAnalyzer::new(1e-4).unwrap();
        let r = a.analyze(&[]);
        assert_eq!(r.signature, Signature::new(0, 0, 0));
        assert!(r.suspicious.is_empty());
    }

    #[test]
    fn test_ends_in_suspicious_negative() {
        let a = SignatureAnalyzer::new(1e-4).unwrap();
        let r = a.analyze(&[-1.0, -5e-3, -2e-4]);
        assert_eq!(r.signature, Signature::new(0, 3, 0));
        assert_eq!(r.suspicious.negative, vec![-5e-3, -2e-4]);
        assert!(r.suspicious.positive.is_empty());
    }

    #[test]
    fn test_ends_in_zero() {
        let a = SignatureAnalyzer::new(1e-4).unwrap();
        let r = a.analyze(&[-1.0, -5e-3, -1e-5, 0.0, 1e-4]);
        assert_eq!(r.signature, Signature::new(0, 2, 3));
        assert_eq!(r.suspicious.negative, vec![-5e-3]);
        assert!(r.suspicious.positive.is_empty());
    }

    #[test]
    fn test_boundaries() {
        // δ = 0.25, σ = 0.5
        let a = SignatureAnalyzer::new(0.25).unwrap();
        let r = a.analyze(&[-0.5, -0.25, 0.25, 0.5, 0.6]);
        // -0.5 is not < -σ, so it is suspicious; -0.25 is not < -δ, so zero;
        // 0.25 <= δ is zero; 0.5 <= σ is suspicious; the scan stops at 0.6.
        assert_eq!(r.signature, Signature::new(2, 1, 2));
        assert_eq!(r.suspicious.negative, vec![-0.5]);
        assert_eq!(r.suspicious.positive, vec![0.5]);
    }

    #[test]
    fn test_zero_threshold_zero() {
        let a = SignatureAnalyzer::new(0.0).unwrap();
        let r = a.analyze(&[-1.0, 0.0, 0.0, 2.0]);
        assert_eq!(r.signature, Signature::new(1, 1, 2));
        assert!(r.suspicious.is_empty());
    }

    #[test]
    fn test_interest_filter_absent_accepts_everything() {
        let filter = InterestFilter::from_parameter(None);
        assert_eq!(filter, InterestFilter::All);
        assert!(filter.accepts(&Signature::new(1, 1, 5)));
        assert!(filter.accepts(&Signature::new(0, 0, 0)));
    }

    #[test]
    fn test_interest_filter_zero_is_a_real_filter() {
        let filter = InterestFilter::from_parameter(Some(0));
        assert_eq!(filter, InterestFilter::Threshold(0));
        assert!(filter.accepts(&Signature::new(2, 1, 1)));
        assert!(filter.accepts(&Signature::new(1, 1, 0)));
        assert!(!filter.accepts(&Signature::new(1, 1, 1)));
    }

    #[test]
    fn test_interest_filter_threshold() {
        let filter = InterestFilter::Threshold(2);
        assert!(filter.accepts(&Signature::new(3, 0, 1)));
        assert!(!filter.accepts(&Signature::new(3, 1, 1)));

        let negative = InterestFilter::Threshold(-1);
        assert!(negative.accepts(&Signature::new(1, 1, 1)));
        assert!(!negative.accepts(&Signature::new(1, 1, 2)));
    }
}
