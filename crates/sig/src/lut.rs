//! Precomputed root-of-unity lookup tables.
//!
//! Every sample point of a sweep lies on the unit circle at an angle that is
//! a multiple of `π/S`, where `S` is the sampling resolution (`steps`). The
//! tables are built once per run and shared read-only by the sampler, so
//! the hot loop never calls `exp`.
//!
//! # Tables Provided
//!
//! - **t1**: `t1[k] = exp(iπk/S)`, the full circle at step `π/S`
//! - **t2**: `t2[k] = -conj(t1[k])`, the value bound to an indeterminate
//! - **t3**: `t3[k] = 1 - t1[k]`, the per-coordinate scale factor
//!
//! Each table holds `2S` entries. Logical indices wrap modulo `2S`, so
//! negative indices `-(S-1)..=-1` address the lower half circle.
//!
//! # Example
//!
//! ```
//! use sig::lut::LookupTables;
//!
//! let tables = LookupTables::new(4).unwrap();
//! assert_eq!(tables.len(), 8);
//! assert_eq!(tables.t1(0).re, 1.0);
//! assert_eq!(tables.t1(4).re, -1.0);
//!
//! // Negative indices wrap: -1 is position 7.
//! assert_eq!(tables.t1(-1), tables.t1(7));
//! assert_eq!(tables.t1(7), tables.t1(1).conj());
//! ```

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::{SigError, SigResult};

/// The three root-of-unity tables for one sampling resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTables {
    steps: usize,
    t1: Vec<Complex64>,
    t2: Vec<Complex64>,
    t3: Vec<Complex64>,
}

impl LookupTables {
    /// Build the tables for `steps` subdivisions of the half circle.
    ///
    /// The upper half circle is computed by exponentiation and renormalised
    /// to unit magnitude; the lower half is the exact conjugate mirror.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::InvalidSteps`] if `steps` is zero.
    pub fn new(steps: usize) -> SigResult<Self> {
        if steps == 0 {
            return Err(SigError::InvalidSteps(steps));
        }

        let len = 2 * steps;
        let mut t1 = vec![Complex64::new(0.0, 0.0); len];
        t1[0] = Complex64::new(1.0, 0.0);
        for k in 1..steps {
            let z = Complex64::new(0.0, PI * k as f64 / steps as f64).exp();
            t1[k] = z / z.norm();
        }
        t1[steps] = Complex64::new(-1.0, 0.0);
        for k in 1..steps {
            t1[len - k] = t1[k].conj();
        }

        let t2 = t1.iter().map(|z| -z.conj()).collect();
        let t3 = t1.iter().map(|z| Complex64::new(1.0, 0.0) - z).collect();

        Ok(Self { steps, t1, t2, t3 })
    }

    /// The sampling resolution `S`.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of entries per table (`2S`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.t1.len()
    }

    /// Always false; tables hold at least two entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t1.is_empty()
    }

    /// Array position of logical index `k` (Euclidean remainder mod `2S`).
    #[inline]
    #[must_use]
    pub fn position(&self, k: i64) -> usize {
        k.rem_euclid(self.len() as i64) as usize
    }

    /// O(1) lookup of `exp(iπk/S)`.
    #[inline]
    #[must_use]
    pub fn t1(&self, k: i64) -> Complex64 {
        self.t1[self.position(k)]
    }

    /// O(1) lookup of `-conj(t1[k])`.
    #[inline]
    #[must_use]
    pub fn t2(&self, k: i64) -> Complex64 {
        self.t2[self.position(k)]
    }

    /// O(1) lookup of `1 - t1[k]`.
    #[inline]
    #[must_use]
    pub fn t3(&self, k: i64) -> Complex64 {
        self.t3[self.position(k)]
    }

    /// Resolve a sample-index tuple into its circle values and scale factor.
    #[must_use]
    pub fn sample_point(&self, indices: &[i64]) -> SamplePoint {
        SamplePoint {
            circle: indices.iter().map(|&k| self.t1(k)).collect(),
            substitution: indices.iter().map(|&k| self.t2(k)).collect(),
            scale: self.scale(indices),
        }
    }

    /// The matrix scale factor `∏ t3[i_j]` for a sample-index tuple.
    #[must_use]
    pub fn scale(&self, indices: &[i64]) -> Complex64 {
        indices
            .iter()
            .fold(Complex64::new(1.0, 0.0), |acc, &k| acc * self.t3(k))
    }
}

/// Table values resolved for one sample-index tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoint {
    /// `t1[i_j]` for every coordinate.
    pub circle: Vec<Complex64>,
    /// `t2[i_j]` for every coordinate: the values bound to the indeterminates.
    pub substitution: Vec<Complex64>,
    /// `∏ t3[i_j]`.
    pub scale: Complex64,
}
