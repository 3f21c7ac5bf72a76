//! Evaluation of a polynomial matrix at sample-index tuples.
//!
//! Each entry is compiled once into an [`EntryEvaluator`]; sampling a tuple
//! then evaluates every entry and multiplies the matrix by `∏ t3[i_j]`.
//!
//! Two evaluation strategies produce the same matrix:
//!
//! - **Direct substitution**: indeterminate `j` is bound to `t2[i_j]` and
//!   the entry is evaluated as a polynomial.
//! - **Exponent table**: since `∏ t2[i_j]^m_j = t1[S·Σm_j - Σ i_j·m_j]`,
//!   each monomial costs integer arithmetic plus one table lookup.
//!
//! Zero entries short-circuit to 0 under both strategies.

use std::fmt;

use nalgebra::DMatrix;
use num_complex::Complex64;

use crate::error::{SigError, SigResult};
use crate::lut::LookupTables;
use crate::poly::{check_square, Polynomial, PolynomialMatrix};

/// A callable evaluating one entry at the substituted indeterminate values.
pub type EntryFn = dyn Fn(&[Complex64]) -> Complex64 + Send + Sync;

/// How polynomial entries are turned into evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationStrategy {
    /// Substitute `t2[i_j]` and evaluate.
    Direct,
    /// Sum `c·t1[k]` over monomials.
    #[default]
    ExponentTable,
}

/// Per-entry evaluator.
pub enum EntryEvaluator {
    /// Identically zero.
    Zero,
    /// Evaluate a callable at `(t2[i_1], ..., t2[i_n])`.
    Direct(Box<EntryFn>),
    /// `(exponents, coefficient)` monomials evaluated through `t1`.
    ExponentSum(Vec<(Vec<u32>, Complex64)>),
}

impl EntryEvaluator {
    /// Compile a polynomial entry under `strategy`.
    #[must_use]
    pub fn from_polynomial(p: &Polynomial, strategy: EvaluationStrategy) -> Self {
        if p.is_zero() {
            return Self::Zero;
        }
        match strategy {
            EvaluationStrategy::Direct => {
                let p = p.clone();
                Self::Direct(Box::new(move |values| p.evaluate_at(values)))
            }
            EvaluationStrategy::ExponentTable => {
                Self::ExponentSum(p.terms().map(|(m, c)| (m.to_vec(), c)).collect())
            }
        }
    }

    /// Wrap an arbitrary callable.
    pub fn direct<F>(f: F) -> Self
    where
        F: Fn(&[Complex64]) -> Complex64 + Send + Sync + 'static,
    {
        Self::Direct(Box::new(f))
    }

    fn evaluate(&self, tables: &LookupTables, indices: &[i64], values: &[Complex64]) -> Complex64 {
        match self {
            Self::Zero => Complex64::new(0.0, 0.0),
            Self::Direct(f) => f(values),
            Self::ExponentSum(terms) => {
                let steps = tables.steps() as i128;
                let period = tables.len() as i128;
                terms
                    .iter()
                    .map(|(m, c)| {
                        // Reduced mod 2S in i128; u32 exponents times 2S can exceed i64.
                        let k = m
                            .iter()
                            .zip(indices)
                            .map(|(&e, &i)| (steps - i128::from(i)) * i128::from(e))
                            .sum::<i128>()
                            .rem_euclid(period);
                        c * tables.t1(k as i64)
                    })
                    .sum()
            }
        }
    }
}

impl fmt::Debug for EntryEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "Zero"),
            Self::Direct(_) => write!(f, "Direct(..)"),
            Self::ExponentSum(terms) => f.debug_tuple("ExponentSum").field(terms).finish(),
        }
    }
}

/// Maps sample-index tuples to concrete complex matrices.
///
/// # Example
///
/// ```
/// use sig::{LookupTables, MatrixSampler, EvaluationStrategy};
/// use sig::input::InputDocument;
///
/// let matrix = InputDocument::from_json_str(
///     r#"{"indeterminates": ["x"], "matrix": [["1", "x"], ["x", "1"]]}"#,
/// ).unwrap().into_problem().unwrap();
/// let tables = LookupTables::new(4).unwrap();
/// let sampler = MatrixSampler::new(&matrix, &tables, EvaluationStrategy::Direct).unwrap();
///
/// let m = sampler.sample(&[2]).unwrap();
/// assert_eq!(m.nrows(), 2);
/// // Every entry is scaled by t3[2] = 1 - i.
/// assert!((m[(0, 0)] - tables.t3(2)).norm() < 1e-12);
/// ```
#[derive(Debug)]
pub struct MatrixSampler<'t> {
    tables: &'t LookupTables,
    dimension: usize,
    nvars: usize,
    evaluators: Vec<EntryEvaluator>,
}

impl<'t> MatrixSampler<'t> {
    /// Compile every entry of `matrix` under `strategy`.
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`MatrixSampler::from_evaluators`].
    pub fn new(
        matrix: &PolynomialMatrix,
        tables: &'t LookupTables,
        strategy: EvaluationStrategy,
    ) -> SigResult<Self> {
        let d = matrix.dimension();
        let mut rows: Vec<Vec<EntryEvaluator>> = Vec::with_capacity(d);
        for r in 0..d {
            rows.push(
                (0..d)
                    .filter_map(|c| matrix.entry(r, c))
                    .map(|p| EntryEvaluator::from_polynomial(p, strategy))
                    .collect(),
            );
        }
        Self::from_evaluators(matrix.indeterminate_count(), tables, rows)
    }

    /// Build from explicit evaluators, one row at a time.
    ///
    /// # Errors
    ///
    /// - [`SigError::InvalidDimension`] if `nvars` is zero
    /// - [`SigError::EmptyMatrix`] / [`SigError::NonSquareMatrix`] on bad shape
    /// - [`SigError::ExponentLength`] if a monomial has the wrong length
    pub fn from_evaluators(
        nvars: usize,
        tables: &'t LookupTables,
        rows: Vec<Vec<EntryEvaluator>>,
    ) -> SigResult<Self> {
        if nvars == 0 {
            return Err(SigError::InvalidDimension(nvars));
        }
        check_square(&rows)?;

        let dimension = rows.len();
        let evaluators: Vec<EntryEvaluator> = rows.into_iter().flatten().collect();
        for evaluator in &evaluators {
            if let EntryEvaluator::ExponentSum(terms) = evaluator {
                if let Some((m, _)) = terms.iter().find(|(m, _)| m.len() != nvars) {
                    return Err(SigError::ExponentLength {
                        expected: nvars,
                        found: m.len(),
                    });
                }
            }
        }

        Ok(Self {
            tables,
            dimension,
            nvars,
            evaluators,
        })
    }

    /// Matrix dimension `d`.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indeterminates `n`.
    #[must_use]
    pub fn indeterminate_count(&self) -> usize {
        self.nvars
    }

    /// The shared lookup tables.
    #[must_use]
    pub fn tables(&self) -> &'t LookupTables {
        self.tables
    }

    /// Evaluate the matrix at one sample-index tuple.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::IndexLength`] if `indices` does not have one entry
    /// per indeterminate.
    pub fn sample(&self, indices: &[i64]) -> SigResult<DMatrix<Complex64>> {
        if indices.len() != self.nvars {
            return Err(SigError::IndexLength {
                expected: self.nvars,
                found: indices.len(),
            });
        }

        let point = self.tables.sample_point(indices);
        let d = self.dimension;
        let mut mat = DMatrix::from_fn(d, d, |r, c| {
            self.evaluators[r * d + c].evaluate(self.tables, indices, &point.substitution)
        });
        mat *= point.scale;
        Ok(mat)
    }
}
