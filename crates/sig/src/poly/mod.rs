//! Sparse multivariate polynomials with complex coefficients.
//!
//! A [`Polynomial`] maps exponent vectors to coefficients. Zero coefficients
//! are never stored, so the zero polynomial is the empty map and
//! [`Polynomial::is_zero`] is O(1).
//!
//! # Example
//!
//! ```
//! use sig::poly::{parse, Polynomial};
//!
//! let names = vec!["x".to_string(), "y".to_string()];
//! let p = parse("(x + y)^2 - 2*x*y", &names).unwrap();
//!
//! let expected = parse("x**2 + y**2", &names).unwrap();
//! assert_eq!(p, expected);
//! assert!(parse("x - x", &names).unwrap().is_zero());
//! ```

mod parser;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::{Add, Neg, Sub};

use num_complex::Complex64;

use crate::error::{SigError, SigResult};

pub use parser::parse;

/// A polynomial in a fixed number of indeterminates.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    nvars: usize,
    terms: BTreeMap<Vec<u32>, Complex64>,
}

impl Polynomial {
    /// The zero polynomial.
    #[must_use]
    pub fn zero(nvars: usize) -> Self {
        Self {
            nvars,
            terms: BTreeMap::new(),
        }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(nvars: usize, c: Complex64) -> Self {
        let mut p = Self::zero(nvars);
        p.add_term(vec![0; nvars], c);
        p
    }

    /// The `j`-th indeterminate.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::ExponentLength`] if `j` is out of range.
    pub fn variable(nvars: usize, j: usize) -> SigResult<Self> {
        if j >= nvars {
            return Err(SigError::ExponentLength {
                expected: nvars,
                found: j + 1,
            });
        }
        let mut exponents = vec![0; nvars];
        exponents[j] = 1;
        let mut p = Self::zero(nvars);
        p.add_term(exponents, Complex64::new(1.0, 0.0));
        Ok(p)
    }

    /// Build from `(exponents, coefficient)` pairs; like terms are combined.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::ExponentLength`] if an exponent vector does not
    /// have length `nvars`.
    pub fn from_terms<I>(nvars: usize, terms: I) -> SigResult<Self>
    where
        I: IntoIterator<Item = (Vec<u32>, Complex64)>,
    {
        let mut p = Self::zero(nvars);
        for (exponents, c) in terms {
            if exponents.len() != nvars {
                return Err(SigError::ExponentLength {
                    expected: nvars,
                    found: exponents.len(),
                });
            }
            p.add_term(exponents, c);
        }
        Ok(p)
    }

    /// Number of indeterminates.
    #[must_use]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// True for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The value of a constant polynomial, `None` otherwise.
    #[must_use]
    pub fn as_constant(&self) -> Option<Complex64> {
        match self.terms.len() {
            0 => Some(Complex64::new(0.0, 0.0)),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(m, _)| m.iter().all(|&e| e == 0))
                .map(|(_, &c)| c),
            _ => None,
        }
    }

    /// Iterate over `(exponents, coefficient)` in exponent order.
    pub fn terms(&self) -> impl Iterator<Item = (&[u32], Complex64)> + '_ {
        self.terms.iter().map(|(m, &c)| (m.as_slice(), c))
    }

    /// Number of monomials.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Multiply every coefficient by `c`.
    #[must_use]
    pub fn scale(&self, c: Complex64) -> Self {
        let mut scaled = Self::zero(self.nvars);
        for (m, &a) in &self.terms {
            scaled.add_term(m.clone(), a * c);
        }
        scaled
    }

    /// Product of two polynomials, `None` if an exponent overflows `u32`.
    #[must_use]
    pub fn checked_mul(&self, other: &Polynomial) -> Option<Polynomial> {
        let mut product = Polynomial::zero(self.nvars);
        for (ma, &a) in &self.terms {
            for (mb, &b) in &other.terms {
                let m = ma
                    .iter()
                    .zip(mb)
                    .map(|(x, y)| x.checked_add(*y))
                    .collect::<Option<Vec<u32>>>()?;
                product.add_term(m, a * b);
            }
        }
        Some(product)
    }

    /// Raise to a non-negative integer power by repeated squaring.
    ///
    /// Returns `None` if an exponent of the result overflows `u32`.
    #[must_use]
    pub fn checked_pow(&self, mut exp: u32) -> Option<Self> {
        let mut result = Self::constant(self.nvars, Complex64::new(1.0, 0.0));
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Some(result)
    }

    /// Evaluate with indeterminate `j` bound to `values[j]`.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::IndexLength`] if `values` does not hold one value
    /// per indeterminate.
    pub fn evaluate(&self, values: &[Complex64]) -> SigResult<Complex64> {
        if values.len() != self.nvars {
            return Err(SigError::IndexLength {
                expected: self.nvars,
                found: values.len(),
            });
        }
        Ok(self.evaluate_at(values))
    }

    /// Evaluation without the length check; `values` must hold `nvars` items.
    pub(crate) fn evaluate_at(&self, values: &[Complex64]) -> Complex64 {
        self.terms
            .iter()
            .map(|(m, &c)| {
                m.iter()
                    .zip(values)
                    .fold(c, |acc, (&e, z)| acc * z.powu(e))
            })
            .sum()
    }

    fn add_term(&mut self, exponents: Vec<u32>, c: Complex64) {
        let zero = Complex64::new(0.0, 0.0);
        match self.terms.entry(exponents) {
            Entry::Vacant(e) => {
                if c != zero {
                    e.insert(c);
                }
            }
            Entry::Occupied(mut e) => {
                *e.get_mut() += c;
                if *e.get() == zero {
                    e.remove();
                }
            }
        }
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, other: &Polynomial) -> Polynomial {
        let mut sum = self.clone();
        for (m, &c) in &other.terms {
            sum.add_term(m.clone(), c);
        }
        sum
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, other: &Polynomial) -> Polynomial {
        self + &(-other)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(Complex64::new(-1.0, 0.0))
    }
}

/// A square matrix of polynomials over a named indeterminate set.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialMatrix {
    indeterminates: Vec<String>,
    entries: Vec<Vec<Polynomial>>,
}

impl PolynomialMatrix {
    /// Assemble a matrix, validating shape and exponent lengths.
    ///
    /// # Errors
    ///
    /// - [`SigError::InvalidDimension`] if there are no indeterminates
    /// - [`SigError::DuplicateIndeterminate`] if a name repeats
    /// - [`SigError::EmptyMatrix`] / [`SigError::NonSquareMatrix`] on bad shape
    /// - [`SigError::ExponentLength`] if an entry has a different `nvars`
    pub fn new(indeterminates: Vec<String>, entries: Vec<Vec<Polynomial>>) -> SigResult<Self> {
        if indeterminates.is_empty() {
            return Err(SigError::InvalidDimension(0));
        }
        for (j, name) in indeterminates.iter().enumerate() {
            if indeterminates[..j].contains(name) {
                return Err(SigError::DuplicateIndeterminate(name.clone()));
            }
        }
        check_square(&entries)?;

        let n = indeterminates.len();
        if let Some(p) = entries.iter().flatten().find(|p| p.nvars() != n) {
            return Err(SigError::ExponentLength {
                expected: n,
                found: p.nvars(),
            });
        }

        Ok(Self {
            indeterminates,
            entries,
        })
    }

    /// Indeterminate names, in coordinate order.
    #[must_use]
    pub fn indeterminates(&self) -> &[String] {
        &self.indeterminates
    }

    /// Number of indeterminates `n`.
    #[must_use]
    pub fn indeterminate_count(&self) -> usize {
        self.indeterminates.len()
    }

    /// Matrix dimension `d`.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.entries.len()
    }

    /// Entry at `(row, col)`.
    #[must_use]
    pub fn entry(&self, row: usize, col: usize) -> Option<&Polynomial> {
        self.entries.get(row).and_then(|r| r.get(col))
    }

    /// Row-major iteration over all entries.
    pub fn entries(&self) -> impl Iterator<Item = &Polynomial> + '_ {
        self.entries.iter().flatten()
    }
}

/// Check that `rows` is a non-empty square array.
pub(crate) fn check_square<T>(rows: &[Vec<T>]) -> SigResult<()> {
    if rows.is_empty() {
        return Err(SigError::EmptyMatrix);
    }
    let d = rows.len();
    match rows.iter().position(|r| r.len() != d) {
        Some(row) => Err(SigError::NonSquareMatrix {
            row,
            found: rows[row].len(),
            expected: d,
        }),
        None => Ok(()),
    }
}
