//! Enumeration of sample-index tuples.
//!
//! A sweep visits n-tuples of circle indices. Without a periodicity
//! parameter the first coordinate only runs over the upper half circle
//! `1..=S` (a point and its antipode give the same inertia), and every other
//! coordinate runs over the full range
//!
//! ```text
//! 1, 2, ..., S, -(S-1), ..., -1
//! ```
//!
//! With a periodicity parameter `r` the first two coordinates are
//! restricted to the pairs
//!
//! ```text
//! i2 = ((m - i1 + n - 1) mod 2n) - n + 1,   m ∈ {r} if n | r, else {r, -r}
//! ```
//!
//! where `n` is the number of indeterminates.
//!
//! [`IndexSweep`] is an iterator factory: [`IndexSweep::iter`] starts a
//! fresh traversal every time it is called.

use std::fmt;
use std::ops::Deref;

use crate::error::{SigError, SigResult};
use crate::lut::LookupTables;

/// One evaluation point: a circle index per indeterminate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleIndex(Vec<i64>);

impl SampleIndex {
    /// The indices as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Consume into the underlying vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}

impl From<Vec<i64>> for SampleIndex {
    fn from(indices: Vec<i64>) -> Self {
        Self(indices)
    }
}

impl Deref for SampleIndex {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.0
    }
}

impl fmt::Display for SampleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (j, i) in self.0.iter().enumerate() {
            if j > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", i)?;
        }
        write!(f, ")")
    }
}

/// Restartable generator of sample-index tuples.
///
/// # Example
///
/// ```
/// use sig::IndexSweep;
///
/// let sweep = IndexSweep::new(2, 3, None).unwrap();
/// assert_eq!(sweep.len(), 15);
///
/// let first: Vec<Vec<i64>> = sweep.iter().take(4).map(|s| s.into_inner()).collect();
/// assert_eq!(first, vec![vec![1, 1], vec![1, 2], vec![1, 3], vec![1, -2]]);
///
/// // A second traversal starts from the beginning again.
/// assert_eq!(sweep.iter().next().unwrap().as_slice(), &[1, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSweep {
    dimension: usize,
    steps: usize,
    periodicity: Option<i64>,
    heads: Vec<Vec<i64>>,
    tail: usize,
    count: usize,
}

impl IndexSweep {
    /// Build a sweep over `dimension`-tuples at resolution `steps`.
    ///
    /// # Errors
    ///
    /// - [`SigError::InvalidDimension`] if `dimension` is zero
    /// - [`SigError::InvalidSteps`] if `steps` is zero
    /// - [`SigError::SweepTooLarge`] if the number of tuples overflows `usize`
    pub fn new(dimension: usize, steps: usize, periodicity: Option<i64>) -> SigResult<Self> {
        if dimension == 0 {
            return Err(SigError::InvalidDimension(dimension));
        }
        if steps == 0 {
            return Err(SigError::InvalidSteps(steps));
        }
        let too_large = || SigError::SweepTooLarge { dimension, steps };
        let full_range_len = steps.checked_mul(2).ok_or_else(too_large)? - 1;
        let s = i64::try_from(steps).map_err(|_| too_large())?;

        let upper = 1..=s;
        let heads: Vec<Vec<i64>> = match periodicity {
            Some(r) if dimension >= 2 => {
                let n = i128::try_from(dimension).map_err(|_| too_large())?;
                let r = i128::from(r);
                let rr = if r.rem_euclid(n) == 0 { vec![r] } else { vec![r, -r] };
                upper
                    .flat_map(|i1| {
                        rr.iter().map(move |&m| {
                            // Lies in (-n, n], so it fits whenever `dimension` does.
                            let i2 = (m - i128::from(i1) + n - 1).rem_euclid(2 * n) - n + 1;
                            vec![i1, i2 as i64]
                        })
                    })
                    .collect()
            }
            _ => upper.map(|i1| vec![i1]).collect(),
        };
        let tail = dimension - heads.first().map_or(1, Vec::len);
        let count = u32::try_from(tail)
            .ok()
            .and_then(|tail| full_range_len.checked_pow(tail))
            .and_then(|tails| tails.checked_mul(heads.len()))
            .ok_or_else(too_large)?;

        Ok(Self {
            dimension,
            steps,
            periodicity,
            heads,
            tail,
            count,
        })
    }

    /// Build a sweep whose index ranges follow the resolution of `tables`.
    ///
    /// # Errors
    ///
    /// Returns [`SigError::InvalidDimension`] if `dimension` is zero.
    pub fn from_tables(
        dimension: usize,
        tables: &LookupTables,
        periodicity: Option<i64>,
    ) -> SigResult<Self> {
        Self::new(dimension, tables.steps(), periodicity)
    }

    /// Start a fresh traversal.
    #[must_use]
    pub fn iter(&self) -> SampleIndices<'_> {
        SampleIndices {
            sweep: self,
            head: 0,
            digits: vec![0; self.tail],
            remaining: self.len(),
        }
    }

    /// Total number of tuples one traversal yields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if a traversal yields nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of coordinates per tuple.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The sampling resolution.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The periodicity parameter, if any.
    #[must_use]
    pub fn periodicity(&self) -> Option<i64> {
        self.periodicity
    }

    fn full_range_len(&self) -> usize {
        2 * self.steps - 1
    }

    /// Value of the `d`-th element of `1..=S` followed by `-(S-1)..=-1`.
    fn full_range_value(&self, d: usize) -> i64 {
        if d < self.steps {
            d as i64 + 1
        } else {
            d as i64 - self.full_range_len() as i64
        }
    }
}

impl<'a> IntoIterator for &'a IndexSweep {
    type Item = SampleIndex;
    type IntoIter = SampleIndices<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One traversal of an [`IndexSweep`].
///
/// The leading coordinates come from the precomputed head list, the rest
/// from an odometer whose last digit turns fastest.
#[derive(Debug, Clone)]
pub struct SampleIndices<'a> {
    sweep: &'a IndexSweep,
    head: usize,
    digits: Vec<usize>,
    remaining: usize,
}

impl SampleIndices<'_> {
    fn advance(&mut self) {
        let base = self.sweep.full_range_len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }
        self.head += 1;
    }
}

impl Iterator for SampleIndices<'_> {
    type Item = SampleIndex;

    fn next(&mut self) -> Option<SampleIndex> {
        if self.remaining == 0 {
            return None;
        }
        let head = self.sweep.heads.get(self.head)?;

        let mut indices = Vec::with_capacity(self.sweep.dimension);
        indices.extend_from_slice(head);
        indices.extend(self.digits.iter().map(|&d| self.sweep.full_range_value(d)));

        self.advance();
        self.remaining -= 1;
        Some(SampleIndex(indices))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SampleIndices<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(sweep: &IndexSweep) -> Vec<Vec<i64>> {
        sweep.iter().map(SampleIndex::into_inner).collect()
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        assert!(matches!(
            IndexSweep::new(0, 3, None),
            Err(SigError::InvalidDimension(0))
        ));
        assert!(matches!(
            IndexSweep::new(2, 0, None),
            Err(SigError::InvalidSteps(0))
        ));
    }

    #[test]
    fn test_rejects_uncountable_sweep() {
        // 1999^6 * 1000 does not fit in 64 bits.
        assert!(matches!(
            IndexSweep::new(7, 1000, None),
            Err(SigError::SweepTooLarge { dimension: 7, steps: 1000 })
        ));
        assert!(matches!(
            IndexSweep::new(2, usize::MAX, None),
            Err(SigError::SweepTooLarge { dimension: 2, .. })
        ));

        // One step keeps every coordinate fixed, whatever the dimension.
        let sweep = IndexSweep::new(1000, 1, None).unwrap();
        assert_eq!(sweep.len(), 1);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_large_sweep_counts_without_enumerating() {
        let sweep = IndexSweep::new(5, 1000, None).unwrap();
        assert_eq!(sweep.len(), 1000 * 1999usize.pow(4));
        assert_eq!(sweep.iter().len(), sweep.len());
    }

    #[test]
    fn test_single_indeterminate() {
        let sweep = IndexSweep::new(1, 4, None).unwrap();
        assert_eq!(collect(&sweep), vec![vec![1], vec![2], vec![3], vec![4]]);
    }

    #[test]
    fn test_single_indeterminate_ignores_periodicity() {
        for r in [-3, 0, 1, 2, 7] {
            let sweep = IndexSweep::new(1, 4, Some(r)).unwrap();
            assert_eq!(collect(&sweep), vec![vec![1], vec![2], vec![3], vec![4]]);
        }
    }

    #[test]
    fn test_pairs_without_periodicity() {
        let sweep = IndexSweep::new(2, 3, None).unwrap();
        let mut expected = Vec::new();
        for i1 in [1, 2, 3] {
            for i2 in [1, 2, 3, -2, -1] {
                expected.push(vec![i1, i2]);
            }
        }
        assert_eq!(collect(&sweep), expected);
        assert_eq!(sweep.len(), 15);
    }

    #[test]
    fn test_triples_count() {
        let sweep = IndexSweep::new(3, 4, None).unwrap();
        assert_eq!(sweep.len(), 4 * 7 * 7);
        assert_eq!(sweep.iter().count(), 4 * 7 * 7);
        assert_eq!(sweep.iter().last().unwrap().as_slice(), &[4, -1, -1]);
    }

    #[test]
    fn test_one_step_full_range_is_single_point() {
        let sweep = IndexSweep::new(3, 1, None).unwrap();
        assert_eq!(collect(&sweep), vec![vec![1, 1, 1]]);
    }

    #[test]
    fn test_periodic_pairs_odd_parameter() {
        // n = 2, r = 1: 1 is not a multiple of 2, so m ∈ {1, -1}.
        let sweep = IndexSweep::new(2, 3, Some(1)).unwrap();
        assert_eq!(
            collect(&sweep),
            vec![
                vec![1, 0],
                vec![1, 2],
                vec![2, -1],
                vec![2, 1],
                vec![3, 2],
                vec![3, 0],
            ]
        );
    }

    #[test]
    fn test_periodic_pairs_even_parameter() {
        // n = 2, r = 2: a multiple of 2, so m ∈ {2}.
        let sweep = IndexSweep::new(2, 3, Some(2)).unwrap();
        assert_eq!(collect(&sweep), vec![vec![1, 1], vec![2, 0], vec![3, -1]]);
    }

    #[test]
    fn test_periodic_modulus_uses_indeterminate_count() {
        // The pair rule depends on n, not on S: i2 stays in -1..=2 for
        // n = 2 however large S is.
        let sweep = IndexSweep::new(2, 10, Some(3)).unwrap();
        assert_eq!(sweep.len(), 20);
        assert!(sweep.iter().all(|s| (-1..=2).contains(&s[1])));
    }

    #[test]
    fn test_periodic_triples() {
        // n = 3, r = 3: multiple of 3, i2 = ((3 - i1 + 2) mod 6) - 2.
        let sweep = IndexSweep::new(3, 2, Some(3)).unwrap();
        assert_eq!(
            collect(&sweep),
            vec![
                vec![1, 2, 1],
                vec![1, 2, 2],
                vec![1, 2, -1],
                vec![2, 1, 1],
                vec![2, 1, 2],
                vec![2, 1, -1],
            ]
        );
    }

    #[test]
    fn test_periodic_extreme_parameter() {
        for r in [i64::MIN, i64::MAX] {
            let sweep = IndexSweep::new(3, 2, Some(r)).unwrap();
            assert_eq!(sweep.len(), 2 * 2 * 3);
            assert!(sweep.iter().all(|s| (-2..=3).contains(&s[1])));
        }
    }

    #[test]
    fn test_periodic_negative_parameter() {
        // n = 3, r = -1: m ∈ {-1, 1}.
        let sweep = IndexSweep::new(3, 1, Some(-1)).unwrap();
        assert_eq!(collect(&sweep), vec![vec![1, -2, 1], vec![1, 0, 1]]);
    }

    #[test]
    fn test_restartable() {
        let sweep = IndexSweep::new(2, 2, Some(1)).unwrap();
        assert_eq!(collect(&sweep), collect(&sweep));
    }

    #[test]
    fn test_exact_size() {
        let sweep = IndexSweep::new(2, 3, None).unwrap();
        let mut iter = sweep.iter();
        assert_eq!(iter.len(), 15);
        iter.next();
        assert_eq!(iter.len(), 14);
    }

    #[test]
    fn test_display() {
        assert_eq!(SampleIndex::from(vec![2]).to_string(), "(2)");
        assert_eq!(SampleIndex::from(vec![1, -3, 2]).to_string(), "(1, -3, 2)");
    }
}
