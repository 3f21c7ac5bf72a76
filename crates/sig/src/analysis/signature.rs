//! Signature (inertia) of a Hermitian matrix.

use std::fmt;

/// Counts of positive, negative and zero eigenvalues.
///
/// # Example
///
/// ```
/// use sig::Signature;
///
/// let sig = Signature::new(2, 1, 0);
/// assert_eq!(sig.dimension(), 3);
/// assert_eq!(sig.excess(), 1);
/// assert_eq!(sig.to_string(), "(2, 1, 0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    /// Strictly positive eigenvalues.
    pub positive: usize,

    /// Strictly negative eigenvalues.
    pub negative: usize,

    /// Eigenvalues within the zero threshold.
    pub zero: usize,
}

impl Signature {
    /// Build a signature from `(p, n, z)`.
    #[must_use]
    pub const fn new(positive: usize, negative: usize, zero: usize) -> Self {
        Self {
            positive,
            negative,
            zero,
        }
    }

    /// Total number of eigenvalues, `p + n + z`.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.positive + self.negative + self.zero
    }

    /// `|p - n|`.
    #[must_use]
    pub const fn excess(&self) -> usize {
        self.positive.abs_diff(self.negative)
    }

    /// True if no eigenvalue was classified as zero.
    #[must_use]
    pub const fn is_nondegenerate(&self) -> bool {
        self.zero == 0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.positive, self.negative, self.zero)
    }
}
