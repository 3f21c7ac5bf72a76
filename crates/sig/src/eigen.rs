//! Spectrum of Hermitian sample matrices.

use nalgebra::{DMatrix, SymmetricEigen};
use num_complex::Complex64;

/// Iteration cap handed to the Hermitian eigensolver.
pub const MAX_SOLVER_ITERATIONS: usize = 10_000;

/// Eigenvalues of a Hermitian matrix in ascending order.
///
/// Only the lower triangle of `m` is read. Entries are not checked for
/// finiteness. Returns `None` if the solver does not converge within
/// [`MAX_SOLVER_ITERATIONS`].
///
/// # Example
///
/// ```
/// use nalgebra::DMatrix;
/// use sig::Complex64;
/// use sig::eigen::ascending_eigenvalues;
///
/// let m = DMatrix::from_row_slice(2, 2, &[
///     Complex64::new(2.0, 0.0), Complex64::new(0.0, 1.0),
///     Complex64::new(0.0, -1.0), Complex64::new(2.0, 0.0),
/// ]);
/// let values = ascending_eigenvalues(m).unwrap();
/// assert!((values[0] - 1.0).abs() < 1e-12);
/// assert!((values[1] - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn ascending_eigenvalues(m: DMatrix<Complex64>) -> Option<Vec<f64>> {
    let eigen = SymmetricEigen::try_new(m, f64::EPSILON, MAX_SOLVER_ITERATIONS)?;
    let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    values.sort_by(f64::total_cmp);
    Some(values)
}
