//! Hermitian diagnostics and hermitianization.
//!
//! Sampled matrices are Hermitian in exact arithmetic, up to the scalar
//! factor, but rounding leaves them slightly off. The driver always
//! replaces a sample `M` by `M + Mᴴ` before the eigenvalue solve; the
//! relative check here only reports matrices that were far from Hermitian to
//! begin with.

use nalgebra::DMatrix;
use num_complex::Complex64;

/// Default relative discrepancy accepted by [`is_hermitian`].
pub const DEFAULT_HERMITIAN_TOLERANCE: f64 = 1e-10;

/// `M + Mᴴ`, an exactly Hermitian matrix.
#[must_use]
pub fn hermitianize(m: &DMatrix<Complex64>) -> DMatrix<Complex64> {
    m + m.adjoint()
}

/// True if `m` is within `relative_limit` of being Hermitian.
///
/// The discrepancy `D = M - Mᴴ` and `M` itself are measured by the sum of
/// the 1-norms and ∞-norms of their real and imaginary parts.
///
/// # Example
///
/// ```
/// use nalgebra::DMatrix;
/// use sig::Complex64;
/// use sig::hermitian::is_hermitian;
///
/// let m = DMatrix::from_row_slice(2, 2, &[
///     Complex64::new(1.0, 0.0), Complex64::new(1.0, 2.0),
///     Complex64::new(1.0, -2.0), Complex64::new(3.0, 0.0),
/// ]);
/// assert!(is_hermitian(&m, 1e-10));
/// ```
#[must_use]
pub fn is_hermitian(m: &DMatrix<Complex64>, relative_limit: f64) -> bool {
    let discrepancy = m - m.adjoint();
    norm_scale(&discrepancy) <= relative_limit * norm_scale(m)
}

fn norm_scale(m: &DMatrix<Complex64>) -> f64 {
    let re = m.map(|z| z.re);
    let im = m.map(|z| z.im);
    one_norm(&re) + inf_norm(&re) + one_norm(&im) + inf_norm(&im)
}

/// Maximum absolute column sum.
fn one_norm(m: &DMatrix<f64>) -> f64 {
    m.column_iter()
        .map(|col| col.iter().map(|x| x.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Maximum absolute row sum.
fn inf_norm(m: &DMatrix<f64>) -> f64 {
    m.row_iter()
        .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m2(a: (f64, f64), b: (f64, f64), c: (f64, f64), d: (f64, f64)) -> DMatrix<Complex64> {
        DMatrix::from_row_slice(
            2,
            2,
            &[
                Complex64::new(a.0, a.1),
                Complex64::new(b.0, b.1),
                Complex64::new(c.0, c.1),
                Complex64::new(d.0, d.1),
            ],
        )
    }

    #[test]
    fn test_exactly_hermitian() {
        let m = m2((1.0, 0.0), (1.0, 2.0), (1.0, -2.0), (3.0, 0.0));
        assert!(is_hermitian(&m, 1e-10));
    }

    #[test]
    fn test_almost_hermitian() {
        let off_diagonal = m2((1.0, 0.0), (1.0, 2.0), (1.0, -2.00000000001), (3.0, 0.0));
        let diagonal = m2((1.0, 0.0), (1.0, 2.0), (1.0, -2.0), (3.0, 0.00000000001));

        assert!(is_hermitian(&off_diagonal, 1e-10));
        assert!(is_hermitian(&diagonal, 1e-10));
        assert!(!is_hermitian(&off_diagonal, 1e-12));
        assert!(!is_hermitian(&diagonal, 1e-12));
    }

    #[test]
    fn test_not_hermitian() {
        assert!(!is_hermitian(&m2((1.0, 0.0), (1.0, 2.0), (1.0, -2.1), (3.0, 0.0)), 1e-10));
        assert!(!is_hermitian(&m2((1.0, 0.0), (1.0, 2.0), (1.0, -2.0), (3.0, 0.1)), 1e-10));
        assert!(!is_hermitian(&m2((0.0, 1.0), (1.0, 0.0), (1.0, 0.0), (0.0, -1.0)), 1e-10));
    }

    #[test]
    fn test_hermitianize_is_exact() {
        let m = m2((1.0, 0.3), (2.0, -1.0), (0.5, 4.0), (-3.0, 0.2));
        let h = hermitianize(&m);
        assert_eq!(h, h.adjoint());
        assert!(h.diagonal().iter().all(|z| z.im == 0.0));
        assert_eq!(hermitianize(&h), h.map(|z| z * 2.0));
    }
}
