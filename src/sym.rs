//! Compact storage for small symmetric matrices.
//!
//! [`SymMatrix2`] and [`SymMatrix3`] hold only the upper triangle of a
//! symmetric matrix (3 and 6 scalars). They are the input types of the
//! closed-form eigendecompositions in [`crate::linalg`] and are plain
//! `Copy` value types with no lifecycle beyond a call's stack frame.

use crate::matrix::{Matrix2, Matrix3};
use crate::traits::{FloatScalar, Scalar};

/// Symmetric 2×2 matrix `[[d1, d12], [d12, d2]]`, stored as three scalars.
///
/// ```
/// use spectris::SymMatrix2;
///
/// let a = SymMatrix2::new(2.0_f64, 1.0, 2.0);
/// let vals = a.eigenvalues();
/// assert!((vals[0] - 1.0).abs() < 1e-12);
/// assert!((vals[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymMatrix2<T> {
    pub(crate) d1: T,
    pub(crate) d12: T,
    pub(crate) d2: T,
}

impl<T: Scalar> SymMatrix2<T> {
    /// Create from the two diagonal entries and the off-diagonal entry.
    #[inline]
    pub fn new(d1: T, d12: T, d2: T) -> Self {
        Self { d1, d12, d2 }
    }

    /// Read the upper triangle of a full 2×2 matrix.
    ///
    /// The lower triangle is ignored, as in the full-matrix convenience
    /// methods ([`Matrix2::eig_symmetric`]); the caller is responsible for
    /// actual symmetry.
    #[inline]
    pub fn from_matrix(a: &Matrix2<T>) -> Self {
        Self::new(a[(0, 0)], a[(0, 1)], a[(1, 1)])
    }

    /// Expand to a full 2×2 matrix.
    pub fn to_matrix(&self) -> Matrix2<T> {
        Matrix2::new([[self.d1, self.d12], [self.d12, self.d2]])
    }

    /// Sum of the diagonal entries.
    #[inline]
    pub fn trace(&self) -> T {
        self.d1 + self.d2
    }
}

impl<T: FloatScalar> SymMatrix2<T> {
    /// Largest absolute entry.
    pub fn max_abs(&self) -> T {
        self.d1.abs().max(self.d12.abs()).max(self.d2.abs())
    }
}

/// Symmetric 3×3 matrix, stored as the diagonal `(d11, d22, d33)` plus the
/// off-diagonal entries `(d12, d13, d23)`.
///
/// ```
/// use spectris::SymMatrix3;
///
/// let a = SymMatrix3::new(1.0_f64, 2.0, 3.0, 0.0, 0.0, 0.0);
/// let vals = a.eigenvalues();
/// assert!((vals[0] - 1.0).abs() < 1e-12);
/// assert!((vals[2] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymMatrix3<T> {
    pub(crate) d11: T,
    pub(crate) d22: T,
    pub(crate) d33: T,
    pub(crate) d12: T,
    pub(crate) d13: T,
    pub(crate) d23: T,
}

impl<T: Scalar> SymMatrix3<T> {
    /// Create from the three diagonal entries and the three off-diagonal
    /// entries `(d12, d13, d23)`.
    #[inline]
    pub fn new(d11: T, d22: T, d33: T, d12: T, d13: T, d23: T) -> Self {
        Self {
            d11,
            d22,
            d33,
            d12,
            d13,
            d23,
        }
    }

    /// Read the upper triangle of a full 3×3 matrix.
    ///
    /// The lower triangle is ignored; the caller is responsible for actual
    /// symmetry.
    #[inline]
    pub fn from_matrix(a: &Matrix3<T>) -> Self {
        Self::new(
            a[(0, 0)],
            a[(1, 1)],
            a[(2, 2)],
            a[(0, 1)],
            a[(0, 2)],
            a[(1, 2)],
        )
    }

    /// Expand to a full 3×3 matrix.
    pub fn to_matrix(&self) -> Matrix3<T> {
        Matrix3::new([
            [self.d11, self.d12, self.d13],
            [self.d12, self.d22, self.d23],
            [self.d13, self.d23, self.d33],
        ])
    }

    /// Sum of the diagonal entries.
    #[inline]
    pub fn trace(&self) -> T {
        self.d11 + self.d22 + self.d33
    }
}

impl<T: FloatScalar> SymMatrix3<T> {
    /// Largest absolute entry.
    pub fn max_abs(&self) -> T {
        self.d11
            .abs()
            .max(self.d22.abs())
            .max(self.d33.abs())
            .max(self.d12.abs())
            .max(self.d13.abs())
            .max(self.d23.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix3;

    #[test]
    fn round_trip_2x2() {
        let a = SymMatrix2::new(1.0, -2.0, 3.0);
        let full = a.to_matrix();
        assert!(full.is_symmetric());
        assert_eq!(SymMatrix2::from_matrix(&full), a);
        assert_eq!(a.trace(), 4.0);
    }

    #[test]
    fn round_trip_3x3() {
        let a = SymMatrix3::new(1.0, 2.0, 3.0, 0.5, -0.5, 0.25);
        let full = a.to_matrix();
        assert!(full.is_symmetric());
        assert_eq!(SymMatrix3::from_matrix(&full), a);
        assert_eq!(a.trace(), 6.0);
    }

    #[test]
    fn from_matrix_reads_upper_triangle() {
        let full = Matrix3::new([
            [1.0, 2.0, 3.0],
            [99.0, 4.0, 5.0],
            [99.0, 99.0, 6.0],
        ]);
        let a = SymMatrix3::from_matrix(&full);
        assert_eq!(a, SymMatrix3::new(1.0, 4.0, 6.0, 2.0, 3.0, 5.0));
    }

    #[test]
    fn max_abs_entry() {
        let a = SymMatrix3::new(1.0, 2.0, 3.0, -7.0, 0.5, 0.25);
        assert_eq!(a.max_abs(), 7.0);

        let z = SymMatrix2::new(0.0_f64, 0.0, 0.0);
        assert_eq!(z.max_abs(), 0.0);
    }
}
