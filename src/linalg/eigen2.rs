use crate::matrix::Matrix2;
use crate::sym::SymMatrix2;
use crate::traits::FloatScalar;
use crate::Matrix;

// ── 2×2 symmetric rotation kernel ───────────────────────────────────

/// Annihilate the off-diagonal entry of `[[d1, d12], [d12, d2]]`,
/// returning the two eigenvalues in the diagonal positions (unsorted).
///
/// Stable tangent formula from Parlett, "The Symmetric Eigenvalue
/// Problem", pp. 189-190: the tangent of the rotation angle is computed
/// from `zeta = (d2 - d1) / (2 d12)` without squaring `zeta` once it is
/// large enough that `1 + zeta^2` would lose it, so nothing cancels even
/// when `d1` and `d2` are nearly equal or `d12` is tiny.
pub(crate) fn eigenvalues_2s<T: FloatScalar>(d12: T, mut d1: T, mut d2: T) -> (T, T) {
    if d12 != T::zero() {
        let zeta = (d2 - d1) / (d12 + d12);
        let t = if zeta.abs() < (T::one() / T::epsilon()).sqrt() {
            d12 * (T::one() / (zeta.abs() + (T::one() + zeta * zeta).sqrt())).copysign(zeta)
        } else {
            d12 * (T::from_f64(0.5) / zeta.abs()).copysign(zeta)
        };
        d1 = d1 - t;
        d2 = d2 + t;
    }
    (d1, d2)
}

/// Like [`eigenvalues_2s`], additionally returning the rotation `(c, s)`
/// whose columns `(c, -s)` and `(s, c)` are the eigenvectors of the first
/// and second returned eigenvalue.
pub(crate) fn eigensystem_2s<T: FloatScalar>(d12: T, mut d1: T, mut d2: T) -> (T, T, T, T) {
    if d12 == T::zero() {
        return (d1, d2, T::one(), T::zero());
    }

    let zeta = (d2 - d1) / (d12 + d12);
    let mut t = if zeta.abs() < (T::one() / T::epsilon()).sqrt() {
        (T::one() / (zeta.abs() + (T::one() + zeta * zeta).sqrt())).copysign(zeta)
    } else {
        (T::from_f64(0.5) / zeta.abs()).copysign(zeta)
    };
    let c = (T::one() / (T::one() + t * t)).sqrt();
    let s = c * t;
    t = t * d12;
    d1 = d1 - t;
    d2 = d2 + t;
    (d1, d2, c, s)
}

// ── Wrapper ─────────────────────────────────────────────────────────

/// Eigendecomposition of a symmetric 2×2 matrix, in closed form.
///
/// Eigenvalues are sorted ascending; the eigenvector matrix is the
/// rotation with column k the unit eigenvector of eigenvalue k, so
/// `V^T V = I` and `A = V diag(λ) V^T` hold to rounding.
///
/// Always succeeds, for any real symmetric input including repeated
/// eigenvalues (`d1 == d2`), so there is no error case to propagate.
///
/// # Example
///
/// ```
/// use spectris::{SymEigen2, SymMatrix2};
///
/// let a = SymMatrix2::new(2.0_f64, 1.0, 2.0);
/// let eig = SymEigen2::new(&a);
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-12);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SymEigen2<T: FloatScalar> {
    eigenvalues: [T; 2],
    eigenvectors: Matrix2<T>,
}

impl<T: FloatScalar> SymEigen2<T> {
    /// Decompose a symmetric 2×2 matrix.
    pub fn new(a: &SymMatrix2<T>) -> Self {
        let (d1, d2, c, s) = eigensystem_2s(a.d12, a.d1, a.d2);
        let (eigenvalues, eigenvectors) = if d1 <= d2 {
            ([d1, d2], Matrix::new([[c, s], [-s, c]]))
        } else {
            ([d2, d1], Matrix::new([[s, c], [c, -s]]))
        };
        Self {
            eigenvalues,
            eigenvectors,
        }
    }

    /// Compute eigenvalues only (skips the rotation).
    pub fn eigenvalues_only(a: &SymMatrix2<T>) -> [T; 2] {
        let (d1, d2) = eigenvalues_2s(a.d12, a.d1, a.d2);
        if d1 <= d2 {
            [d1, d2]
        } else {
            [d2, d1]
        }
    }

    /// The eigenvalues, sorted ascending.
    #[inline]
    pub fn eigenvalues(&self) -> &[T; 2] {
        &self.eigenvalues
    }

    /// The eigenvector matrix (columns are unit eigenvectors).
    #[inline]
    pub fn eigenvectors(&self) -> &Matrix2<T> {
        &self.eigenvectors
    }
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: FloatScalar> SymMatrix2<T> {
    /// Full eigendecomposition.
    pub fn eig(&self) -> SymEigen2<T> {
        SymEigen2::new(self)
    }

    /// Eigenvalues only, sorted ascending.
    pub fn eigenvalues(&self) -> [T; 2] {
        SymEigen2::eigenvalues_only(self)
    }
}

impl<T: FloatScalar> Matrix2<T> {
    /// Symmetric eigendecomposition, reading the upper triangle.
    ///
    /// The caller is responsible for ensuring the matrix is symmetric.
    ///
    /// ```
    /// use spectris::Matrix;
    ///
    /// let a = Matrix::new([[5.0_f64, 2.0], [2.0, 2.0]]);
    /// let eig = a.eig_symmetric();
    /// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-10);
    /// assert!((eig.eigenvalues()[1] - 6.0).abs() < 1e-10);
    /// ```
    pub fn eig_symmetric(&self) -> SymEigen2<T> {
        SymEigen2::new(&SymMatrix2::from_matrix(self))
    }

    /// Eigenvalues of a symmetric matrix (no eigenvectors), reading the
    /// upper triangle.
    pub fn eigenvalues_symmetric(&self) -> [T; 2] {
        SymEigen2::eigenvalues_only(&SymMatrix2::from_matrix(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn check_decomposition(a: SymMatrix2<f64>, tol: f64) {
        let eig = a.eig();
        let vals = eig.eigenvalues();
        let q = eig.eigenvectors();

        assert!(vals[0] <= vals[1], "not ascending: {:?}", vals);

        // Q^T Q = I
        let qtq = q.transpose() * *q;
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(qtq[(i, j)], expected, tol, &format!("QtQ[({},{})]", i, j));
            }
        }

        // A = Q diag(λ) Q^T
        let full = a.to_matrix();
        for i in 0..2 {
            for j in 0..2 {
                let mut sum = 0.0;
                for k in 0..2 {
                    sum += q[(i, k)] * vals[k] * q[(j, k)];
                }
                assert_near(sum, full[(i, j)], tol, &format!("A[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn known_eigenpairs() {
        // [[2, 1], [1, 2]] has eigenvalues 1, 3 with eigenvectors
        // (1, -1)/sqrt(2) and (1, 1)/sqrt(2).
        let a = SymMatrix2::new(2.0, 1.0, 2.0);
        let eig = a.eig();
        assert_near(eig.eigenvalues()[0], 1.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 3.0, TOL, "λ[1]");

        let q = eig.eigenvectors();
        let inv_sqrt2 = 0.5_f64.sqrt();
        // Columns are unique up to sign
        assert_near(q[(0, 0)].abs(), inv_sqrt2, TOL, "v0.x");
        assert_near(q[(1, 0)].abs(), inv_sqrt2, TOL, "v0.y");
        assert!(q[(0, 0)] * q[(1, 0)] < 0.0, "v0 must be along (1,-1)");
        assert!(q[(0, 1)] * q[(1, 1)] > 0.0, "v1 must be along (1,1)");
    }

    #[test]
    fn already_diagonal() {
        let a = SymMatrix2::new(4.0, 0.0, -1.0);
        let eig = a.eig();
        assert_near(eig.eigenvalues()[0], -1.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 4.0, TOL, "λ[1]");
        check_decomposition(a, TOL);
    }

    #[test]
    fn repeated_eigenvalue() {
        let a = SymMatrix2::new(3.0, 0.0, 3.0);
        let eig = a.eig();
        assert_near(eig.eigenvalues()[0], 3.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 3.0, TOL, "λ[1]");
        check_decomposition(a, TOL);
    }

    #[test]
    fn negative_eigenvalues() {
        let a = SymMatrix2::new(1.0, 3.0, 1.0);
        let vals = a.eigenvalues();
        assert_near(vals[0], -2.0, TOL, "λ[0]");
        assert_near(vals[1], 4.0, TOL, "λ[1]");
    }

    #[test]
    fn nearly_equal_diagonal() {
        // d1 ≈ d2 puts zeta near zero; the stable tangent formula must not
        // cancel.
        let a = SymMatrix2::new(1.0 + 1e-14, 1e-10, 1.0);
        check_decomposition(a, 1e-13);
    }

    #[test]
    fn tiny_off_diagonal() {
        // Huge zeta exercises the 0.5/|zeta| branch.
        let a = SymMatrix2::new(1.0, 1e-200, 5.0);
        let vals = a.eigenvalues();
        assert_near(vals[0], 1.0, TOL, "λ[0]");
        assert_near(vals[1], 5.0, TOL, "λ[1]");
        check_decomposition(a, TOL);
    }

    #[test]
    fn eigenvalues_match_eigensystem() {
        let a = SymMatrix2::new(-2.5, 1.75, 0.5);
        let vals_only = a.eigenvalues();
        let eig = a.eig();
        assert_near(vals_only[0], eig.eigenvalues()[0], TOL, "λ[0]");
        assert_near(vals_only[1], eig.eigenvalues()[1], TOL, "λ[1]");
    }

    #[test]
    fn full_matrix_convenience() {
        let a = Matrix::new([[5.0_f64, 2.0], [2.0, 2.0]]);
        let vals = a.eigenvalues_symmetric();
        assert_near(vals[0], 1.0, TOL, "λ[0]");
        assert_near(vals[1], 6.0, TOL, "λ[1]");
    }

    #[test]
    fn trace_preserved() {
        let a = SymMatrix2::new(0.3, -7.1, 2.9);
        let vals = a.eigenvalues();
        assert_near(vals[0] + vals[1], a.trace(), 1e-10, "trace");
    }

    #[test]
    fn f32_support() {
        let a = SymMatrix2::new(2.0_f32, -1.0, 2.0);
        let eig = a.eig();
        assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-5);
        assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-5);
    }
}
