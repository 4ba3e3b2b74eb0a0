//! Closed-form eigendecomposition of a symmetric 3×3 matrix.
//!
//! The eigenvalues are the roots of the characteristic cubic, taken with
//! the trigonometric (Viète) formula on the deviatoric invariants: unlike
//! the direct polynomial root formulas it stays accurate when two roots
//! nearly coincide. Only the root separated from the other two is used
//! directly; its eigenvector is recovered by the near-kernel search and
//! the problem deflated to a 2×2 block for the remaining pair.

use crate::linalg::eigen2::{eigensystem_2s, eigenvalues_2s};
use crate::linalg::kernel::{kernel_vector_3s, KernelVector};
use crate::linalg::reduce::reduce_3s;
use crate::linalg::scale::scaling_factor;
use crate::linalg::PivotMode;
use crate::matrix::Matrix3;
use crate::sym::SymMatrix3;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Invariants `(q, r)` of the deviatoric part of a symmetric 3×3 matrix,
/// given the shifted diagonal `ci = dii - tr/3` and the off-diagonal
/// entries.
///
/// `q = |A - (tr/3) I|_F^2 / 6`, so `q >= 0` with equality exactly for
/// scalar matrices; `r = -det(A - (tr/3) I) / 2`. For real symmetric
/// input `r^2 <= q^3`, which makes `r / q^1.5` the cosine in the Viète
/// root formula.
pub(crate) fn deviatoric_invariants<T: FloatScalar>(
    c1: T,
    c2: T,
    c3: T,
    d12: T,
    d13: T,
    d23: T,
) -> (T, T) {
    let two = T::from_f64(2.0);
    let q = (two * (d12 * d12 + d13 * d13 + d23 * d23) + c1 * c1 + c2 * c2 + c3 * c3)
        / T::from_f64(6.0);
    let r = (c1 * (d23 * d23 - c2 * c3) + d12 * (d12 * c3 - two * d13 * d23) + d13 * d13 * c2)
        / two;
    (q, r)
}

/// The root of the depressed cubic `x^3 - 3q x - 2r = 0` that is
/// separated from the other two: the largest root when `r < 0`, the
/// smallest when `r >= 0`. Requires `q > 0`.
///
/// The other two roots approach each other as `|r|` approaches `q^1.5`;
/// the returned one stays well-conditioned there, which is why the
/// decomposition extracts it first and leaves the close pair to the
/// deflated 2×2 block. At `|r| >= q^1.5` the cosine argument is clamped
/// to `±1` (it can only exceed it by rounding).
fn separated_root<T: FloatScalar>(q: T, r: T) -> T {
    let two = T::from_f64(2.0);
    let three = T::from_f64(3.0);
    let sqrt_q = q.sqrt();
    let sqrt_q3 = q * sqrt_q;

    if r.abs() >= sqrt_q3 {
        if r < T::zero() {
            two * sqrt_q
        } else {
            -two * sqrt_q
        }
    } else {
        let rn = r / sqrt_q3;
        if rn < T::zero() {
            -two * sqrt_q * (((rn.acos() + two * T::PI()) / three).cos())
        } else {
            -two * sqrt_q * ((rn.acos() / three).cos())
        }
    }
}

fn sort3_ascending<T: PartialOrd, U>(v: &mut [(T, U); 3]) {
    if v[0].0 > v[1].0 {
        v.swap(0, 1);
    }
    if v[1].0 > v[2].0 {
        v.swap(1, 2);
    }
    if v[0].0 > v[1].0 {
        v.swap(0, 1);
    }
}

/// Eigendecomposition of a symmetric 3×3 matrix, in closed form.
///
/// Eigenvalues are sorted ascending; column k of the eigenvector matrix
/// is the unit eigenvector of eigenvalue k, so `V^T V = I` and
/// `A = V diag(λ) V^T` hold to rounding.
///
/// Always succeeds for any real symmetric input. Repeated eigenvalues are
/// not an error: a numerically scalar matrix returns the identity basis,
/// and a double eigenvalue gets an arbitrary orthonormal pair in its
/// eigenplane.
///
/// # Example
///
/// ```
/// use spectris::{SymEigen3, SymMatrix3};
///
/// // [[0,1,1],[1,0,1],[1,1,0]] has eigenvalues (-1, -1, 2)
/// let a = SymMatrix3::new(0.0_f64, 0.0, 0.0, 1.0, 1.0, 1.0);
/// let eig = SymEigen3::new(&a);
/// assert!((eig.eigenvalues()[0] + 1.0).abs() < 1e-12);
/// assert!((eig.eigenvalues()[2] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SymEigen3<T: FloatScalar> {
    eigenvalues: [T; 3],
    eigenvectors: Matrix3<T>,
}

impl<T: FloatScalar> SymEigen3<T> {
    /// Decompose a symmetric 3×3 matrix.
    pub fn new(a: &SymMatrix3<T>) -> Self {
        let mult = scaling_factor(a.max_abs());
        let d11 = a.d11 / mult;
        let d22 = a.d22 / mult;
        let d33 = a.d33 / mult;
        let d12 = a.d12 / mult;
        let d13 = a.d13 / mult;
        let d23 = a.d23 / mult;

        let third = T::one() / T::from_f64(3.0);
        let aa = (d11 + d22 + d33) * third;
        let (q, r) = deviatoric_invariants(d11 - aa, d22 - aa, d33 - aa, d12, d13, d23);

        if q <= T::zero() {
            // scalar matrix: triple eigenvalue, any orthonormal basis
            return Self {
                eigenvalues: [aa * mult; 3],
                eigenvectors: Matrix::eye(),
            };
        }

        // The kernel search and the deflation pivot for eigenvector
        // accuracy; the eigenvalue the deflation smears is recovered by
        // the sort from the well-separated root anyway.
        let mode = PivotMode::PreferAccurateEigenvectors;

        let aa = aa + separated_root(q, r);
        let z = match kernel_vector_3s(mode, d12, d13, d23, d11 - aa, d22 - aa, d33 - aa) {
            KernelVector::Full => {
                // A - aa I is numerically zero: triple eigenvalue
                return Self {
                    eigenvalues: [aa * mult; 3],
                    eigenvectors: Matrix::eye(),
                };
            }
            KernelVector::Line(z) | KernelVector::Plane(z) => z,
        };

        let red = reduce_3s(mode, d11, d22, d33, d12, d13, d23, z);
        let (b2, b3, c, s) = eigensystem_2s(red.b23, red.b2, red.b3);

        // The block eigenvectors are (0, c, -s) and (0, s, c) in the
        // deflated frame; push them back through Q = I - g v v^t and the
        // permutation.
        let [v1, v2, v3] = red.v;
        let t2 = red.g * (v2 * c - v3 * s);
        let t3 = red.g * (v2 * s + v3 * c);
        let mut x2 = [-v1 * t2, c - v2 * t2, -s - v3 * t2];
        let mut x3 = [-v1 * t3, s - v2 * t3, c - v3 * t3];
        match red.k {
            2 => {
                x2.swap(0, 1);
                x3.swap(0, 1);
            }
            3 => {
                x2.swap(0, 2);
                x3.swap(0, 2);
            }
            _ => {}
        }

        let mut pairs = [(red.b1, z), (b2, x2), (b3, x3)];
        sort3_ascending(&mut pairs);

        Self {
            eigenvalues: [
                pairs[0].0 * mult,
                pairs[1].0 * mult,
                pairs[2].0 * mult,
            ],
            eigenvectors: Matrix::new([
                [pairs[0].1[0], pairs[1].1[0], pairs[2].1[0]],
                [pairs[0].1[1], pairs[1].1[1], pairs[2].1[1]],
                [pairs[0].1[2], pairs[1].1[2], pairs[2].1[2]],
            ]),
        }
    }

    /// Compute eigenvalues only.
    ///
    /// Skips the eigenvector composition and lets the elimination pivot
    /// for eigenvalue accuracy instead.
    pub fn eigenvalues_only(a: &SymMatrix3<T>) -> [T; 3] {
        let mult = scaling_factor(a.max_abs());
        let d11 = a.d11 / mult;
        let d22 = a.d22 / mult;
        let d33 = a.d33 / mult;
        let d12 = a.d12 / mult;
        let d13 = a.d13 / mult;
        let d23 = a.d23 / mult;

        let third = T::one() / T::from_f64(3.0);
        let aa = (d11 + d22 + d33) * third;
        let (q, r) = deviatoric_invariants(d11 - aa, d22 - aa, d33 - aa, d12, d13, d23);

        if q <= T::zero() {
            return [aa * mult; 3];
        }

        let mode = PivotMode::PreferAccurateEigenvalues;

        let aa = aa + separated_root(q, r);
        let z = match kernel_vector_3s(mode, d12, d13, d23, d11 - aa, d22 - aa, d33 - aa) {
            KernelVector::Full => return [aa * mult; 3],
            KernelVector::Line(z) | KernelVector::Plane(z) => z,
        };

        let red = reduce_3s(mode, d11, d22, d33, d12, d13, d23, z);
        let (b2, b3) = eigenvalues_2s(red.b23, red.b2, red.b3);

        let mut vals = [red.b1, b2, b3];
        if vals[0] > vals[1] {
            vals.swap(0, 1);
        }
        if vals[1] > vals[2] {
            vals.swap(1, 2);
        }
        if vals[0] > vals[1] {
            vals.swap(0, 1);
        }
        [vals[0] * mult, vals[1] * mult, vals[2] * mult]
    }

    /// The eigenvalues, sorted ascending.
    #[inline]
    pub fn eigenvalues(&self) -> &[T; 3] {
        &self.eigenvalues
    }

    /// The eigenvector matrix (columns are unit eigenvectors).
    #[inline]
    pub fn eigenvectors(&self) -> &Matrix3<T> {
        &self.eigenvectors
    }
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: FloatScalar> SymMatrix3<T> {
    /// Full eigendecomposition.
    pub fn eig(&self) -> SymEigen3<T> {
        SymEigen3::new(self)
    }

    /// Eigenvalues only, sorted ascending.
    pub fn eigenvalues(&self) -> [T; 3] {
        SymEigen3::eigenvalues_only(self)
    }
}

impl<T: FloatScalar> Matrix3<T> {
    /// Symmetric eigendecomposition, reading the upper triangle.
    ///
    /// The caller is responsible for ensuring the matrix is symmetric.
    ///
    /// ```
    /// use spectris::Matrix;
    ///
    /// let a = Matrix::new([
    ///     [1.0_f64, 0.0, 0.0],
    ///     [0.0, 2.0, 0.0],
    ///     [0.0, 0.0, 3.0],
    /// ]);
    /// let eig = a.eig_symmetric();
    /// assert!((eig.eigenvalues()[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn eig_symmetric(&self) -> SymEigen3<T> {
        SymEigen3::new(&SymMatrix3::from_matrix(self))
    }

    /// Eigenvalues of a symmetric matrix (no eigenvectors), reading the
    /// upper triangle.
    pub fn eigenvalues_symmetric(&self) -> [T; 3] {
        SymEigen3::eigenvalues_only(&SymMatrix3::from_matrix(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {:e})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    // Orthonormality of V and reconstruction A = V diag(λ) V^T
    fn check_decomposition(a: SymMatrix3<f64>, tol: f64) {
        let eig = a.eig();
        let vals = eig.eigenvalues();
        let v = eig.eigenvectors();

        assert!(
            vals[0] <= vals[1] && vals[1] <= vals[2],
            "not ascending: {:?}",
            vals
        );

        let vtv = v.transpose() * *v;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(vtv[(i, j)], expected, tol, &format!("VtV[({},{})]", i, j));
            }
        }

        let full = a.to_matrix();
        let scale = a.max_abs().max(1.0);
        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += v[(i, k)] * vals[k] * v[(j, k)];
                }
                assert_near(
                    sum / scale,
                    full[(i, j)] / scale,
                    tol,
                    &format!("A[({},{})]", i, j),
                );
            }
        }
    }

    #[test]
    fn diagonal_matrix() {
        let a = SymMatrix3::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
        let eig = a.eig();
        assert_near(eig.eigenvalues()[0], 1.0, 1e-12, "λ[0]");
        assert_near(eig.eigenvalues()[1], 2.0, 1e-12, "λ[1]");
        assert_near(eig.eigenvalues()[2], 3.0, 1e-12, "λ[2]");

        // eigenvectors are the standard basis, up to sign
        let v = eig.eigenvectors();
        for k in 0..3 {
            assert_near(v[(k, k)].abs(), 1.0, 1e-12, &format!("v{k} axis"));
        }
        check_decomposition(a, 1e-12);
    }

    #[test]
    fn repeated_pair() {
        // [[0,1,1],[1,0,1],[1,1,0]]: eigenvalues (-1, -1, 2). The
        // eigenvectors of the double pair are non-unique; only the
        // decomposition properties are pinned down.
        let a = SymMatrix3::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let vals = a.eigenvalues();
        assert_near(vals[0], -1.0, 1e-12, "λ[0]");
        assert_near(vals[1], -1.0, 1e-12, "λ[1]");
        assert_near(vals[2], 2.0, 1e-12, "λ[2]");
        check_decomposition(a, 1e-12);
    }

    #[test]
    fn triple_eigenvalue() {
        let a = SymMatrix3::new(5.0, 5.0, 5.0, 0.0, 0.0, 0.0);
        let eig = a.eig();
        for k in 0..3 {
            assert_near(eig.eigenvalues()[k], 5.0, 1e-14, "λ");
        }
        check_decomposition(a, 1e-14);
    }

    #[test]
    fn zero_matrix() {
        let a = SymMatrix3::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let eig = a.eig();
        assert_eq!(*eig.eigenvalues(), [0.0; 3]);
        check_decomposition(a, 1e-15);
    }

    #[test]
    fn generic_dense() {
        let a = SymMatrix3::new(4.0, -2.0, 11.0, 1.5, -3.0, 0.25);
        check_decomposition(a, 1e-13);

        let vals = a.eigenvalues();
        assert_near(vals[0] + vals[1] + vals[2], a.trace(), 1e-12, "trace");
    }

    #[test]
    fn eigenvalues_match_full_decomposition() {
        let a = SymMatrix3::new(4.0, -2.0, 11.0, 1.5, -3.0, 0.25);
        let only = a.eigenvalues();
        let full = a.eig();
        for k in 0..3 {
            assert_near(only[k], full.eigenvalues()[k], 1e-12, "λ");
        }
    }

    #[test]
    fn near_double_root() {
        // two eigenvalues 1e-8 apart: the trigonometric root extraction
        // must not collapse them onto each other
        let a = SymMatrix3::new(1.0, 1.0 + 1e-8, 3.0, 1e-9, 0.0, 0.0);
        check_decomposition(a, 1e-12);
        let vals = a.eigenvalues();
        assert!(vals[1] - vals[0] < 1e-7, "pair split too far: {:?}", vals);
    }

    #[test]
    fn scale_linearity() {
        // eigenvalues scale linearly with the matrix over the full
        // exponent range the scaling factor protects
        let base = SymMatrix3::new(4.0, -2.0, 11.0, 1.5, -3.0, 0.25);
        let vals = base.eigenvalues();
        for k in [1e-150_f64, 1e-30, 0.5, 3.0, 1e30, 1e150] {
            let scaled = SymMatrix3::new(
                base.d11 * k,
                base.d22 * k,
                base.d33 * k,
                base.d12 * k,
                base.d13 * k,
                base.d23 * k,
            );
            let sv = scaled.eigenvalues();
            for i in 0..3 {
                let rel = (sv[i] - vals[i] * k).abs() / (vals[i].abs() * k);
                assert!(rel < 1e-12, "k = {:e}: λ[{i}] rel err {:e}", k, rel);
            }
        }
    }

    #[test]
    fn huge_entries_no_overflow() {
        let a = SymMatrix3::new(3e150, -1e150, 2e150, 5e149, 0.0, -2e149);
        check_decomposition(a, 1e-13);
        assert!(a.eigenvalues().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn tiny_entries_no_underflow() {
        let a = SymMatrix3::new(3e-150, -1e-150, 2e-150, 5e-151, 0.0, -2e-151);
        check_decomposition(a, 1e-13);
        let vals = a.eigenvalues();
        assert!(vals[0] != vals[2], "eigenvalues flushed together: {:?}", vals);
    }

    #[test]
    fn rank_one_projector() {
        // u u^t has eigenvalues (0, 0, 1): exercises the 2-D kernel branch
        let u = [2.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0];
        let a = SymMatrix3::new(
            u[0] * u[0],
            u[1] * u[1],
            u[2] * u[2],
            u[0] * u[1],
            u[0] * u[2],
            u[1] * u[2],
        );
        let eig = a.eig();
        assert_near(eig.eigenvalues()[0], 0.0, 1e-14, "λ[0]");
        assert_near(eig.eigenvalues()[1], 0.0, 1e-14, "λ[1]");
        assert_near(eig.eigenvalues()[2], 1.0, 1e-14, "λ[2]");
        check_decomposition(a, 1e-14);
    }

    #[test]
    fn negative_definite() {
        let a = SymMatrix3::new(-5.0, -3.0, -4.0, 1.0, 0.5, -0.5);
        let vals = a.eigenvalues();
        assert!(vals[2] < 0.0, "not negative definite: {:?}", vals);
        check_decomposition(a, 1e-13);
    }

    #[test]
    fn full_matrix_convenience() {
        let a = Matrix::new([
            [2.0_f64, 1.0, 0.0],
            [1.0, 2.0, 0.0],
            [0.0, 0.0, 5.0],
        ]);
        let vals = a.eigenvalues_symmetric();
        assert_near(vals[0], 1.0, 1e-12, "λ[0]");
        assert_near(vals[1], 3.0, 1e-12, "λ[1]");
        assert_near(vals[2], 5.0, 1e-12, "λ[2]");

        let eig = a.eig_symmetric();
        assert_near(eig.eigenvalues()[0], 1.0, 1e-12, "λ[0]");
    }

    #[test]
    fn f32_support() {
        let a = SymMatrix3::new(1.0_f32, 2.0, 3.0, 0.0, 0.0, 0.0);
        let eig = a.eig();
        assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-5);
        assert!((eig.eigenvalues()[2] - 3.0).abs() < 1e-5);
    }
}
