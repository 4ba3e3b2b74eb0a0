//! Closed-form singular values for matrices up to 3×3.
//!
//! Every shape with `1 <= width <= height <= 3` is covered: a single
//! column by its norm, two columns through the 2×2 Gram form, and the
//! square 3×3 case through the eigenvalues of the Gram matrix `A^T A`,
//! extracted with the same cubic machinery as the eigendecomposition.
//!
//! Indexing convention: singular value 0 is the **largest** — the reverse
//! of the eigenvalue ordering. See the crate docs.

use crate::linalg::eigen2::eigenvalues_2s;
use crate::linalg::eigen3::deviatoric_invariants;
use crate::linalg::kernel::{kernel_vector_3s, KernelVector};
use crate::linalg::reduce::reduce_3s;
use crate::linalg::scale::scaling_factor;
use crate::linalg::PivotMode;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Eigenvalue `i` (0 = largest) of the scaled Gram matrix with diagonal
/// `(b11, b22, b33)`, off-diagonal `(b12, b13, b23)`, mean `aa` and
/// deviators `(c1, c2, c3)` supplied by the caller (computed there with
/// paired differences of the original columns, which beats re-deriving
/// them from the `bij` sums).
#[allow(clippy::too_many_arguments)]
fn gram_eigenvalue<T: FloatScalar>(
    i: usize,
    aa: T,
    c1: T,
    c2: T,
    c3: T,
    b11: T,
    b22: T,
    b33: T,
    b12: T,
    b13: T,
    b23: T,
) -> T {
    let (q, r) = deviatoric_invariants(c1, c2, c3, b12, b13, b23);

    if q <= T::zero() {
        // scalar Gram matrix: triple eigenvalue
        return aa;
    }

    let two = T::from_f64(2.0);
    let three = T::from_f64(3.0);
    let sqrt_q = q.sqrt();
    let sqrt_q3 = q * sqrt_q;

    let shift;
    if r.abs() >= sqrt_q3 {
        // saturated: an exactly (to rounding) double root
        shift = if r < T::zero() {
            two * sqrt_q
        } else {
            -two * sqrt_q
        };
    } else {
        let rn = r / sqrt_q3;

        if rn.abs() <= T::from_f64(0.9) {
            // no root is near-double; all three come straight from the
            // trigonometric formula
            let theta = rn.acos();
            return match i {
                2 => aa - two * sqrt_q * ((theta / three).cos()),
                0 => aa - two * sqrt_q * (((theta + two * T::PI()) / three).cos()),
                _ => aa - two * sqrt_q * (((theta - two * T::PI()) / three).cos()),
            };
        }

        if rn < T::zero() {
            shift = -two * sqrt_q * (((rn.acos() + two * T::PI()) / three).cos()); // largest
            if i == 0 {
                return aa + shift;
            }
        } else {
            shift = -two * sqrt_q * ((rn.acos() / three).cos()); // smallest
            if i == 2 {
                return aa + shift;
            }
        }
    }

    // The requested root belongs to the close pair: recover the separated
    // root's eigenvector, deflate, and read the pair off the 2×2 block.
    let mode = PivotMode::PreferAccurateEigenvalues;
    let z = match kernel_vector_3s(mode, b12, b13, b23, c1 - shift, c2 - shift, c3 - shift) {
        KernelVector::Full => return aa + shift,
        KernelVector::Line(z) | KernelVector::Plane(z) => z,
    };
    let red = reduce_3s(mode, b11, b22, b33, b12, b13, b23, z);
    let (e2, e3) = eigenvalues_2s(red.b23, red.b2, red.b3);
    let (b1, b2, b3) = (red.b1, e2, e3);

    match i {
        2 => b1.min(b2).min(b3),
        1 => {
            if b1 <= b2 {
                if b2 <= b3 {
                    b2
                } else {
                    b1.max(b3)
                }
            } else if b1 <= b3 {
                b1
            } else {
                b3.max(b2)
            }
        }
        _ => b1.max(b2).max(b3),
    }
}

impl<T: FloatScalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Singular value `i`, where index 0 is the **largest** and `N - 1`
    /// the smallest.
    ///
    /// Closed form for every shape with `1 <= N <= M <= 3`; larger or
    /// wider-than-tall shapes are a precondition violation and panic.
    /// Dense SVD for bigger matrices belongs to a general-purpose solver,
    /// not to this kernel.
    ///
    /// # Example
    ///
    /// ```
    /// use spectris::Matrix;
    ///
    /// let a = Matrix::new([[3.0_f64], [4.0]]);
    /// assert!((a.singular_value(0) - 5.0).abs() < 1e-12);
    /// ```
    ///
    /// # Panics
    ///
    /// If the shape is outside `1 <= N <= M <= 3` or `i >= N`.
    pub fn singular_value(&self, i: usize) -> T {
        assert!(
            N >= 1 && N <= M && M <= 3,
            "closed-form singular values need 1 <= width <= height <= 3, got {}x{}",
            M,
            N
        );
        assert!(
            i < N,
            "singular value index {} out of range for width {}",
            i,
            N
        );

        let mult = scaling_factor(self.max_abs());
        let half = T::from_f64(0.5);

        if N == 1 {
            let mut sum = T::zero();
            for row in 0..M {
                let x = self[(row, 0)] / mult;
                sum = sum + x * x;
            }
            return sum.sqrt() * mult;
        }

        if N == 2 && M == 2 {
            let d0 = self[(0, 0)] / mult;
            let d1 = self[(1, 0)] / mult;
            let d2 = self[(0, 1)] / mult;
            let d3 = self[(1, 1)] / mult;
            // t = (|a|^2 - |b|^2)/2 for the two columns a, b, paired as
            // differences of products so nearly equal columns cancel in
            // the products, not in the sums
            let t = half * ((d0 + d2) * (d0 - d2) + (d1 - d3) * (d1 + d3));
            let f = d0 * d2 + d1 * d3;
            let s_max =
                (half * (d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3) + (t * t + f * f).sqrt()).sqrt();
            if s_max == T::zero() {
                return T::zero();
            }
            // σ0 σ1 = |det A|
            let s_min = (d0 * d3 - d1 * d2).abs() / s_max;
            let (lo, hi) = if s_min > s_max {
                (s_max, s_min)
            } else {
                (s_min, s_max)
            };
            return (if i == 0 { hi } else { lo }) * mult;
        }

        if N == 2 {
            // two columns of height 3: Gram form, with the small value
            // from the cross product (|u × v| = σ0 σ1)
            let u = [
                self[(0, 0)] / mult,
                self[(1, 0)] / mult,
                self[(2, 0)] / mult,
            ];
            let v = [
                self[(0, 1)] / mult,
                self[(1, 1)] / mult,
                self[(2, 1)] / mult,
            ];
            let e = u[0] * u[0] + u[1] * u[1] + u[2] * u[2];
            let g = v[0] * v[0] + v[1] * v[1] + v[2] * v[2];
            let f = u[0] * v[0] + u[1] * v[1] + u[2] * v[2];
            let t = half * (e - g);
            let s_max = (half * (e + g) + (t * t + f * f).sqrt()).sqrt();
            if s_max == T::zero() {
                return T::zero();
            }
            let cx = u[1] * v[2] - u[2] * v[1];
            let cy = u[2] * v[0] - u[0] * v[2];
            let cz = u[0] * v[1] - u[1] * v[0];
            let s_min = (cx * cx + cy * cy + cz * cz).sqrt() / s_max;
            let (lo, hi) = if s_min > s_max {
                (s_max, s_min)
            } else {
                (s_min, s_max)
            };
            return (if i == 0 { hi } else { lo }) * mult;
        }

        // 3×3: Gram matrix B = A^T A of the scaled columns
        let x = [
            self[(0, 0)] / mult,
            self[(1, 0)] / mult,
            self[(2, 0)] / mult,
        ];
        let y = [
            self[(0, 1)] / mult,
            self[(1, 1)] / mult,
            self[(2, 1)] / mult,
        ];
        let z = [
            self[(0, 2)] / mult,
            self[(1, 2)] / mult,
            self[(2, 2)] / mult,
        ];
        let b11 = x[0] * x[0] + x[1] * x[1] + x[2] * x[2];
        let b22 = y[0] * y[0] + y[1] * y[1] + y[2] * y[2];
        let b33 = z[0] * z[0] + z[1] * z[1] + z[2] * z[2];
        let b12 = x[0] * y[0] + x[1] * y[1] + x[2] * y[2];
        let b13 = x[0] * z[0] + x[1] * z[1] + x[2] * z[2];
        let b23 = y[0] * z[0] + y[1] * z[1] + y[2] * z[2];

        let third = T::one() / T::from_f64(3.0);
        let aa = (b11 + b22 + b33) * third;
        // deviators cij = bii - aa from paired differences of the
        // columns, so that nearly equal column norms cancel in products
        let b11_b22 = (x[0] - y[0]) * (x[0] + y[0])
            + (x[1] - y[1]) * (x[1] + y[1])
            + (x[2] - y[2]) * (x[2] + y[2]);
        let b22_b33 = (y[0] - z[0]) * (y[0] + z[0])
            + (y[1] - z[1]) * (y[1] + z[1])
            + (y[2] - z[2]) * (y[2] + z[2]);
        let b33_b11 = (z[0] - x[0]) * (z[0] + x[0])
            + (z[1] - x[1]) * (z[1] + x[1])
            + (z[2] - x[2]) * (z[2] + x[2]);
        let c1 = (b11_b22 - b33_b11) * third;
        let c2 = (b22_b33 - b11_b22) * third;
        let c3 = (b33_b11 - b22_b33) * third;

        let lambda = gram_eigenvalue(i, aa, c1, c2, c3, b11, b22, b33, b12, b13, b23);
        // abs() guards a tiny negative eigenvalue rounded across zero
        lambda.abs().sqrt() * mult
    }

    /// All singular values, index 0 the largest.
    ///
    /// ```
    /// use spectris::Matrix;
    ///
    /// let a = Matrix::new([[3.0_f64, 0.0], [4.0, 5.0]]);
    /// let sv = a.singular_values();
    /// assert!(sv[0] >= sv[1]);
    /// ```
    pub fn singular_values(&self) -> [T; N] {
        let mut sv = [T::zero(); N];
        for (i, out) in sv.iter_mut().enumerate() {
            *out = self.singular_value(i);
        }
        sv
    }

    /// Number of singular values at or above `tol`.
    ///
    /// ```
    /// use spectris::Matrix;
    ///
    /// let a = Matrix::new([[1.0_f64, 0.0], [0.0, 0.0]]);
    /// assert_eq!(a.rank(1e-9), 1);
    /// ```
    pub fn rank(&self, tol: T) -> usize {
        self.singular_values().iter().filter(|s| **s >= tol).count()
    }
}
