//! Near-kernel vector search by pivoted elimination.
//!
//! Given a matrix known (or suspected) to be singular, these routines find
//! a unit vector spanning its null space. The 3×3 eigendecomposition uses
//! them to recover the eigenvector of `A - λI` once an eigenvalue `λ` is
//! isolated from the characteristic cubic; `A - λI` is then singular up to
//! rounding, and plain back-substitution would divide by a tiny pivot.

use crate::linalg::PivotMode;
use crate::traits::FloatScalar;

/// Outcome of the symmetric 3×3 near-kernel search.
///
/// Internal to the decomposition pipeline; callers of the crate never see
/// it, they only observe which branch the 3×3 eigensolver takes next.
#[derive(Debug, Clone, Copy)]
pub(crate) enum KernelVector<T> {
    /// Ordinary case: the kernel is (near) one-dimensional and the vector
    /// spans it.
    Line([T; 3]),
    /// The kernel is two-dimensional; the vector is orthogonal to it,
    /// which is exactly the eigenvector of the remaining simple eigenvalue.
    Plane([T; 3]),
    /// The matrix is numerically zero. No vector: any basis works.
    Full,
}

fn normalize3_aux<T: FloatScalar>(x1: T, x2: T, x3: T) -> (T, T, T) {
    let m = x1.abs();
    let r2 = x2 / m;
    let r3 = x3 / m;
    let t = (T::one() / (T::one() + r2 * r2 + r3 * r3)).sqrt();
    let n1 = t.copysign(x1);
    let t = t / m;
    (n1, x2 * t, x3 * t)
}

/// Normalize a 3-vector to unit Euclidean length by first dividing through
/// by its largest-magnitude component.
///
/// Direct normalization squares the components, which overflows when they
/// differ from 1 by more than half the exponent range; dividing by the max
/// component first keeps every ratio in `[-1, 1]`. A zero vector stays
/// zero.
pub(crate) fn normalize3<T: FloatScalar>(x1: T, x2: T, x3: T) -> (T, T, T) {
    if x1.abs() >= x2.abs() {
        if x1.abs() >= x3.abs() {
            return if x1 != T::zero() {
                normalize3_aux(x1, x2, x3)
            } else {
                (T::zero(), T::zero(), T::zero())
            };
        }
    } else if x2.abs() >= x3.abs() {
        let (n2, n1, n3) = normalize3_aux(x2, x1, x3);
        return (n1, n2, n3);
    }
    let (n3, n1, n2) = normalize3_aux(x3, x1, x2);
    (n1, n2, n3)
}

/// Near-kernel vector of a general 2×2 matrix `[[d1, d12], [d21, d2]]`.
///
/// Pivots by column l1-norm, eliminates the sub-pivot entry with a
/// Householder-style reflection, then picks the vector minimizing
/// `|d1 z1 + d12 z2| + |d2| |z2|` over `|z1| + |z2| = 1` (the objective is
/// piecewise linear in `z1`, so the minimum sits at `z1 ∈ {-1, 0, 1}` or
/// at the root of the first term).
///
/// Within the pivot column the row order depends on `mode`:
/// [`PivotMode::PreferAccurateEigenvectors`] eliminates the larger entry
/// first, [`PivotMode::PreferAccurateEigenvalues`] the smaller.
///
/// Returns `None` when both column norms are zero (the matrix is exactly
/// zero), otherwise the vector, with `|z1| + |z2| = 1`.
pub(crate) fn kernel_vector_2g<T: FloatScalar>(
    mode: PivotMode,
    mut d1: T,
    mut d12: T,
    mut d21: T,
    mut d2: T,
) -> Option<(T, T)> {
    let n1 = d1.abs() + d21.abs();
    let n2 = d2.abs() + d12.abs();

    let swap_columns = n2 > n1;

    if !swap_columns {
        if n1 == T::zero() {
            return None;
        }
        let swap_rows = match mode {
            PivotMode::PreferAccurateEigenvectors => d1.abs() > d21.abs(),
            PivotMode::PreferAccurateEigenvalues => d1.abs() < d21.abs(),
        };
        if swap_rows {
            core::mem::swap(&mut d1, &mut d21);
            core::mem::swap(&mut d12, &mut d2);
        }
    } else {
        let off_diagonal_first = match mode {
            PivotMode::PreferAccurateEigenvectors => d12.abs() > d2.abs(),
            PivotMode::PreferAccurateEigenvalues => d12.abs() < d2.abs(),
        };
        if off_diagonal_first {
            core::mem::swap(&mut d1, &mut d2);
            core::mem::swap(&mut d12, &mut d21);
        } else {
            core::mem::swap(&mut d1, &mut d12);
            core::mem::swap(&mut d21, &mut d2);
        }
    }

    if d21 != T::zero() {
        // Reflect (d1, d21) onto (mu, 0); the reflection axis is scaled by
        // its max component so the `1 + r^2` denominator cannot overflow.
        let mu = d1.hypot(d21).copysign(d1);
        let w = -d21 * (d21 / (d1 + mu)); // = d1 - mu
        d1 = mu;
        if w.abs() <= d21.abs() {
            let r = w / d21;
            let mu = (T::from_f64(2.0) / (T::one() + r * r)) * (r * d12 + d2);
            d2 = d2 - mu;
            d12 = d12 - mu * r;
        } else {
            let r = d21 / w;
            let mu = (T::from_f64(2.0) / (T::one() + r * r)) * (d12 + r * d2);
            d2 = d2 - mu * r;
            d12 = d12 - mu;
        }
    }

    // The system is upper triangular now:
    // | d1 d12 | | z1 | = | 0 |
    // |  0  d2 | | z2 |   | 0 |
    // With z2 = 1 - |z1|, the objective |d1 z1 + d12 z2| + |d2| z2 is
    // piecewise linear in z1 with breakpoints at z1 = ±1 (value |d1|),
    // z1 = 0 (value |d12| + |d2|), and the root t1 of the first term
    // (value |d2| (1 - |t1|)).
    let mu = -d12 / d1;
    // |mu| <= sqrt(2) under l1-norm column pivoting
    let n2 = T::one() / (T::one() + mu.abs());
    let (z1, z2) = if d1.abs() <= n2 * d2.abs() {
        (T::one(), T::zero())
    } else {
        (mu * n2, n2)
    };

    if swap_columns {
        Some((z2, z1))
    } else {
        Some((z1, z2))
    }
}

/// Eliminate the first column of a general 3×3 matrix below the pivot and
/// solve the residual 2×2 block for a kernel vector.
///
/// The matrix is `[[d1, c12, c13], [c21, d2, c23], [c31, c32, d3]]`, with
/// the caller having already permuted the largest column and the preferred
/// row into the leading position. Returns `(plane, z)`:
/// `plane == false` means the kernel is one-dimensional and `z` spans it,
/// `plane == true` means the residual block vanished, the kernel is
/// two-dimensional, and `z` is the vector orthogonal to it, reconstructed
/// from the first row as `(1, c12/d1, c13/d1)`.
#[allow(clippy::too_many_arguments)]
fn eliminate_column1<T: FloatScalar>(
    mode: PivotMode,
    mut d1: T,
    mut d2: T,
    mut d3: T,
    mut c12: T,
    mut c13: T,
    mut c23: T,
    c21: T,
    c31: T,
    mut c32: T,
) -> (bool, [T; 3]) {
    let two = T::from_f64(2.0);

    let s1 = c21.hypot(c31);
    if s1 != T::zero() {
        // Householder reflection v = (s1, s2, s3), Q = I - 2 v v^t with
        // Q (d1, c21, c31)^t = (mu, 0, 0)^t. The axis is scaled by its
        // max-magnitude component, which avoids both overflow and the
        // sqrt of a direct normalization; three branches by which
        // component is largest.
        let mu = d1.hypot(s1).copysign(d1);
        let w1 = -s1 * (s1 / (d1 + mu)); // = d1 - mu
        d1 = mu;

        if w1.abs() >= c21.abs() && w1.abs() >= c31.abs() {
            // (s1, s2, s3) <- (1, c21/w1, c31/w1)
            let s2 = c21 / w1;
            let s3 = c31 / w1;
            let mu = two / (T::one() + s2 * s2 + s3 * s3);
            let n2 = mu * (c12 + s2 * d2 + s3 * c32);
            let n3 = mu * (c13 + s2 * c23 + s3 * d3);
            c12 = c12 - n2;
            d2 = d2 - s2 * n2;
            c32 = c32 - s3 * n2;
            c13 = c13 - n3;
            c23 = c23 - s2 * n3;
            d3 = d3 - s3 * n3;
        } else if w1.abs() < c21.abs() && c21.abs() >= c31.abs() {
            // (s1, s2, s3) <- (w1/c21, 1, c31/c21)
            let s1 = w1 / c21;
            let s3 = c31 / c21;
            let mu = two / (T::one() + s1 * s1 + s3 * s3);
            let n2 = mu * (s1 * c12 + d2 + s3 * c32);
            let n3 = mu * (s1 * c13 + c23 + s3 * d3);
            c12 = c12 - s1 * n2;
            d2 = d2 - n2;
            c32 = c32 - s3 * n2;
            c13 = c13 - s1 * n3;
            c23 = c23 - n3;
            d3 = d3 - s3 * n3;
        } else {
            // (s1, s2, s3) <- (w1/c31, c21/c31, 1)
            let s1 = w1 / c31;
            let s2 = c21 / c31;
            let mu = two / (T::one() + s1 * s1 + s2 * s2);
            let n2 = mu * (s1 * c12 + s2 * d2 + c32);
            let n3 = mu * (s1 * c13 + s2 * c23 + d3);
            c12 = c12 - s1 * n2;
            d2 = d2 - s2 * n2;
            c32 = c32 - n2;
            c13 = c13 - s1 * n3;
            c23 = c23 - s2 * n3;
            d3 = d3 - n3;
        }
    }

    // Solve the residual block
    // |  d2 c23 | | z2 | = | 0 |
    // | c32  d3 | | z3 |   | 0 |
    match kernel_vector_2g(mode, d2, c23, c32, d3) {
        None => {
            // The block vanished: (-c12/d1, 1, 0) and (-c13/d1, 0, 1) both
            // lie in the kernel. The vector orthogonal to that plane is
            // (1, c12/d1, c13/d1).
            let z2 = c12 / d1;
            let z3 = c13 / d1;
            let (n1, n2, n3) = normalize3(T::one(), z2, z3);
            (true, [n1, n2, n3])
        }
        Some((z2, z3)) => {
            // Back-substitute z1. |z1| <= sqrt(3) since |z2| + |z3| = 1
            // and the l1 column pivot bounds |c12|, |c13| by sqrt(3) |d1|.
            let z1 = -(c12 * z2 + c13 * z3) / d1;
            let (n1, n2, n3) = normalize3(z1, z2, z3);
            (false, [n1, n2, n3])
        }
    }
}

/// Unit vector in the near-kernel of the symmetric 3×3 matrix
/// `[[d1, d12, d13], [d12, d2, d23], [d13, d23, d3]]`.
///
/// Pivots the largest l1-norm column into the lead, orders the rows of
/// that column by `mode` ([`PivotMode::PreferAccurateEigenvectors`]:
/// smallest-magnitude entry first, [`PivotMode::PreferAccurateEigenvalues`]:
/// largest first), hands the permuted — now general, no longer symmetric —
/// matrix to the elimination helper, and permutes the resulting vector
/// back.
pub(crate) fn kernel_vector_3s<T: FloatScalar>(
    mode: PivotMode,
    d12: T,
    d13: T,
    d23: T,
    mut d1: T,
    mut d2: T,
    mut d3: T,
) -> KernelVector<T> {
    let mut c12 = d12;
    let mut c13 = d13;
    let mut c23 = d23;

    let n_col1 = d1.abs() + c12.abs() + c13.abs();
    let n_col2 = d2.abs() + c12.abs() + c23.abs();
    let n_col3 = d3.abs() + c13.abs() + c23.abs();

    let col = if n_col1 >= n_col3 {
        if n_col1 >= n_col2 {
            1
        } else {
            2
        }
    } else if n_col2 >= n_col3 {
        2
    } else {
        3
    };
    match col {
        1 => {
            if n_col1 == T::zero() {
                return KernelVector::Full;
            }
        }
        2 => {
            if n_col2 == T::zero() {
                return KernelVector::Full;
            }
            core::mem::swap(&mut c13, &mut c23);
            core::mem::swap(&mut d1, &mut d2);
        }
        _ => {
            if n_col3 == T::zero() {
                return KernelVector::Full;
            }
            core::mem::swap(&mut c12, &mut c23);
            core::mem::swap(&mut d1, &mut d3);
        }
    }

    let row = match mode {
        PivotMode::PreferAccurateEigenvectors => {
            if d1.abs() <= c13.abs() {
                if d1.abs() <= c12.abs() {
                    1
                } else {
                    2
                }
            } else if c12.abs() <= c13.abs() {
                2
            } else {
                3
            }
        }
        PivotMode::PreferAccurateEigenvalues => {
            if d1.abs() >= c13.abs() {
                if d1.abs() >= c12.abs() {
                    1
                } else {
                    2
                }
            } else if c12.abs() >= c13.abs() {
                2
            } else {
                3
            }
        }
    };

    // Move the chosen row of the pivot column into the lead. A row swap of
    // a symmetric matrix is no longer symmetric, so all nine entries are
    // spelled out for the elimination helper.
    let (e1, e2, e3, e12, e13, e23, c21, c31, c32) = match row {
        1 => (d1, d2, d3, c12, c13, c23, c12, c13, c23),
        2 => (c12, c12, d3, d2, c23, c13, d1, c13, c23),
        _ => (c13, d2, c13, c23, d3, c23, c12, d1, c12),
    };

    let (plane, z) = eliminate_column1(mode, e1, e2, e3, e12, e13, e23, c21, c31, c32);

    let [mut z1, mut z2, mut z3] = z;
    match col {
        2 => core::mem::swap(&mut z1, &mut z2),
        3 => core::mem::swap(&mut z1, &mut z3),
        _ => {}
    }

    if plane {
        KernelVector::Plane([z1, z2, z3])
    } else {
        KernelVector::Line([z1, z2, z3])
    }
}
