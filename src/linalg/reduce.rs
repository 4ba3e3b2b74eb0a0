//! Deflation of a symmetric 3×3 eigenproblem by one known eigenvector.

use crate::linalg::PivotMode;
use crate::traits::FloatScalar;

/// Result of [`reduce_3s`]: the transformed matrix `B = Q P A P Q` and the
/// transform itself.
///
/// `B` has zero entries at (1,2) and (1,3) by construction, so only its
/// diagonal and the (2,3) entry remain. `P` is the permutation swapping
/// coordinates 1 and `k`; `Q = I - g v v^t` is the reflection taking
/// `P z` to `e1`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reduced3<T> {
    /// `B[1,1]` — the Rayleigh quotient of the supplied eigenvector, i.e.
    /// its eigenvalue up to the vector's own accuracy.
    pub b1: T,
    /// `B[2,2]`.
    pub b2: T,
    /// `B[3,3]`.
    pub b3: T,
    /// `B[2,3]`.
    pub b23: T,
    /// Reflection axis (max-norm scaled, not unit length).
    pub v: [T; 3],
    /// Reflection gain: `Q = I - g v v^t` with `g = 2 / |v|^2`.
    pub g: T,
    /// Pivot coordinate of the permutation, 1-based.
    pub k: usize,
}

/// Deflate the symmetric 3×3 matrix
/// `[[d1, d12, d13], [d12, d2, d23], [d13, d23, d3]]` using one
/// (approximate) unit eigenvector `z`.
///
/// Picks the pivot coordinate `k` from `z` by `mode`
/// ([`PivotMode::PreferAccurateEigenvectors`]: smallest-magnitude
/// component, [`PivotMode::PreferAccurateEigenvalues`]: largest), then
/// builds the reflection `Q` with `Q P z = e1` and applies `Q P A P Q` as
/// the rank-two update `A - v w^t - w v^t` where `w = u - (g/2)(v^t u) v`
/// and `u = g A v`. Since `e1` is an eigenvector of the transformed
/// matrix, its first row and column vanish off the diagonal and the
/// remaining two eigenvalues sit in the trailing 2×2 block.
///
/// Degenerate case: when the non-pivot components of `P z` are both zero,
/// `z` already is `±e1` and `Q = I` (`v = 0`, `g = 1`).
pub(crate) fn reduce_3s<T: FloatScalar>(
    mode: PivotMode,
    mut d1: T,
    mut d2: T,
    mut d3: T,
    mut d12: T,
    mut d13: T,
    mut d23: T,
    z: [T; 3],
) -> Reduced3<T> {
    let [mut z1, mut z2, mut z3] = z;

    let k = match mode {
        PivotMode::PreferAccurateEigenvectors => {
            // smallest |z_k|: the reflection axis stays short, perturbing
            // the eigenvector components the least
            if z1.abs() <= z3.abs() {
                if z1.abs() <= z2.abs() {
                    1
                } else {
                    2
                }
            } else if z2.abs() <= z3.abs() {
                2
            } else {
                3
            }
        }
        PivotMode::PreferAccurateEigenvalues => {
            if z1.abs() >= z3.abs() {
                if z1.abs() >= z2.abs() {
                    1
                } else {
                    2
                }
            } else if z2.abs() >= z3.abs() {
                2
            } else {
                3
            }
        }
    };
    match k {
        2 => {
            core::mem::swap(&mut d13, &mut d23);
            core::mem::swap(&mut d1, &mut d2);
            core::mem::swap(&mut z1, &mut z2);
        }
        3 => {
            core::mem::swap(&mut d12, &mut d23);
            core::mem::swap(&mut d1, &mut d3);
            core::mem::swap(&mut z1, &mut z3);
        }
        _ => {}
    }

    let two = T::from_f64(2.0);
    let s = z2.hypot(z3);

    let (v, g) = if s == T::zero() {
        // z is already +/- e1; cannot happen when k picks the smallest
        // component of a unit vector
        ([T::zero(); 3], T::one())
    } else {
        let w1 = -s * (s / (z1 + T::one().copysign(z1))); // = z1 - copysign(1, z1)
        // max-norm scale of the axis, avoiding a sqrt
        let mut m = w1.abs();
        if z2.abs() > m {
            m = z2.abs();
        }
        if z3.abs() > m {
            m = z3.abs();
        }
        let v1 = w1 / m;
        let v2 = z2 / m;
        let v3 = z3 / m;
        let g = two / (v1 * v1 + v2 * v2 + v3 * v3);

        // u = g A v
        let mut w1 = g * (d1 * v1 + d12 * v2 + d13 * v3);
        let mut w2 = g * (d12 * v1 + d2 * v2 + d23 * v3);
        let mut w3 = g * (d13 * v1 + d23 * v2 + d3 * v3);
        // w = u - (g/2)(v^t u) v
        let s = (g / two) * (v1 * w1 + v2 * w2 + v3 * w3);
        w1 = w1 - s * v1;
        w2 = w2 - s * v2;
        w3 = w3 - s * v3;
        // B = A - v w^t - w v^t; entries (1,2) and (1,3) cancel exactly
        d1 = d1 - two * v1 * w1;
        d2 = d2 - two * v2 * w2;
        d23 = d23 - (v2 * w3 + v3 * w2);
        d3 = d3 - two * v3 * w3;

        ([v1, v2, v3], g)
    };

    Reduced3 {
        b1: d1,
        b2: d2,
        b3: d3,
        b23: d23,
        v,
        g,
        k,
    }
}
