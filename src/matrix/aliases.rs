//! Pre-defined type aliases for the matrix sizes this crate's closed-form
//! decompositions serve (orders 1 through 3). Vector aliases live in
//! [`crate::matrix::vector`].

use crate::Matrix;

// ── Square matrix aliases ──────────────────────────────────────────

/// 1×1 matrix.
pub type Matrix1<T> = Matrix<T, 1, 1>;
/// 2×2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;
/// 3×3 matrix.
pub type Matrix3<T> = Matrix<T, 3, 3>;

// ── Rectangular matrix aliases ─────────────────────────────────────

/// 2×1 matrix (a single 2-element column).
pub type Matrix2x1<T> = Matrix<T, 2, 1>;
/// 3×1 matrix (a single 3-element column).
pub type Matrix3x1<T> = Matrix<T, 3, 1>;
/// 3×2 matrix.
pub type Matrix3x2<T> = Matrix<T, 3, 2>;
