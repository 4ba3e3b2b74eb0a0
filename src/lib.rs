//! # spectris
//!
//! Closed-form eigenvalue and singular-value decompositions for small dense
//! symmetric matrices (orders 1 through 3), no-std compatible. Everything is
//! analytic — a handful of transcendental calls per decomposition, no
//! iteration — so a call costs the same whether the spectrum is well
//! separated or degenerate. Built for inner loops that decompose one small
//! matrix per mesh element or quadrature point, millions of times per step.
//!
//! ## Quick start
//!
//! ```
//! use spectris::SymMatrix3;
//!
//! // the symmetric matrix [[2,1,0],[1,2,0],[0,0,5]]
//! let a = SymMatrix3::new(2.0_f64, 2.0, 5.0, 1.0, 0.0, 0.0);
//!
//! let eig = a.eig();
//! let lambda = eig.eigenvalues(); // ascending: [1, 3, 5]
//! assert!((lambda[0] - 1.0).abs() < 1e-12);
//!
//! // columns of V are the unit eigenvectors, A = V diag(λ) V^T
//! let v = eig.eigenvectors();
//! assert!((v[(0, 0)].abs() - (0.5_f64).sqrt()).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Fixed-size `Matrix<T, M, N>` with const-generic dimensions,
//!   stack-allocated, with the arithmetic, norms, and vector types the
//!   decompositions and their callers need. Aliases cover the 1..=3 sizes
//!   this crate serves.
//!
//! - [`sym`] — [`SymMatrix2`] / [`SymMatrix3`] compact symmetric storage
//!   (upper triangle only), the natural input type of the eigen kernels.
//!
//! - [`linalg`] — The decompositions. [`SymEigen2`] / [`SymEigen3`] wrapper
//!   structs, eigenvalue-only entry points, and closed-form singular values
//!   ([`Matrix::singular_value`], [`Matrix::singular_values`],
//!   [`Matrix::rank`]) for every shape with `1 <= width <= height <= 3`.
//!
//! - [`traits`] — [`Scalar`] and [`FloatScalar`] element bounds
//!   (`f32` / `f64`).
//!
//! ## Ordering convention
//!
//! Eigenvalues are returned **ascending** (`λ[0]` smallest); singular values
//! are indexed **descending** (`σ[0]` largest). The asymmetry is historical:
//! existing callers index singular values by "0 = largest" in quality
//! metrics, so it is kept rather than silently flipped.
//!
//! ## Degenerate input
//!
//! Repeated eigenvalues, rank-deficient and zero matrices are handled by
//! dedicated branches, not error paths: the decompositions always return a
//! complete result with an orthonormal basis (arbitrary within an
//! eigenspace when eigenvalues coincide). The only panics are precondition
//! violations — shapes outside the closed-form range or an out-of-range
//! singular value index.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm |
//! | `libm`  | no       | Pure-Rust software float fallback for no-std |

#![cfg_attr(not(feature = "std"), no_std)]

pub mod linalg;
pub mod matrix;
pub mod sym;
pub mod traits;

pub use linalg::{SymEigen2, SymEigen3};
pub use matrix::aliases::{Matrix1, Matrix2, Matrix2x1, Matrix3, Matrix3x1, Matrix3x2};
pub use matrix::vector::{Vector, Vector1, Vector2, Vector3};
pub use matrix::Matrix;
pub use sym::{SymMatrix2, SymMatrix3};
pub use traits::{FloatScalar, Scalar};
