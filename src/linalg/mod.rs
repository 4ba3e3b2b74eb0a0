//! Closed-form decompositions of small symmetric matrices.
//!
//! [`SymEigen2`] and [`SymEigen3`] are the full eigendecompositions;
//! eigenvalue-only entry points and the singular-value methods on
//! [`crate::Matrix`] live here too. All routines are pure,
//! allocation-free functions of their input with no shared state, safe to
//! call concurrently from any number of threads.

pub(crate) mod eigen2;
pub(crate) mod eigen3;
pub(crate) mod kernel;
pub(crate) mod reduce;
pub(crate) mod scale;
pub(crate) mod singular;

pub use eigen2::SymEigen2;
pub use eigen3::SymEigen3;

/// Pivoting strategy for the near-kernel search and the deflation step.
///
/// The elimination routines can pivot either to keep the deflated diagonal
/// entries accurate (better eigenvalues) or to keep the recovered kernel
/// vector accurate (better eigenvectors). The full decompositions use
/// [`PivotMode::PreferAccurateEigenvectors`]; the eigenvalue-only and
/// singular-value paths, which never form eigenvectors, use
/// [`PivotMode::PreferAccurateEigenvalues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PivotMode {
    /// Pivot for accurate eigenvalues: eliminate the smaller entry of a
    /// pivot column first, order rows largest-magnitude diagonal first,
    /// and reflect on the largest eigenvector component.
    PreferAccurateEigenvalues,
    /// Pivot for accurate eigenvectors: eliminate the larger entry of a
    /// pivot column first, order rows smallest-magnitude diagonal first,
    /// and reflect on the smallest eigenvector component.
    PreferAccurateEigenvectors,
}
