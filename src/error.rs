//! Crate-wide error type for the solver pipeline.

use thiserror::Error;

/// Errors raised by equation construction, the precompute stage and the
/// Seidel loop.
///
/// None of these are retryable with the same input: the computation is
/// deterministic, so a retry reproduces the failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Block counts, block dimensions or vector lengths disagree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A denominator in the tridiagonal inverter produced a non-finite value.
    #[error("tridiagonal matrix is singular (non-finite elimination coefficient)")]
    SingularTridiagonal,

    /// The elimination step for one block hit a singular tridiagonal matrix.
    #[error("singular tridiagonal system while eliminating block {block}")]
    SingularBlock { block: usize },

    /// Dense LU pivot breakdown (validation path only).
    #[error("matrix is singular or nearly singular")]
    SingularMatrix,

    /// The iteration bound was exceeded before the precision threshold was met.
    #[error("Seidel iteration did not converge after {rounds} rounds (last distance {distance:.3e})")]
    NonConvergence { rounds: usize, distance: f64 },
}
