//! Analytic inversion of tridiagonal matrices, and band truncation.
//!
//! The inverse of an irreducible tridiagonal matrix is fully determined by two
//! O(m) coefficient sequences, so the dense inverse costs O(m²) instead of the
//! O(m³) of general elimination. This is what makes the per-block cost of the
//! precompute stage near-linear in the block size.

use ndarray::Array2;

use crate::error::SolverError;

/// Invert a tridiagonal `m×m` matrix.
///
/// Only the main diagonal and its two neighbors of `t` are read; all other
/// entries are assumed zero. The result is generally dense.
///
/// Forward coefficients `alpha` and backward coefficients `beta` are built by
/// the recurrences
///
/// ```text
/// alpha(0) = -c(0)/b(0),    alpha(k) = -c(k) / (b(k) + a(k)·alpha(k-1))
/// beta(m-1) = -a(m-1)/b(m-1),  beta(k) = -a(k) / (b(k) + c(k)·beta(k+1))
/// ```
///
/// and each output column is filled outward from its diagonal entry. A zero
/// denominator anywhere is a structural singularity of `t` and is reported as
/// [`SolverError::SingularTridiagonal`] instead of leaking NaN/Inf entries.
pub fn invert_tridiagonal(t: &Array2<f64>) -> Result<Array2<f64>, SolverError> {
    let m = t.nrows();
    if m == 0 || t.ncols() != m {
        return Err(SolverError::DimensionMismatch {
            expected: m.max(1),
            got: t.ncols(),
        });
    }

    let sub = |k: usize| if k > 0 { t[[k, k - 1]] } else { 0.0 };
    let diag = |k: usize| t[[k, k]];
    let sup = |k: usize| if k + 1 < m { t[[k, k + 1]] } else { 0.0 };

    let mut alpha = vec![0.0; m];
    let mut beta = vec![0.0; m];

    alpha[0] = -sup(0) / diag(0);
    for k in 1..m {
        alpha[k] = -sup(k) / (diag(k) + sub(k) * alpha[k - 1]);
    }
    beta[m - 1] = -sub(m - 1) / diag(m - 1);
    for k in (0..m - 1).rev() {
        beta[k] = -sub(k) / (diag(k) + sup(k) * beta[k + 1]);
    }
    if alpha.iter().chain(&beta).any(|v| !v.is_finite()) {
        return Err(SolverError::SingularTridiagonal);
    }

    let mut inv = Array2::zeros((m, m));
    for l in 0..m {
        let alpha_prev = if l > 0 { alpha[l - 1] } else { 0.0 };
        let beta_next = if l + 1 < m { beta[l + 1] } else { 0.0 };
        let entry = 1.0 / (diag(l) + alpha_prev * sub(l) + sup(l) * beta_next);
        if !entry.is_finite() {
            return Err(SolverError::SingularTridiagonal);
        }
        inv[[l, l]] = entry;
        // fill the column upward from the diagonal, then downward
        for k in (0..l).rev() {
            inv[[k, l]] = alpha[k] * inv[[k + 1, l]];
        }
        for k in l + 1..m {
            inv[[k, l]] = beta[k] * inv[[k - 1, l]];
        }
    }

    Ok(inv)
}

/// Project a dense matrix onto its tridiagonal part: the main diagonal and its
/// immediate neighbors are kept, everything else becomes zero.
///
/// Pure and idempotent. Trades exactness for keeping every matrix fed back to
/// [`invert_tridiagonal`] tridiagonal.
pub fn band_truncate(matrix: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = matrix.dim();
    let mut banded = Array2::zeros((rows, cols));
    for i in 0..rows {
        for j in i.saturating_sub(1)..(i + 2).min(cols) {
            banded[[i, j]] = matrix[[i, j]];
        }
    }
    banded
}
