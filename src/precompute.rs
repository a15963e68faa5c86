//! One-time block elimination stage.
//!
//! Runs a banded Schur-complement recursion over the blocks: each step inverts
//! `B_k - A_k·D(k-1)·C_{k-1}` with the fast tridiagonal inverter and then
//! re-truncates the result to bandwidth 1, so the next step again sees a
//! tridiagonal matrix and every per-block cost stays near O(m²). The
//! truncation error this introduces is corrected by the outer Seidel
//! iteration, not here.
//!
//! The factors depend only on the equation, never on the iterate, so they are
//! computed once and reused across all outer rounds.

use ndarray::Array2;

use crate::equation::BlockTridiagonalEquation;
use crate::error::SolverError;
use crate::tridiagonal::{band_truncate, invert_tridiagonal};

/// Per-block matrices produced by [`precompute`] and consumed by the solver.
#[derive(Debug, Clone)]
pub struct BlockFactors {
    /// `G(k)`: inverse of the banded running complement for block `k`.
    pub g: Vec<Array2<f64>>,
    /// `D(k)`: band truncation of `G(k)`.
    pub d: Vec<Array2<f64>>,
}

impl BlockFactors {
    /// Number of blocks the factors were computed for.
    pub fn block_count(&self) -> usize {
        self.g.len()
    }
}

/// Run the forward elimination over all blocks of `eq`.
///
/// Fails with [`SolverError::SingularBlock`] naming the offending block when
/// an elimination step hits a singular tridiagonal matrix.
pub fn precompute(eq: &BlockTridiagonalEquation) -> Result<BlockFactors, SolverError> {
    let n = eq.block_count();
    let mut g = Vec::with_capacity(n);
    let mut d = Vec::with_capacity(n);

    let flag_block = |block: usize| {
        move |e: SolverError| match e {
            SolverError::SingularTridiagonal => SolverError::SingularBlock { block },
            other => other,
        }
    };

    let g0 = invert_tridiagonal(eq.b(0)).map_err(flag_block(0))?;
    d.push(band_truncate(&g0));
    g.push(g0);

    for k in 1..n {
        let complement = eq.b(k) - &eq.a(k).dot(&d[k - 1]).dot(eq.c(k - 1));
        let gk = invert_tridiagonal(&complement).map_err(flag_block(k))?;
        d.push(band_truncate(&gk));
        g.push(gk);
    }

    log::debug!("precomputed factors for {n} blocks of dimension {}", eq.block_dim());

    Ok(BlockFactors { g, d })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_first_factor_is_inverse_of_first_diagonal_block() {
        let eq = BlockTridiagonalEquation::new(
            vec![array![[4.0]], array![[4.0]]],
            vec![array![[1.0]]],
            vec![array![[1.0]]],
            vec![array![3.0], array![3.0]],
        )
        .unwrap();

        let factors = precompute(&eq).unwrap();
        assert_eq!(factors.block_count(), 2);
        assert_abs_diff_eq!(factors.g[0][[0, 0]], 0.25);
        // for 1×1 blocks truncation changes nothing
        assert_eq!(factors.d[0], factors.g[0]);
        // G(1) = (B_1 - A_1·D(0)·C_0)^{-1} = 1 / (4 - 1·0.25·1)
        assert_abs_diff_eq!(factors.g[1][[0, 0]], 1.0 / 3.75);
    }

    #[test]
    fn test_d_is_band_truncation_of_g() {
        let eq = BlockTridiagonalEquation::new(
            vec![
                array![[4.0, 1.0, 0.0], [1.0, 4.0, 1.0], [0.0, 1.0, 4.0]],
                array![[5.0, 1.0, 0.0], [1.0, 5.0, 1.0], [0.0, 1.0, 5.0]],
            ],
            vec![array![[0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]]],
            vec![array![[0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]]],
            vec![array![1.0, 1.0, 1.0], array![1.0, 1.0, 1.0]],
        )
        .unwrap();

        let factors = precompute(&eq).unwrap();
        for k in 0..2 {
            assert_eq!(factors.d[k], band_truncate(&factors.g[k]));
            // the dense inverse of an irreducible tridiagonal block has
            // nonzero corners, so truncation must actually drop something
            assert!(factors.g[k][[0, 2]].abs() > 0.0);
            assert_abs_diff_eq!(factors.d[k][[0, 2]], 0.0);
        }
    }

    #[test]
    fn test_singular_block_reports_its_index() {
        // B_1 cancels exactly against A_1·D(0)·C_0 = I, so the second
        // elimination step sees the zero matrix.
        let eq = BlockTridiagonalEquation::new(
            vec![array![[1.0]], array![[1.0]]],
            vec![array![[1.0]]],
            vec![array![[1.0]]],
            vec![array![1.0], array![1.0]],
        )
        .unwrap();

        assert_eq!(
            precompute(&eq).unwrap_err(),
            SolverError::SingularBlock { block: 1 }
        );
    }

    #[test]
    fn test_singular_first_block() {
        let eq = BlockTridiagonalEquation::new(
            vec![array![[0.0]]],
            vec![],
            vec![],
            vec![array![1.0]],
        )
        .unwrap();

        assert_eq!(
            precompute(&eq).unwrap_err(),
            SolverError::SingularBlock { block: 0 }
        );
    }
}
