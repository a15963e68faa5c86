//! Block-tridiagonal equation representation.
//!
//! An equation of `n` blocks stores, per block `k`, the square `m×m` coupling
//! matrices `A_k` (to block `k-1`), `B_k` (self) and `C_k` (to block `k+1`)
//! together with the right-hand side `f_k`. In the equivalent dense system the
//! off-diagonal bands carry `-A_k` and `-C_k`, so block row `k` reads
//! `-A_k·x_{k-1} + B_k·x_k - C_k·x_{k+1} = f_k`, or equivalently
//! `B_k·x_k = f_k + A_k·x_{k-1} + C_k·x_{k+1}`.
//!
//! The boundary invariant (`A_0 = 0`, `C_{n-1} = 0`) holds by construction:
//! callers only supply the `n-1` interior couplings per band.

use ndarray::{s, Array1, Array2};

use crate::blockvec::join_vectors;
use crate::error::SolverError;

/// A linear system whose coefficient matrix is block-tridiagonal.
///
/// Immutable once built; the solver stages never modify it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTridiagonalEquation {
    // Padded with zero matrices so `a(0)` and `c(n-1)` always exist.
    sub: Vec<Array2<f64>>,
    diag: Vec<Array2<f64>>,
    sup: Vec<Array2<f64>>,
    rhs: Vec<Array1<f64>>,
}

impl BlockTridiagonalEquation {
    /// Build an equation from its block diagonal `B_0..B_{n-1}`, the interior
    /// sub-couplings `A_1..A_{n-1}`, the interior super-couplings
    /// `C_0..C_{n-2}` and the per-block right-hand sides.
    ///
    /// Every matrix must be square with the same side as the right-hand side
    /// vectors; both coupling bands must hold exactly `n - 1` matrices.
    pub fn new(
        diag: Vec<Array2<f64>>,
        sub: Vec<Array2<f64>>,
        sup: Vec<Array2<f64>>,
        rhs: Vec<Array1<f64>>,
    ) -> Result<Self, SolverError> {
        let n = diag.len();
        if n == 0 {
            return Err(SolverError::DimensionMismatch { expected: 1, got: 0 });
        }
        if rhs.len() != n {
            return Err(SolverError::DimensionMismatch {
                expected: n,
                got: rhs.len(),
            });
        }
        if sub.len() != n - 1 {
            return Err(SolverError::DimensionMismatch {
                expected: n - 1,
                got: sub.len(),
            });
        }
        if sup.len() != n - 1 {
            return Err(SolverError::DimensionMismatch {
                expected: n - 1,
                got: sup.len(),
            });
        }

        let m = rhs[0].len();
        for f in &rhs {
            if f.len() != m {
                return Err(SolverError::DimensionMismatch {
                    expected: m,
                    got: f.len(),
                });
            }
        }
        for block in diag.iter().chain(&sub).chain(&sup) {
            if block.nrows() != m || block.ncols() != m {
                return Err(SolverError::DimensionMismatch {
                    expected: m,
                    got: block.nrows().max(block.ncols()),
                });
            }
        }

        let zero = Array2::zeros((m, m));
        let mut padded_sub = Vec::with_capacity(n);
        padded_sub.push(zero.clone());
        padded_sub.extend(sub);
        let mut padded_sup = sup;
        padded_sup.push(zero);

        Ok(Self {
            sub: padded_sub,
            diag,
            sup: padded_sup,
            rhs,
        })
    }

    /// Coupling of block `k` to block `k - 1` (zero matrix for `k = 0`).
    pub fn a(&self, k: usize) -> &Array2<f64> {
        &self.sub[k]
    }

    /// Self-coupling of block `k`.
    pub fn b(&self, k: usize) -> &Array2<f64> {
        &self.diag[k]
    }

    /// Coupling of block `k` to block `k + 1` (zero matrix for the last block).
    pub fn c(&self, k: usize) -> &Array2<f64> {
        &self.sup[k]
    }

    /// Right-hand side of block `k`.
    pub fn f(&self, k: usize) -> &Array1<f64> {
        &self.rhs[k]
    }

    /// Number of blocks `n`.
    pub fn block_count(&self) -> usize {
        self.diag.len()
    }

    /// Side `m` of every block matrix.
    pub fn block_dim(&self) -> usize {
        self.rhs[0].len()
    }

    /// Element-wise sum of two equations of identical shape. Used to apply a
    /// perturbation system on top of a baseline system.
    pub fn add(&self, other: &Self) -> Result<Self, SolverError> {
        if self.block_count() != other.block_count() {
            return Err(SolverError::DimensionMismatch {
                expected: self.block_count(),
                got: other.block_count(),
            });
        }
        if self.block_dim() != other.block_dim() {
            return Err(SolverError::DimensionMismatch {
                expected: self.block_dim(),
                got: other.block_dim(),
            });
        }

        let sum_matrices = |lhs: &[Array2<f64>], rhs: &[Array2<f64>]| {
            lhs.iter().zip(rhs).map(|(l, r)| l + r).collect::<Vec<_>>()
        };

        // The padded zero boundaries stay zero under addition.
        Ok(Self {
            sub: sum_matrices(&self.sub, &other.sub),
            diag: sum_matrices(&self.diag, &other.diag),
            sup: sum_matrices(&self.sup, &other.sup),
            rhs: self
                .rhs
                .iter()
                .zip(&other.rhs)
                .map(|(l, r)| l + r)
                .collect(),
        })
    }

    /// Dense `(n·m) × (n·m)` form of the system, with `-A_k` and `-C_k` on the
    /// off-diagonal bands. Reference/validation path only; the fast solver
    /// never assembles it.
    pub fn dense_matrix(&self) -> Array2<f64> {
        let n = self.block_count();
        let m = self.block_dim();
        let mut full = Array2::zeros((n * m, n * m));

        for k in 0..n {
            let r = k * m;
            full.slice_mut(s![r..r + m, r..r + m]).assign(self.b(k));
            if k > 0 {
                full.slice_mut(s![r..r + m, r - m..r])
                    .assign(&self.a(k).mapv(|v| -v));
            }
            if k + 1 < n {
                full.slice_mut(s![r..r + m, r + m..r + 2 * m])
                    .assign(&self.c(k).mapv(|v| -v));
            }
        }

        full
    }

    /// Concatenation of the per-block right-hand sides.
    pub fn rhs_vector(&self) -> Array1<f64> {
        join_vectors(&self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_block_scalar() -> BlockTridiagonalEquation {
        BlockTridiagonalEquation::new(
            vec![array![[4.0]], array![[4.0]]],
            vec![array![[1.0]]],
            vec![array![[1.0]]],
            vec![array![3.0], array![3.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors_and_zero_boundaries() {
        let eq = two_block_scalar();

        assert_eq!(eq.block_count(), 2);
        assert_eq!(eq.block_dim(), 1);
        assert_eq!(eq.a(0), &array![[0.0]]);
        assert_eq!(eq.a(1), &array![[1.0]]);
        assert_eq!(eq.c(0), &array![[1.0]]);
        assert_eq!(eq.c(1), &array![[0.0]]);
        assert_eq!(eq.f(1), &array![3.0]);
    }

    #[test]
    fn test_dense_matrix_negates_couplings() {
        let eq = two_block_scalar();
        assert_eq!(eq.dense_matrix(), array![[4.0, -1.0], [-1.0, 4.0]]);
        assert_eq!(eq.rhs_vector(), array![3.0, 3.0]);
    }

    #[test]
    fn test_construction_rejects_bad_shapes() {
        // coupling band too short
        let err = BlockTridiagonalEquation::new(
            vec![array![[1.0]], array![[1.0]]],
            vec![],
            vec![array![[1.0]]],
            vec![array![1.0], array![1.0]],
        )
        .unwrap_err();
        assert_eq!(err, SolverError::DimensionMismatch { expected: 1, got: 0 });

        // block dimension disagrees with the rhs
        let err = BlockTridiagonalEquation::new(
            vec![array![[1.0, 0.0], [0.0, 1.0]]],
            vec![],
            vec![],
            vec![array![1.0]],
        )
        .unwrap_err();
        assert_eq!(err, SolverError::DimensionMismatch { expected: 1, got: 2 });
    }

    #[test]
    fn test_add_is_element_wise() {
        let eq = two_block_scalar();
        let sum = eq.add(&eq).unwrap();

        assert_eq!(sum.b(0), &array![[8.0]]);
        assert_eq!(sum.c(0), &array![[2.0]]);
        assert_eq!(sum.a(1), &array![[2.0]]);
        assert_eq!(sum.f(0), &array![6.0]);
        // boundaries stay zero
        assert_eq!(sum.a(0), &array![[0.0]]);
        assert_eq!(sum.c(1), &array![[0.0]]);
    }

    #[test]
    fn test_add_rejects_shape_mismatch() {
        let eq = two_block_scalar();
        let single = BlockTridiagonalEquation::new(
            vec![array![[1.0]]],
            vec![],
            vec![],
            vec![array![1.0]],
        )
        .unwrap();

        assert_eq!(
            eq.add(&single).unwrap_err(),
            SolverError::DimensionMismatch { expected: 2, got: 1 }
        );
    }
}
