//! Seeded random equation fixtures.
//!
//! Every generator takes its random source as an argument, so test and
//! benchmark instances are reproducible from a seed; there is no global
//! random state anywhere in the crate.

use ndarray::{Array1, Array2};
use rand::Rng;

use crate::equation::BlockTridiagonalEquation;

/// Random vector with coordinates drawn uniformly from `lo..hi`.
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, dim: usize, lo: f64, hi: f64) -> Array1<f64> {
    Array1::from_shape_fn(dim, |_| rng.random_range(lo..hi))
}

fn random_matrix<R: Rng + ?Sized>(rng: &mut R, dim: usize, lo: f64, hi: f64) -> Array2<f64> {
    Array2::from_shape_fn((dim, dim), |_| rng.random_range(lo..hi))
}

/// Random matrix with entries only on the tridiagonal band. Diagonal blocks
/// must stay banded because the precompute stage reads nothing outside it.
fn random_banded<R: Rng + ?Sized>(rng: &mut R, dim: usize, lo: f64, hi: f64) -> Array2<f64> {
    let mut matrix = Array2::zeros((dim, dim));
    for i in 0..dim {
        for j in i.saturating_sub(1)..(i + 2).min(dim) {
            matrix[[i, j]] = rng.random_range(lo..hi);
        }
    }
    matrix
}

fn random_symmetric_banded<R: Rng + ?Sized>(
    rng: &mut R,
    dim: usize,
    lo: f64,
    hi: f64,
) -> Array2<f64> {
    let mut matrix = Array2::zeros((dim, dim));
    for i in 0..dim {
        matrix[[i, i]] = rng.random_range(lo..hi);
        if i + 1 < dim {
            let v = rng.random_range(lo..hi);
            matrix[[i, i + 1]] = v;
            matrix[[i + 1, i]] = v;
        }
    }
    matrix
}

/// Overwrite each diagonal entry of every `B_k` with the absolute row sum of
/// the whole block row, making the system strongly diagonally dominant.
fn dominate(diag: &mut [Array2<f64>], sub: &[Array2<f64>], sup: &[Array2<f64>]) {
    let n = diag.len();
    for k in 0..n {
        let m = diag[k].nrows();
        for i in 0..m {
            let mut row_sum = 0.0;
            for j in 0..m {
                row_sum += diag[k][[i, j]].abs();
                if k > 0 {
                    row_sum += sub[k - 1][[i, j]].abs();
                }
                if k + 1 < n {
                    row_sum += sup[k][[i, j]].abs();
                }
            }
            diag[k][[i, i]] = row_sum;
        }
    }
}

/// Strongly diagonally dominant system with banded diagonal blocks and dense
/// couplings; the Seidel path converges on these by construction.
pub fn diagonally_dominant<R: Rng + ?Sized>(
    rng: &mut R,
    blocks: usize,
    block_dim: usize,
    lo: f64,
    hi: f64,
) -> BlockTridiagonalEquation {
    let interior = blocks.saturating_sub(1);
    let mut diag: Vec<_> = (0..blocks)
        .map(|_| random_banded(rng, block_dim, lo, hi))
        .collect();
    let sub: Vec<_> = (0..interior)
        .map(|_| random_matrix(rng, block_dim, lo, hi))
        .collect();
    let sup: Vec<_> = (0..interior)
        .map(|_| random_matrix(rng, block_dim, lo, hi))
        .collect();
    dominate(&mut diag, &sub, &sup);

    let rhs = (0..blocks)
        .map(|_| random_vector(rng, block_dim, lo, hi))
        .collect();

    BlockTridiagonalEquation::new(diag, sub, sup, rhs)
        .expect("generated blocks share one dimension")
}

/// Self-adjoint system: symmetric tridiagonal diagonal blocks and
/// `A_{k+1} = C_kᵀ`, made diagonally dominant.
pub fn self_adjoint<R: Rng + ?Sized>(
    rng: &mut R,
    blocks: usize,
    block_dim: usize,
    lo: f64,
    hi: f64,
) -> BlockTridiagonalEquation {
    let interior = blocks.saturating_sub(1);
    let mut diag: Vec<_> = (0..blocks)
        .map(|_| random_symmetric_banded(rng, block_dim, lo, hi))
        .collect();
    let sup: Vec<_> = (0..interior)
        .map(|_| random_matrix(rng, block_dim, lo, hi))
        .collect();
    let sub: Vec<_> = sup.iter().map(|c| c.t().to_owned()).collect();
    dominate(&mut diag, &sub, &sup);

    let rhs = (0..blocks)
        .map(|_| random_vector(rng, block_dim, lo, hi))
        .collect();

    BlockTridiagonalEquation::new(diag, sub, sup, rhs)
        .expect("generated blocks share one dimension")
}

/// Small unstructured system with entries in `lo..hi`, meant to be added onto
/// a baseline equation as a perturbation. No dominance adjustment.
pub fn deviation<R: Rng + ?Sized>(
    rng: &mut R,
    blocks: usize,
    block_dim: usize,
    lo: f64,
    hi: f64,
) -> BlockTridiagonalEquation {
    let interior = blocks.saturating_sub(1);
    let diag: Vec<_> = (0..blocks)
        .map(|_| random_banded(rng, block_dim, lo, hi))
        .collect();
    let sub: Vec<_> = (0..interior)
        .map(|_| random_matrix(rng, block_dim, lo, hi))
        .collect();
    let sup: Vec<_> = (0..interior)
        .map(|_| random_matrix(rng, block_dim, lo, hi))
        .collect();
    let rhs = (0..blocks)
        .map(|_| random_vector(rng, block_dim, lo, hi))
        .collect();

    BlockTridiagonalEquation::new(diag, sub, sup, rhs)
        .expect("generated blocks share one dimension")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_seed_reproduces_the_equation() {
        let eq1 = diagonally_dominant(&mut StdRng::seed_from_u64(7), 4, 3, 0.0, 1.0);
        let eq2 = diagonally_dominant(&mut StdRng::seed_from_u64(7), 4, 3, 0.0, 1.0);
        assert_eq!(eq1, eq2);

        let eq3 = diagonally_dominant(&mut StdRng::seed_from_u64(8), 4, 3, 0.0, 1.0);
        assert_ne!(eq1, eq3);
    }

    #[test]
    fn test_dominant_system_is_diagonally_dominant() {
        let eq = diagonally_dominant(&mut StdRng::seed_from_u64(3), 5, 4, 0.0, 1.0);

        for k in 0..eq.block_count() {
            for i in 0..eq.block_dim() {
                let mut off_sum = 0.0;
                for j in 0..eq.block_dim() {
                    if j != i {
                        off_sum += eq.b(k)[[i, j]].abs();
                    }
                    off_sum += eq.a(k)[[i, j]].abs();
                    off_sum += eq.c(k)[[i, j]].abs();
                }
                assert!(
                    eq.b(k)[[i, i]] >= off_sum,
                    "block {k} row {i} is not dominant"
                );
            }
        }
    }

    #[test]
    fn test_self_adjoint_dense_form_is_symmetric() {
        let eq = self_adjoint(&mut StdRng::seed_from_u64(11), 3, 3, 0.0, 1.0);
        let full = eq.dense_matrix();

        for i in 0..full.nrows() {
            for j in 0..i {
                assert_eq!(full[[i, j]], full[[j, i]]);
            }
        }
    }

    #[test]
    fn test_boundary_blocks_are_zero() {
        let eq = deviation(&mut StdRng::seed_from_u64(5), 3, 2, 0.0, 0.1);
        let n = eq.block_count();

        assert!(eq.a(0).iter().all(|&v| v == 0.0));
        assert!(eq.c(n - 1).iter().all(|&v| v == 0.0));
    }
}
