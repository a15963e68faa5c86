//! Helpers for vectors partitioned into equal-size blocks.

use ndarray::{s, Array1};

/// Infinity-norm distance between two block iterates: the maximum absolute
/// per-coordinate difference.
pub fn infinity_distance(x: &[Array1<f64>], y: &[Array1<f64>]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let mut dist = 0.0_f64;
    for (xi, yi) in x.iter().zip(y) {
        debug_assert_eq!(xi.len(), yi.len());
        for (&u, &v) in xi.iter().zip(yi) {
            dist = dist.max((u - v).abs());
        }
    }
    dist
}

/// Concatenate per-block vectors into one flat vector.
pub fn join_vectors(blocks: &[Array1<f64>]) -> Array1<f64> {
    let total: usize = blocks.iter().map(|b| b.len()).sum();
    let mut joined = Array1::zeros(total);
    let mut offset = 0;
    for block in blocks {
        joined.slice_mut(s![offset..offset + block.len()]).assign(block);
        offset += block.len();
    }
    joined
}

/// Split a flat vector back into blocks of `block_dim` coordinates.
/// Inverse of [`join_vectors`] for uniform block sizes.
pub fn split_vector(v: &Array1<f64>, block_dim: usize) -> Vec<Array1<f64>> {
    debug_assert!(block_dim > 0 && v.len() % block_dim == 0);
    (0..v.len() / block_dim)
        .map(|k| v.slice(s![k * block_dim..(k + 1) * block_dim]).to_owned())
        .collect()
}

/// Block structure of `vectors` with every coordinate set to `value`.
pub fn filled_like(vectors: &[Array1<f64>], value: f64) -> Vec<Array1<f64>> {
    vectors
        .iter()
        .map(|v| Array1::from_elem(v.len(), value))
        .collect()
}
