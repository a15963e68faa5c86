//! Outer fixed-point (block Seidel) iteration.
//!
//! Each round runs a forward sweep through the blocks followed by a backward
//! substitution, then compares the new iterate against the previous one in the
//! infinity norm. The banding approximation made during precompute only
//! affects the path the iteration takes: its fixed point satisfies the exact
//! block system `B_k·x_k = f_k + A_k·x_{k-1} + C_k·x_{k+1}`, so a converged
//! result solves the original equation up to the precision threshold.
//!
//! Every round works on immutable snapshots of the previous iterate; nothing
//! is mutated in place across sweeps.

use ndarray::Array1;

use crate::blockvec::{filled_like, infinity_distance, join_vectors};
use crate::equation::BlockTridiagonalEquation;
use crate::error::SolverError;
use crate::precompute::{precompute, BlockFactors};

/// Seidel loop configuration.
#[derive(Debug, Clone)]
pub struct SeidelConfig {
    /// Infinity-norm distance between successive iterates below which the
    /// iteration stops.
    pub precision: f64,
    /// Maximum number of rounds before reporting non-convergence.
    pub max_rounds: usize,
    /// Log progress every N rounds (0 = no output).
    pub print_interval: usize,
}

impl Default for SeidelConfig {
    fn default() -> Self {
        Self {
            precision: 1e-6,
            max_rounds: 10_000,
            print_interval: 0,
        }
    }
}

/// Converged solver output.
#[derive(Debug, Clone)]
pub struct SeidelSolution {
    /// Concatenated solution vector.
    pub x: Array1<f64>,
    /// Number of sweep rounds performed.
    pub rounds: usize,
    /// Infinity-norm distance between the last two iterates.
    pub distance: f64,
}

/// Precompute the block factors of `eq` and solve it from the all-zero guess.
pub fn solve_from_zero(
    eq: &BlockTridiagonalEquation,
    config: &SeidelConfig,
) -> Result<SeidelSolution, SolverError> {
    let factors = precompute(eq)?;
    let start = vec![Array1::zeros(eq.block_dim()); eq.block_count()];
    solve(eq, &factors, &start, config)
}

/// Solve `eq` using precomputed block factors and a caller-supplied starting
/// iterate (one vector per block).
///
/// The previous iterate is seeded with all-ones vectors, so for any start
/// that is not all-ones the first convergence check fails and at least one
/// sweep runs; a caller whose start already equals the solution sees exactly
/// one round.
pub fn solve(
    eq: &BlockTridiagonalEquation,
    factors: &BlockFactors,
    start: &[Array1<f64>],
    config: &SeidelConfig,
) -> Result<SeidelSolution, SolverError> {
    let n = eq.block_count();
    let m = eq.block_dim();
    if factors.block_count() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: factors.block_count(),
        });
    }
    if start.len() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: start.len(),
        });
    }
    for v in start {
        if v.len() != m {
            return Err(SolverError::DimensionMismatch {
                expected: m,
                got: v.len(),
            });
        }
    }

    // D(k)·C_k appears in both sweep phases; form it once per solve.
    let dc: Vec<_> = (0..n).map(|k| factors.d[k].dot(eq.c(k))).collect();

    let mut x: Vec<Array1<f64>> = start.to_vec();
    let mut distance = infinity_distance(&x, &filled_like(start, 1.0));
    let mut rounds = 0_usize;

    while distance > config.precision {
        if rounds >= config.max_rounds {
            return Err(SolverError::NonConvergence { rounds, distance });
        }

        let prev = x;
        let mut z: Vec<Array1<f64>> = Vec::with_capacity(n);

        // Forward sweep. Couplings to blocks not yet visited this round come
        // from the previous iterate.
        if n == 1 {
            z.push(factors.g[0].dot(eq.f(0)));
        } else {
            z.push(factors.g[0].dot(&(eq.f(0) + &eq.c(0).dot(&prev[1]))) - dc[0].dot(&prev[1]));
            for k in 1..n - 1 {
                let coupled = eq.f(k) + &eq.a(k).dot(&z[k - 1]) + &eq.c(k).dot(&prev[k + 1]);
                z.push(factors.g[k].dot(&coupled) - dc[k].dot(&prev[k + 1]));
            }
            z.push(factors.g[n - 1].dot(&(eq.f(n - 1) + &eq.a(n - 1).dot(&z[n - 2]))));
        }

        // Backward substitution.
        let mut next = vec![Array1::zeros(m); n];
        next[n - 1] = z[n - 1].clone();
        for k in (0..n - 1).rev() {
            next[k] = dc[k].dot(&next[k + 1]) + &z[k];
        }

        rounds += 1;
        distance = infinity_distance(&next, &prev);
        x = next;

        if config.print_interval > 0 && rounds % config.print_interval == 0 {
            log::info!("Seidel round {rounds}: distance = {distance:.6e}");
        }
    }

    Ok(SeidelSolution {
        x: join_vectors(&x),
        rounds,
        distance,
    })
}
