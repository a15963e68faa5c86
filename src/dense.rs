//! Dense reference path: LU with partial pivoting over the assembled system.
//!
//! Only the validation and analysis code uses this; the fast solver never
//! assembles the dense form. Callers needing resilience against a failing
//! Seidel run can fall back to [`dense_solve`].

use ndarray::{Array1, Array2};

use crate::equation::BlockTridiagonalEquation;
use crate::error::SolverError;

const PIVOT_FLOOR: f64 = 1e-30;

/// LU factors of a square matrix with partial pivoting.
///
/// `L` is unit lower triangular and stored below the diagonal of `lu`;
/// `pivots[k]` records the row swapped into position `k` at step `k`.
#[derive(Debug, Clone)]
pub struct DenseLu {
    lu: Array2<f64>,
    pivots: Vec<usize>,
}

impl DenseLu {
    /// Factorize `a` with partial pivoting.
    pub fn factorize(a: &Array2<f64>) -> Result<Self, SolverError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(SolverError::DimensionMismatch {
                expected: n,
                got: a.ncols(),
            });
        }

        let mut lu = a.clone();
        let mut pivots = vec![0_usize; n];

        for k in 0..n {
            let mut max_val = lu[[k, k]].abs();
            let mut max_row = k;
            for i in k + 1..n {
                let val = lu[[i, k]].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }
            if max_val < PIVOT_FLOOR {
                return Err(SolverError::SingularMatrix);
            }

            pivots[k] = max_row;
            if max_row != k {
                for j in 0..n {
                    lu.swap([k, j], [max_row, j]);
                }
            }

            let pivot = lu[[k, k]];
            for i in k + 1..n {
                let mult = lu[[i, k]] / pivot;
                lu[[i, k]] = mult;
                for j in k + 1..n {
                    let update = mult * lu[[k, j]];
                    lu[[i, j]] -= update;
                }
            }
        }

        Ok(Self { lu, pivots })
    }

    /// Solve `Ax = b` with the stored factors.
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>, SolverError> {
        let n = self.pivots.len();
        if b.len() != n {
            return Err(SolverError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }

        let mut x = b.clone();

        // apply the row swaps in factorization order
        for k in 0..n {
            let p = self.pivots[k];
            if p != k {
                x.swap(k, p);
            }
        }

        // forward substitution: Ly = Pb
        for i in 0..n {
            for j in 0..i {
                let l_ij = self.lu[[i, j]];
                x[i] -= l_ij * x[j];
            }
        }

        // backward substitution: Ux = y
        for i in (0..n).rev() {
            for j in i + 1..n {
                let u_ij = self.lu[[i, j]];
                x[i] -= u_ij * x[j];
            }
            let u_ii = self.lu[[i, i]];
            if u_ii.abs() < PIVOT_FLOOR {
                return Err(SolverError::SingularMatrix);
            }
            x[i] /= u_ii;
        }

        Ok(x)
    }
}

/// Assemble the dense form of `eq` and solve it directly.
pub fn dense_solve(eq: &BlockTridiagonalEquation) -> Result<Array1<f64>, SolverError> {
    DenseLu::factorize(&eq.dense_matrix())?.solve(&eq.rhs_vector())
}

/// Infinity (maximum absolute row sum) norm of a matrix.
pub fn infinity_norm(a: &Array2<f64>) -> f64 {
    a.rows()
        .into_iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// `‖A⁻¹‖` in the infinity norm, computed column by column from the LU
/// factors.
pub fn inverse_infinity_norm(a: &Array2<f64>) -> Result<f64, SolverError> {
    let n = a.nrows();
    let lu = DenseLu::factorize(a)?;

    let mut inv = Array2::zeros((n, n));
    let mut unit = Array1::zeros(n);
    for j in 0..n {
        unit[j] = 1.0;
        let column = lu.solve(&unit)?;
        inv.column_mut(j).assign(&column);
        unit[j] = 0.0;
    }

    Ok(infinity_norm(&inv))
}

/// Condition number `‖A‖·‖A⁻¹‖` in the infinity norm.
pub fn condition_number(a: &Array2<f64>) -> Result<f64, SolverError> {
    Ok(infinity_norm(a) * inverse_infinity_norm(a)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use crate::equation::BlockTridiagonalEquation;

    #[test]
    fn test_lu_solve() {
        let a = array![[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let b = array![1.0, 2.0, 3.0];

        let lu = DenseLu::factorize(&a).unwrap();
        let x = lu.solve(&b).unwrap();

        let ax = a.dot(&x);
        for i in 0..3 {
            assert_abs_diff_eq!(ax[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_needs_pivoting() {
        // zero leading pivot forces a row swap
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let b = array![2.0, 3.0];

        let x = DenseLu::factorize(&a).unwrap().solve(&b).unwrap();
        assert_abs_diff_eq!(x[0], 3.0);
        assert_abs_diff_eq!(x[1], 2.0);
    }

    #[test]
    fn test_lu_singular() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        assert_eq!(
            DenseLu::factorize(&a).unwrap_err(),
            SolverError::SingularMatrix
        );
    }

    #[test]
    fn test_dense_solve_of_block_system() {
        // [[4, -1], [-1, 4]]·x = (3, 3) → x = (1, 1)
        let eq = BlockTridiagonalEquation::new(
            vec![array![[4.0]], array![[4.0]]],
            vec![array![[1.0]]],
            vec![array![[1.0]]],
            vec![array![3.0], array![3.0]],
        )
        .unwrap();

        let x = dense_solve(&eq).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_norms_and_condition_number() {
        let a = array![[1.0, -2.0], [0.5, 0.25]];
        assert_abs_diff_eq!(infinity_norm(&a), 3.0);

        let identity = array![[1.0, 0.0], [0.0, 1.0]];
        assert_abs_diff_eq!(condition_number(&identity).unwrap(), 1.0);

        let scaled = array![[10.0, 0.0], [0.0, 0.1]];
        assert_abs_diff_eq!(condition_number(&scaled).unwrap(), 100.0, epsilon = 1e-9);
    }
}
