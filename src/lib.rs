//! Solvers for block-tridiagonal linear systems
//!
//! Systems whose coefficient matrix, viewed as an `n×n` grid of `m×m` dense
//! blocks, is nonzero only on the block diagonal and the two adjacent block
//! bands. The solver combines a one-time block elimination built on an O(m²)
//! analytic tridiagonal inverse with an outer fixed-point (Seidel-style)
//! iteration that corrects the banding approximation made during elimination.
//! A dense LU path over the assembled system is provided for validation and
//! sensitivity analysis only.
//!
//! # Example
//!
//! ```
//! use block_tridiag_solvers::{solve_from_zero, BlockTridiagonalEquation, SeidelConfig};
//! use ndarray::array;
//!
//! // [[4, -1], [-1, 4]] · x = (3, 3)
//! let eq = BlockTridiagonalEquation::new(
//!     vec![array![[4.0]], array![[4.0]]],
//!     vec![array![[1.0]]],
//!     vec![array![[1.0]]],
//!     vec![array![3.0], array![3.0]],
//! )?;
//!
//! let solution = solve_from_zero(&eq, &SeidelConfig::default())?;
//! assert!((solution.x[0] - 1.0).abs() < 1e-5);
//! assert!((solution.x[1] - 1.0).abs() < 1e-5);
//! # Ok::<(), block_tridiag_solvers::SolverError>(())
//! ```

pub mod analysis;
pub mod blockvec;
pub mod dense;
pub mod equation;
pub mod error;
pub mod generate;
pub mod precompute;
pub mod seidel;
pub mod tridiagonal;

// Re-export the main types
pub use analysis::{perturbation_report, PerturbationReport};
pub use dense::{condition_number, dense_solve, DenseLu};
pub use equation::BlockTridiagonalEquation;
pub use error::SolverError;
pub use precompute::{precompute, BlockFactors};
pub use seidel::{solve, solve_from_zero, SeidelConfig, SeidelSolution};
pub use tridiagonal::{band_truncate, invert_tridiagonal};
