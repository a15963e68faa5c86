//! Perturbation sensitivity of a system.
//!
//! Solves a baseline equation and a perturbed one built with
//! [`BlockTridiagonalEquation::add`], then puts the observed solution
//! deviation next to the classical first-order condition-number bound
//! `δ_lhs + δ_rhs + δ_lhs·δ_rhs`.

use ndarray::Array1;

use crate::dense::{infinity_norm, inverse_infinity_norm};
use crate::equation::BlockTridiagonalEquation;
use crate::error::SolverError;
use crate::seidel::{solve_from_zero, SeidelConfig};

/// Observed and predicted effect of a perturbation on the solution.
#[derive(Debug, Clone)]
pub struct PerturbationReport {
    /// `‖x' − x‖₂` between the perturbed and baseline solutions.
    pub absolute_deviation: f64,
    /// Absolute deviation relative to `‖x‖₂`.
    pub relative_deviation: f64,
    /// First-order bound on the relative deviation from the condition
    /// numbers of the assembled systems.
    pub predicted_bound: f64,
    /// Rounds the baseline solve took.
    pub baseline_rounds: usize,
    /// Rounds the perturbed solve took.
    pub perturbed_rounds: usize,
}

/// Solve `eq` and `eq + perturbation` with the Seidel path and report how far
/// the perturbation moved the solution.
///
/// Matrix norms are taken in the infinity norm, vector norms in the Euclidean
/// norm.
pub fn perturbation_report(
    eq: &BlockTridiagonalEquation,
    perturbation: &BlockTridiagonalEquation,
    config: &SeidelConfig,
) -> Result<PerturbationReport, SolverError> {
    let perturbed = eq.add(perturbation)?;

    let baseline = solve_from_zero(eq, config)?;
    let shifted = solve_from_zero(&perturbed, config)?;

    let absolute_deviation = euclidean_norm(&(&shifted.x - &baseline.x));
    let relative_deviation = absolute_deviation / euclidean_norm(&baseline.x);

    let lhs = eq.dense_matrix();
    let perturbed_lhs = perturbed.dense_matrix();
    let inverse_norm = inverse_infinity_norm(&lhs)?;

    let cond_rhs = infinity_norm(&lhs) * inverse_norm;
    let cond_lhs = infinity_norm(&perturbed_lhs) * inverse_norm;

    let delta_rhs =
        cond_rhs * euclidean_norm(&perturbation.rhs_vector()) / euclidean_norm(&eq.rhs_vector());
    let delta_lhs =
        cond_lhs * infinity_norm(&perturbation.dense_matrix()) / infinity_norm(&perturbed_lhs);
    let predicted_bound = delta_lhs + delta_rhs + delta_lhs * delta_rhs;

    Ok(PerturbationReport {
        absolute_deviation,
        relative_deviation,
        predicted_bound,
        baseline_rounds: baseline.rounds,
        perturbed_rounds: shifted.rounds,
    })
}

fn euclidean_norm(v: &Array1<f64>) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
