// Equilibrium values of two-player zero-sum extensive-form games, computed by
// solving the sequence-form linear program of one player.

mod error;
mod sequence_form_lp;
mod solver;
mod zero_sum_solution;

pub use error::Error;
pub use sequence_form_lp::SequenceFormLp;
pub use solver::{root_value, solve, solve_program, SolverConfig};
pub use zero_sum_solution::{RealizationPlan, ZeroSumSolution};
