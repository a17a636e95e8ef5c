// Linear programming backends. Model construction is written against the
// `SolverBackend` trait, so any LP engine can be plugged in by implementing it.

mod minilp_solver;
mod model;

pub use minilp_solver::MinilpSolver;
pub use model::{
    Bounds, Comparison, LinearExpression, LpSolution, Sense, SolverBackend, SolverError, Variable,
};
