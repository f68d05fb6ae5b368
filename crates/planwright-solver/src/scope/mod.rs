//! Scope types that carry solving state through the solver, phase and
//! step lifecycles.

mod phase;
mod solver;
mod step;

pub use phase::PhaseScope;
pub use solver::SolverScope;
pub use step::{LocalSearchMoveScope, LocalSearchStepScope};
