//! Solving phases.

pub mod localsearch;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use crate::scope::SolverScope;
use crate::termination::Termination;

/// A solving phase that improves the working solution until its
/// termination (or the solver's) fires.
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send {
    /// Runs the phase within the given solver scope.
    fn solve<T: Termination<S, D>>(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        termination: &T,
    );

    /// Returns the phase type name, for logging.
    fn phase_type_name(&self) -> &'static str;
}
