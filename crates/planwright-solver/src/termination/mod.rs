//! Termination conditions deciding when solving stops.
//!
//! A termination is consulted at two granularities: once per step for
//! the running phase, and per phase boundary for the whole solver run.
//! Step- and improvement-based terminations only make sense at phase
//! granularity and never stop the solver on their own.

mod best_score;
mod composite;
mod step_count;
mod time;
mod unimproved;

pub use best_score::BestScoreTermination;
pub use composite::{AndTermination, OrTermination};
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedStepCountTermination;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use crate::scope::{PhaseScope, SolverScope};

/// Decides when the solver or the current phase should stop.
pub trait Termination<S: PlanningSolution, D: ScoreDirector<S>>: Send {
    /// Returns true when the whole solving run should stop.
    fn is_solver_terminated(&self, scope: &SolverScope<S, D>) -> bool;

    /// Returns true when the current phase should stop.
    ///
    /// Defaults to the solver-level answer; phase-local terminations
    /// override this.
    fn is_phase_terminated(&self, scope: &PhaseScope<'_, S, D>) -> bool {
        self.is_solver_terminated(scope.solver_scope())
    }
}
