//! Unimproved step count termination.

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Stops the current phase after a number of steps without any best
/// score improvement.
///
/// Phase-local, like [`StepCountTermination`](super::StepCountTermination).
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    step_limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(step_limit: u64) -> Self {
        Self { step_limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D>
    for UnimprovedStepCountTermination
{
    fn is_solver_terminated(&self, _scope: &SolverScope<S, D>) -> bool {
        false
    }

    fn is_phase_terminated(&self, scope: &PhaseScope<'_, S, D>) -> bool {
        scope.unimproved_step_count() >= self.step_limit
    }
}
