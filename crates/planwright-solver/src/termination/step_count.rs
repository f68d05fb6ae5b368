//! Step count termination.

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::Termination;
use crate::scope::{PhaseScope, SolverScope};

/// Stops the current phase after a fixed number of steps.
///
/// This is a phase-local termination: at solver granularity it never
/// fires, since the phase step counter resets per phase.
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    step_limit: u64,
}

impl StepCountTermination {
    pub fn new(step_limit: u64) -> Self {
        Self { step_limit }
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for StepCountTermination {
    fn is_solver_terminated(&self, _scope: &SolverScope<S, D>) -> bool {
        false
    }

    fn is_phase_terminated(&self, scope: &PhaseScope<'_, S, D>) -> bool {
        scope.step_count() >= self.step_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_director;

    #[test]
    fn fires_at_phase_step_limit() {
        let mut solver_scope = SolverScope::new(test_director(vec![Some(1)]));
        let mut phase_scope = PhaseScope::new(&mut solver_scope);
        let termination = StepCountTermination::new(2);
        assert!(!Termination::is_phase_terminated(&termination, &phase_scope));
        phase_scope.step_completed(false);
        assert!(!Termination::is_phase_terminated(&termination, &phase_scope));
        phase_scope.step_completed(false);
        assert!(Termination::is_phase_terminated(&termination, &phase_scope));
    }

    #[test]
    fn never_fires_at_solver_level() {
        let scope = SolverScope::new(test_director(vec![Some(1)]));
        let termination = StepCountTermination::new(0);
        assert!(!Termination::is_solver_terminated(&termination, &scope));
    }
}
