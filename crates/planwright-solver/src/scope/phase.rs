//! Phase-level scope.

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::SolverScope;

/// Scope for a single phase run, layered over the solver scope.
///
/// Tracks the step counters that phase-level terminations consume:
/// how many steps ran and when the best score last improved.
pub struct PhaseScope<'a, S: PlanningSolution, D: ScoreDirector<S>> {
    solver_scope: &'a mut SolverScope<S, D>,
    step_count: u64,
    last_improvement_step: u64,
    last_step_score: Option<S::Score>,
}

impl<'a, S: PlanningSolution, D: ScoreDirector<S>> PhaseScope<'a, S, D> {
    pub fn new(solver_scope: &'a mut SolverScope<S, D>) -> Self {
        Self {
            solver_scope,
            step_count: 0,
            last_improvement_step: 0,
            last_step_score: None,
        }
    }

    pub fn solver_scope(&self) -> &SolverScope<S, D> {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope<S, D> {
        self.solver_scope
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Number of completed steps since the phase best last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        self.step_count - self.last_improvement_step
    }

    pub fn last_step_score(&self) -> Option<&S::Score> {
        self.last_step_score.as_ref()
    }

    pub fn set_last_step_score(&mut self, score: S::Score) {
        self.last_step_score = Some(score);
    }

    /// Records a completed step, noting whether it improved the best.
    pub fn step_completed(&mut self, improved_best: bool) {
        self.step_count += 1;
        self.solver_scope.increment_step_count();
        if improved_best {
            self.last_improvement_step = self.step_count;
        }
    }
}
