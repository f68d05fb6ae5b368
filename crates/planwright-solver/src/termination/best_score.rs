//! Best score termination.

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Stops solving once the best score reaches a target.
#[derive(Debug, Clone)]
pub struct BestScoreTermination<Sc> {
    target: Sc,
}

impl<Sc> BestScoreTermination<Sc> {
    pub fn new(target: Sc) -> Self {
        Self { target }
    }
}

impl<S, D> Termination<S, D> for BestScoreTermination<S::Score>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    fn is_solver_terminated(&self, scope: &SolverScope<S, D>) -> bool {
        scope.best_score().is_some_and(|best| *best >= self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_director;
    use planwright_core::SimpleScore;

    #[test]
    fn fires_once_target_is_reached() {
        let mut scope = SolverScope::new(test_director(vec![Some(3)]));
        let termination = BestScoreTermination::new(SimpleScore::of(3));
        assert!(!Termination::is_solver_terminated(&termination, &scope));
        scope.update_best_solution();
        assert!(Termination::is_solver_terminated(&termination, &scope));
    }

    #[test]
    fn stays_quiet_below_target() {
        let mut scope = SolverScope::new(test_director(vec![Some(3)]));
        scope.update_best_solution();
        let termination = BestScoreTermination::new(SimpleScore::of(100));
        assert!(!Termination::is_solver_terminated(&termination, &scope));
    }
}
