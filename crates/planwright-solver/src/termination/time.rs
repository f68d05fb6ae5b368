//! Wall-clock time termination.

use std::time::Duration;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::Termination;
use crate::scope::SolverScope;

/// Stops solving after a fixed wall-clock budget.
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for TimeTermination {
    fn is_solver_terminated(&self, scope: &SolverScope<S, D>) -> bool {
        scope.elapsed().is_some_and(|elapsed| elapsed >= self.limit)
    }
}
