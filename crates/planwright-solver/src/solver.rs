//! The solver: runs its phases in order and returns the best solution.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::Termination;

/// Termination that never fires; the phases decide when to stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl<S: PlanningSolution, D: ScoreDirector<S>> Termination<S, D> for NoTermination {
    fn is_solver_terminated(&self, _scope: &SolverScope<S, D>) -> bool {
        false
    }
}

/// A statically typed sequence of phases.
///
/// Implemented for tuples of [`Phase`]s, so the phase chain stays fully
/// monomorphized. Solver-level termination is re-checked between
/// phases.
pub trait PhaseList<S: PlanningSolution, D: ScoreDirector<S>>: Send {
    fn run_all<T: Termination<S, D>>(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        termination: &T,
    );
}

macro_rules! impl_phase_list {
    ($($name:ident : $index:tt),+) => {
        impl<S, D, $($name),+> PhaseList<S, D> for ($($name,)+)
        where
            S: PlanningSolution,
            D: ScoreDirector<S>,
            $($name: Phase<S, D>,)+
        {
            fn run_all<T: Termination<S, D>>(
                &mut self,
                solver_scope: &mut SolverScope<S, D>,
                termination: &T,
            ) {
                $(
                    if solver_scope.is_terminate_early()
                        || termination.is_solver_terminated(solver_scope)
                    {
                        return;
                    }
                    info!(phase = self.$index.phase_type_name(), "Phase starting");
                    self.$index.solve(solver_scope, termination);
                )+
            }
        }
    };
}

impl_phase_list!(P0: 0);
impl_phase_list!(P0: 0, P1: 1);
impl_phase_list!(P0: 0, P1: 1, P2: 2);
impl_phase_list!(P0: 0, P1: 1, P2: 2, P3: 3);

/// Runs a chain of phases against a score director and keeps the best
/// solution found along the way.
///
/// The solver is deterministic when seeded: all randomness flows from
/// one seeded random sequence in the solver scope.
pub struct Solver<P, T> {
    phases: P,
    termination: T,
    random_seed: Option<u64>,
    terminate_early_flag: Arc<AtomicBool>,
}

impl<P> Solver<P, NoTermination> {
    pub fn new(phases: P) -> Self {
        Self {
            phases,
            termination: NoTermination,
            random_seed: None,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<P, T> Solver<P, T> {
    /// Replaces the solver-level termination.
    pub fn with_termination<T2>(self, termination: T2) -> Solver<P, T2> {
        Solver {
            phases: self.phases,
            termination,
            random_seed: self.random_seed,
            terminate_early_flag: self.terminate_early_flag,
        }
    }

    /// Fixes the random seed for a reproducible run.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Returns a handle that stops the running solver from another
    /// thread. The solver finishes its current step, keeps its best
    /// solution and returns.
    pub fn terminate_early_handle(&self) -> Arc<AtomicBool> {
        self.terminate_early_flag.clone()
    }

    /// Requests early termination.
    pub fn terminate_early(&self) {
        self.terminate_early_flag.store(true, Ordering::SeqCst);
    }

    /// Solves the problem held by the score director and returns the
    /// best solution found.
    pub fn solve<S, D>(&mut self, score_director: D) -> S
    where
        S: PlanningSolution,
        D: ScoreDirector<S>,
        P: PhaseList<S, D>,
        T: Termination<S, D>,
    {
        let mut solver_scope = match self.random_seed {
            Some(seed) => SolverScope::with_seed(score_director, seed),
            None => SolverScope::new(score_director),
        };
        solver_scope.set_terminate_early_flag(self.terminate_early_flag.clone());
        solver_scope.start_solving();

        let initial_score = solver_scope.calculate_score();
        solver_scope.update_best_solution();
        info!(score = %initial_score, "Solving started");

        self.phases.run_all(&mut solver_scope, &self.termination);

        info!(
            step_count = solver_scope.total_step_count(),
            elapsed_millis = solver_scope
                .elapsed()
                .map(|e| e.as_millis() as u64)
                .unwrap_or(0),
            best_score = %solver_scope
                .best_score()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string()),
            "Solving ended"
        );
        solver_scope.take_best_or_working_solution()
    }
}
