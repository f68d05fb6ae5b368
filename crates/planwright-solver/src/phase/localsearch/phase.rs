//! The local search phase loop.

use tracing::{debug, info};

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::acceptor::Acceptor;
use super::decider::LocalSearchDecider;
use super::forager::LocalSearchForager;
use crate::heuristic::{Move, MoveSelector};
use crate::phase::Phase;
use crate::scope::{LocalSearchStepScope, PhaseScope, SolverScope};
use crate::termination::Termination;

/// Iteratively improves an initialized solution, one step at a time.
///
/// Each step the decider trials the selected moves and picks a winner,
/// which the phase then applies for real. When no candidate is accepted
/// the step is a no-op: the working solution stays put but the step
/// still counts, so tabu windows slide and terminations make progress.
pub struct LocalSearchPhase<S, M, MS, A, F, PT> {
    decider: LocalSearchDecider<S, M, MS, A, F>,
    termination: PT,
}

impl<S, M, MS, A, F, PT> LocalSearchPhase<S, M, MS, A, F, PT>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S, M>,
    F: LocalSearchForager<S, M>,
{
    pub fn new(decider: LocalSearchDecider<S, M, MS, A, F>, termination: PT) -> Self {
        Self {
            decider,
            termination,
        }
    }

    pub fn decider_mut(&mut self) -> &mut LocalSearchDecider<S, M, MS, A, F> {
        &mut self.decider
    }
}

impl<S, D, M, MS, A, F, PT> Phase<S, D> for LocalSearchPhase<S, M, MS, A, F, PT>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S, M>,
    F: LocalSearchForager<S, M>,
    PT: Termination<S, D>,
{
    fn solve<T: Termination<S, D>>(
        &mut self,
        solver_scope: &mut SolverScope<S, D>,
        solver_termination: &T,
    ) {
        let initial_score = solver_scope.calculate_score();
        let entity_count = solver_scope.score_director().entity_count();
        solver_scope.update_best_solution();
        info!(score = %initial_score, entity_count, "Local search phase started");

        self.decider.phase_started(&initial_score, entity_count);
        let mut phase_scope = PhaseScope::new(solver_scope);
        phase_scope.set_last_step_score(initial_score.clone());

        loop {
            if phase_scope.solver_scope().is_terminate_early()
                || solver_termination.is_solver_terminated(phase_scope.solver_scope())
                || self.termination.is_phase_terminated(&phase_scope)
            {
                break;
            }

            let step_index = phase_scope.step_count();
            let last_step_score = match phase_scope.last_step_score() {
                Some(score) => score.clone(),
                None => initial_score.clone(),
            };
            let best_score = match phase_scope.solver_scope().best_score() {
                Some(score) => score.clone(),
                None => last_step_score.clone(),
            };

            let winner = {
                let (score_director, rng) = phase_scope.solver_scope_mut().director_and_rng();
                self.decider.decide_next_step(
                    step_index,
                    &last_step_score,
                    &best_score,
                    score_director,
                    rng,
                )
            };

            let step_scope = match winner {
                Some(candidate) => {
                    let score_director = phase_scope.solver_scope_mut().score_director_mut();
                    candidate.r#move.do_move(score_director);
                    score_director.trigger_variable_listeners();
                    let step_score = score_director.calculate_score();
                    debug!(
                        step_index,
                        score = %step_score,
                        r#move = ?candidate.r#move,
                        "Step taken"
                    );
                    phase_scope.set_last_step_score(step_score.clone());
                    let improved = phase_scope.solver_scope_mut().update_best_solution();
                    phase_scope.step_completed(improved);
                    LocalSearchStepScope {
                        step_index,
                        step: Some(candidate.r#move),
                        undo_step: Some(candidate.undo_move),
                        score: step_score,
                        entity_count,
                    }
                }
                None => {
                    debug!(step_index, "No accepted move, step is a no-op");
                    phase_scope.step_completed(false);
                    LocalSearchStepScope {
                        step_index,
                        step: None,
                        undo_step: None,
                        score: last_step_score,
                        entity_count,
                    }
                }
            };
            self.decider.step_ended(&step_scope);
        }

        let step_count = phase_scope.step_count();
        self.decider.phase_ended();
        info!(
            step_count,
            best_score = %solver_scope
                .best_score()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string()),
            "Local search phase ended"
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
