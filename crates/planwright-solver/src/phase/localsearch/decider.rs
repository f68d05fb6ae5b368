//! The decider trials candidate moves and picks the winning step.

use std::marker::PhantomData;

use rand::rngs::StdRng;
use tracing::trace;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::acceptor::Acceptor;
use super::forager::{CandidateMove, LocalSearchForager};
use crate::heuristic::{Move, MoveSelector};
use crate::scope::LocalSearchMoveScope;

/// Decides the next step of a local search phase.
///
/// Each candidate is trialed in place: the undo move is captured first,
/// the move is applied and scored, the acceptor votes, and the undo move
/// restores the working solution before the next candidate. The forager
/// collects the trialed candidates and picks the winner.
pub struct LocalSearchDecider<S, M, MS, A, F> {
    move_selector: MS,
    acceptor: A,
    forager: F,
    selected_count_limit: Option<usize>,
    assert_move_score_from_scratch: bool,
    assert_expected_undo_move_score: bool,
    _marker: PhantomData<fn() -> (S, M)>,
}

impl<S, M, MS, A, F> LocalSearchDecider<S, M, MS, A, F>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S, M>,
    F: LocalSearchForager<S, M>,
{
    pub fn new(move_selector: MS, acceptor: A, forager: F) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
            selected_count_limit: None,
            assert_move_score_from_scratch: false,
            assert_expected_undo_move_score: cfg!(debug_assertions),
            _marker: PhantomData,
        }
    }

    /// Caps how many moves are drawn from the selector per step.
    /// Mandatory for never-ending selectors.
    pub fn with_selected_count_limit(mut self, limit: usize) -> Self {
        self.selected_count_limit = Some(limit);
        self
    }

    /// Recalculates every move score from scratch and panics on mismatch.
    /// Expensive; only for tracking down score corruption.
    pub fn with_move_score_assertions(mut self, enabled: bool) -> Self {
        self.assert_move_score_from_scratch = enabled;
        self
    }

    /// Verifies after each undo that the working score returned to the
    /// last step score. On by default in debug builds.
    pub fn with_undo_score_assertions(mut self, enabled: bool) -> Self {
        self.assert_expected_undo_move_score = enabled;
        self
    }

    pub fn acceptor_mut(&mut self) -> &mut A {
        &mut self.acceptor
    }

    pub fn forager_mut(&mut self) -> &mut F {
        &mut self.forager
    }

    pub fn phase_started(&mut self, initial_score: &S::Score, entity_count: usize) {
        self.acceptor.phase_started(initial_score, entity_count);
        self.forager.phase_started();
    }

    pub fn phase_ended(&mut self) {
        self.acceptor.phase_ended();
        self.forager.phase_ended();
    }

    pub fn step_ended(&mut self, step_scope: &crate::scope::LocalSearchStepScope<S, M>) {
        self.acceptor.step_ended(step_scope);
        self.forager.step_ended();
    }

    /// Trials the step's candidate moves and returns the winner, if any.
    ///
    /// The working solution is left untouched: every trial is undone,
    /// including the winner's. Applying the winning move is the phase's
    /// job.
    pub fn decide_next_step<D: ScoreDirector<S>>(
        &mut self,
        step_index: u64,
        last_step_score: &S::Score,
        best_score: &S::Score,
        score_director: &mut D,
        rng: &mut StdRng,
    ) -> Option<CandidateMove<S::Score, M>> {
        self.acceptor.step_started(step_index);
        self.forager.step_started(step_index, last_step_score, best_score);

        // Trialing mutates the director the selection iterator borrows,
        // so the selection is buffered up front. An unbounded draw from a
        // never-ending selector would never finish buffering.
        let selected_count_limit = match self.selected_count_limit {
            Some(limit) => limit,
            None => {
                assert!(
                    !self.move_selector.is_never_ending(),
                    "A never-ending move selector requires a selected count limit"
                );
                usize::MAX
            }
        };
        let moves: Vec<M> = self
            .move_selector
            .iter_moves(&*score_director)
            .take(selected_count_limit)
            .collect();
        for (move_index, r#move) in moves.into_iter().enumerate() {
            if !r#move.is_doable(&*score_director) {
                trace!(r#move = ?r#move, "Skipping undoable move");
                continue;
            }
            let undo_move = r#move.create_undo_move(&*score_director);
            r#move.do_move(score_director);
            score_director.trigger_variable_listeners();
            let score = score_director.calculate_score();
            if self.assert_move_score_from_scratch {
                score_director.assert_working_score(&score, "move score");
            }
            let accepted = self.acceptor.is_accepted(
                &LocalSearchMoveScope {
                    move_index,
                    r#move: &r#move,
                    score: score.clone(),
                    step_index,
                    last_step_score,
                    best_score,
                },
                rng,
            );
            undo_move.do_move(score_director);
            score_director.trigger_variable_listeners();
            if self.assert_expected_undo_move_score {
                score_director.assert_working_score(last_step_score, "undo move score");
            }
            self.forager.add_move(CandidateMove {
                move_index,
                r#move,
                undo_move,
                score,
                accepted,
            });
            if self.forager.is_quit_early() {
                break;
            }
        }
        self.forager.pick_move(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::ChangeMoveSelector;
    use crate::phase::localsearch::acceptor::HillClimbingAcceptor;
    use crate::phase::localsearch::finalist::HighestScorePodium;
    use crate::phase::localsearch::forager::{AcceptedForager, PickEarly};
    use crate::test_utils::{get_value, set_value, test_director, TestSolution};
    use planwright_core::SimpleScore;
    use rand::SeedableRng;

    fn decider() -> LocalSearchDecider<
        TestSolution,
        crate::heuristic::ChangeMove<TestSolution, i64>,
        ChangeMoveSelector<TestSolution, i64>,
        HillClimbingAcceptor,
        AcceptedForager<
            SimpleScore,
            crate::heuristic::ChangeMove<TestSolution, i64>,
            HighestScorePodium<SimpleScore, crate::heuristic::ChangeMove<TestSolution, i64>>,
        >,
    > {
        let selector = ChangeMoveSelector::new(vec![Some(1), Some(2), Some(3)], get_value, set_value, "value");
        LocalSearchDecider::new(
            selector,
            HillClimbingAcceptor::new(),
            AcceptedForager::new(HighestScorePodium::new()),
        )
    }

    #[test]
    fn picks_the_highest_scoring_move() {
        let mut decider = decider();
        let mut director = test_director(vec![Some(1), Some(1)]);
        let last = SimpleScore::of(2);
        let best = SimpleScore::of(2);
        decider.phase_started(&last, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let winner = decider
            .decide_next_step(0, &last, &best, &mut director, &mut rng)
            .unwrap();
        // Best single change: set either slot to 3, for a score of 4.
        assert_eq!(winner.score, SimpleScore::of(4));
    }

    #[test]
    fn leaves_the_working_solution_untouched() {
        let mut decider = decider();
        let mut director = test_director(vec![Some(2), Some(1)]);
        let last = SimpleScore::of(3);
        let best = SimpleScore::of(3);
        decider.phase_started(&last, 2);
        let mut rng = StdRng::seed_from_u64(1);
        decider.decide_next_step(0, &last, &best, &mut director, &mut rng);
        assert_eq!(director.working_solution().values, vec![Some(2), Some(1)]);
    }

    #[test]
    fn returns_none_when_nothing_is_accepted() {
        let mut decider = decider();
        // Both slots already at the maximum value: every doable change
        // worsens the score, so hill climbing rejects them all.
        let mut director = test_director(vec![Some(3), Some(3)]);
        let last = SimpleScore::of(6);
        let best = SimpleScore::of(6);
        decider.phase_started(&last, 2);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(decider
            .decide_next_step(0, &last, &best, &mut director, &mut rng)
            .is_none());
    }

    struct CyclingChangeSelector {
        values: Vec<Option<i64>>,
    }

    impl MoveSelector<TestSolution, crate::heuristic::ChangeMove<TestSolution, i64>>
        for CyclingChangeSelector
    {
        fn iter_moves<D: ScoreDirector<TestSolution>>(
            &self,
            score_director: &D,
        ) -> impl Iterator<Item = crate::heuristic::ChangeMove<TestSolution, i64>> + Send {
            let entity_count = score_director.entity_count();
            let values = self.values.clone();
            (0..).flat_map(move |_| {
                let values = values.clone();
                (0..entity_count).flat_map(move |entity_index| {
                    values.clone().into_iter().map(move |value| {
                        crate::heuristic::ChangeMove::new(
                            entity_index,
                            value,
                            get_value,
                            set_value,
                            "value",
                        )
                    })
                })
            })
        }

        fn is_never_ending(&self) -> bool {
            true
        }

        fn size<D: ScoreDirector<TestSolution>>(&self, _score_director: &D) -> Option<usize> {
            None
        }
    }

    #[test]
    fn never_ending_selector_is_bounded_by_the_selected_count_limit() {
        let selector = CyclingChangeSelector {
            values: vec![Some(1), Some(2), Some(3)],
        };
        let mut decider = LocalSearchDecider::new(
            selector,
            HillClimbingAcceptor::new(),
            AcceptedForager::new(HighestScorePodium::new()),
        )
        .with_selected_count_limit(6);
        let mut director = test_director(vec![Some(1), Some(1)]);
        let last = SimpleScore::of(2);
        let best = SimpleScore::of(2);
        decider.phase_started(&last, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let winner = decider
            .decide_next_step(0, &last, &best, &mut director, &mut rng)
            .unwrap();
        // The capped draw covers each (entity, value) combination once.
        assert_eq!(winner.score, SimpleScore::of(4));
    }

    #[test]
    #[should_panic(expected = "never-ending move selector requires a selected count limit")]
    fn never_ending_selector_without_a_limit_is_refused() {
        let selector = CyclingChangeSelector {
            values: vec![Some(1)],
        };
        let mut decider = LocalSearchDecider::new(
            selector,
            HillClimbingAcceptor::new(),
            AcceptedForager::new(HighestScorePodium::new()),
        );
        let mut director = test_director(vec![Some(1)]);
        let last = SimpleScore::of(1);
        let best = SimpleScore::of(1);
        decider.phase_started(&last, 1);
        let mut rng = StdRng::seed_from_u64(1);
        decider.decide_next_step(0, &last, &best, &mut director, &mut rng);
    }

    #[test]
    fn selected_count_limit_truncates_a_finite_selection() {
        // Six possible draws, capped at two: the moves to value 3 are
        // never drawn, so the winner only reaches a score of 3.
        let selector = ChangeMoveSelector::new(
            vec![Some(1), Some(2), Some(3)],
            get_value,
            set_value,
            "value",
        );
        let mut decider = LocalSearchDecider::new(
            selector,
            HillClimbingAcceptor::new(),
            AcceptedForager::new(HighestScorePodium::new()),
        )
        .with_selected_count_limit(2);
        let mut director = test_director(vec![Some(1), Some(1)]);
        let last = SimpleScore::of(2);
        let best = SimpleScore::of(2);
        decider.phase_started(&last, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let winner = decider
            .decide_next_step(0, &last, &best, &mut director, &mut rng)
            .unwrap();
        assert_eq!(winner.score, SimpleScore::of(3));
    }

    #[test]
    fn pick_early_cuts_the_selection_short() {
        let selector = ChangeMoveSelector::new(vec![Some(5)], get_value, set_value, "value");
        let mut decider = LocalSearchDecider::new(
            selector,
            HillClimbingAcceptor::new(),
            AcceptedForager::new(HighestScorePodium::new())
                .with_pick_early(PickEarly::FirstLastStepScoreImproving),
        );
        let mut director = test_director(vec![Some(1), Some(1)]);
        let last = SimpleScore::of(2);
        let best = SimpleScore::of(2);
        decider.phase_started(&last, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let winner = decider
            .decide_next_step(0, &last, &best, &mut director, &mut rng)
            .unwrap();
        // The very first improving move wins without trialing the rest.
        assert_eq!(winner.move_index, 0);
        assert_eq!(winner.score, SimpleScore::of(6));
    }
}
