//! Late acceptance acceptor.

use rand::rngs::StdRng;

use planwright_core::domain::PlanningSolution;

use super::Acceptor;
use crate::scope::{LocalSearchMoveScope, LocalSearchStepScope};

/// Accepts a move that beats the step score from `size` steps ago.
///
/// Keeps a ring buffer of recent step scores. A candidate is accepted
/// when it is at least as good as the score recorded `size` steps back,
/// or at least as good as the last step score.
#[derive(Debug)]
pub struct LateAcceptanceAcceptor<Sc> {
    size: usize,
    previous_scores: Vec<Sc>,
}

impl<Sc> LateAcceptanceAcceptor<Sc> {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "late acceptance size must be positive");
        Self {
            size,
            previous_scores: Vec::new(),
        }
    }
}

impl<S, M> Acceptor<S, M> for LateAcceptanceAcceptor<S::Score>
where
    S: PlanningSolution,
{
    fn is_accepted(
        &mut self,
        move_scope: &LocalSearchMoveScope<'_, S, M>,
        _rng: &mut StdRng,
    ) -> bool {
        let late_score = &self.previous_scores[(move_scope.step_index as usize) % self.size];
        move_scope.score >= *late_score || move_scope.score >= *move_scope.last_step_score
    }

    fn phase_started(&mut self, initial_score: &S::Score, _entity_count: usize) {
        self.previous_scores = vec![initial_score.clone(); self.size];
    }

    fn step_ended(&mut self, step_scope: &LocalSearchStepScope<S, M>) {
        self.previous_scores[(step_scope.step_index as usize) % self.size] =
            step_scope.score.clone();
    }

    fn phase_ended(&mut self) {
        self.previous_scores.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestSolution;
    use planwright_core::SimpleScore;
    use rand::SeedableRng;

    fn step(
        step_index: u64,
        score: i64,
    ) -> LocalSearchStepScope<TestSolution, ()> {
        LocalSearchStepScope {
            step_index,
            step: None,
            undo_step: None,
            score: SimpleScore::of(score),
            entity_count: 1,
        }
    }

    #[test]
    fn compares_against_the_late_score() {
        let mut acceptor = LateAcceptanceAcceptor::new(2);
        let initial = SimpleScore::of(10);
        Acceptor::<TestSolution, ()>::phase_started(&mut acceptor, &initial, 1);
        acceptor.step_ended(&step(0, 8));
        acceptor.step_ended(&step(1, 6));

        // Step 2 compares against the ring slot written at step 0.
        let last = SimpleScore::of(6);
        let best = SimpleScore::of(10);
        let mut rng = StdRng::seed_from_u64(1);
        let scope = |score| LocalSearchMoveScope::<'_, TestSolution, ()> {
            move_index: 0,
            r#move: &(),
            score: SimpleScore::of(score),
            step_index: 2,
            last_step_score: &last,
            best_score: &best,
        };
        assert!(acceptor.is_accepted(&scope(8), &mut rng));
        assert!(acceptor.is_accepted(&scope(6), &mut rng));
        assert!(!acceptor.is_accepted(&scope(5), &mut rng));
    }
}
