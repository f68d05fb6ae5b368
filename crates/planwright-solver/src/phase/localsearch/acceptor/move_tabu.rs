//! Move tabu acceptor.

use rand::rngs::StdRng;

use planwright_core::domain::PlanningSolution;

use super::tabu::{TabuSizeStrategy, TabuWindow};
use super::Acceptor;
use crate::heuristic::Move;
use crate::scope::{LocalSearchMoveScope, LocalSearchStepScope};

/// Makes recent winning moves themselves tabu.
///
/// Optionally also records each step's undo move, which forbids
/// immediately walking a step backwards.
#[derive(Debug)]
pub struct MoveTabuAcceptor<M> {
    window: TabuWindow<M>,
    tabu_undo_moves: bool,
}

impl<M: Eq + std::hash::Hash + Clone + std::fmt::Debug + Send> MoveTabuAcceptor<M> {
    /// Creates an acceptor with a fixed tabu size and no fading.
    pub fn new(tabu_size: u64) -> Self {
        Self {
            window: TabuWindow::fixed(tabu_size),
            tabu_undo_moves: true,
        }
    }

    /// Creates an acceptor with explicit size strategies.
    pub fn with_strategies(
        size_strategy: Box<dyn TabuSizeStrategy>,
        fading_size_strategy: Box<dyn TabuSizeStrategy>,
    ) -> Self {
        Self {
            window: TabuWindow::new(size_strategy, fading_size_strategy),
            tabu_undo_moves: true,
        }
    }

    /// Stops recording undo moves; only the winning moves become tabu.
    pub fn without_undo_tabu(mut self) -> Self {
        self.tabu_undo_moves = false;
        self
    }

    /// Disables the aspiration override.
    pub fn without_aspiration(mut self) -> Self {
        self.window = self.window.without_aspiration();
        self
    }
}

impl<S, M> Acceptor<S, M> for MoveTabuAcceptor<M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn is_accepted(
        &mut self,
        move_scope: &LocalSearchMoveScope<'_, S, M>,
        rng: &mut StdRng,
    ) -> bool {
        let improves_best = move_scope.score > *move_scope.best_score;
        self.window.is_accepted(
            std::iter::once(move_scope.r#move),
            move_scope.step_index,
            improves_best,
            rng,
        )
    }

    fn phase_started(&mut self, _initial_score: &S::Score, entity_count: usize) {
        self.window.phase_started(entity_count);
    }

    fn step_ended(&mut self, step_scope: &LocalSearchStepScope<S, M>) {
        let mut items = Vec::new();
        if let Some(step) = &step_scope.step {
            items.push(step.clone());
        }
        if self.tabu_undo_moves {
            if let Some(undo) = &step_scope.undo_step {
                items.push(undo.clone());
            }
        }
        self.window
            .step_ended(step_scope.entity_count, step_scope.step_index, items);
    }

    fn phase_ended(&mut self) {
        self.window.phase_ended();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{get_value, set_value, TestSolution};
    use crate::ChangeMove;
    use planwright_core::SimpleScore;
    use rand::SeedableRng;

    fn change(entity: usize, to: i64) -> ChangeMove<TestSolution, i64> {
        ChangeMove::new(entity, Some(to), get_value, set_value, "value")
    }

    fn step_scope(
        step: ChangeMove<TestSolution, i64>,
        undo: ChangeMove<TestSolution, i64>,
        step_index: u64,
    ) -> LocalSearchStepScope<TestSolution, ChangeMove<TestSolution, i64>> {
        LocalSearchStepScope {
            step_index,
            step: Some(step),
            undo_step: Some(undo),
            score: SimpleScore::of(0),
            entity_count: 10,
        }
    }

    #[test]
    fn winning_move_and_its_undo_become_tabu() {
        let mut acceptor = MoveTabuAcceptor::new(3).without_aspiration();
        let zero = SimpleScore::of(0);
        Acceptor::<TestSolution, _>::phase_started(&mut acceptor, &zero, 10);
        // Step assigned 42 to entity 0, which previously held 7.
        acceptor.step_ended(&step_scope(change(0, 42), change(0, 7), 1));

        let mut rng = StdRng::seed_from_u64(1);
        let best = SimpleScore::of(100);
        let scope = |m| LocalSearchMoveScope {
            move_index: 0,
            r#move: m,
            score: SimpleScore::of(-1),
            step_index: 2,
            last_step_score: &zero,
            best_score: &best,
        };
        let repeat = change(0, 42);
        let backwards = change(0, 7);
        let unrelated = change(1, 42);
        assert!(!acceptor.is_accepted(&scope(&repeat), &mut rng));
        assert!(!acceptor.is_accepted(&scope(&backwards), &mut rng));
        assert!(acceptor.is_accepted(&scope(&unrelated), &mut rng));
    }

    #[test]
    fn undo_recording_can_be_disabled() {
        let mut acceptor = MoveTabuAcceptor::new(3)
            .without_aspiration()
            .without_undo_tabu();
        let zero = SimpleScore::of(0);
        Acceptor::<TestSolution, _>::phase_started(&mut acceptor, &zero, 10);
        acceptor.step_ended(&step_scope(change(0, 42), change(0, 7), 1));

        let mut rng = StdRng::seed_from_u64(1);
        let best = SimpleScore::of(100);
        let backwards = change(0, 7);
        let scope = LocalSearchMoveScope {
            move_index: 0,
            r#move: &backwards,
            score: SimpleScore::of(-1),
            step_index: 2,
            last_step_score: &zero,
            best_score: &best,
        };
        assert!(acceptor.is_accepted(&scope, &mut rng));
    }
}
