//! Value tabu acceptor.

use rand::rngs::StdRng;

use planwright_core::domain::PlanningSolution;

use super::tabu::{TabuSizeStrategy, TabuWindow};
use super::Acceptor;
use crate::heuristic::Move;
use crate::scope::{LocalSearchMoveScope, LocalSearchStepScope};

/// Makes the planning values of recent winning steps tabu.
///
/// Values are tracked by the hashed keys a move exposes through
/// [`Move::value_keys`]. Moves that expose no value keys (e.g. swaps)
/// are never value-tabu.
#[derive(Debug)]
pub struct ValueTabuAcceptor {
    window: TabuWindow<u64>,
}

impl ValueTabuAcceptor {
    /// Creates an acceptor with a fixed tabu size and no fading.
    pub fn new(tabu_size: u64) -> Self {
        Self {
            window: TabuWindow::fixed(tabu_size),
        }
    }

    /// Creates an acceptor with explicit size strategies.
    pub fn with_strategies(
        size_strategy: Box<dyn TabuSizeStrategy>,
        fading_size_strategy: Box<dyn TabuSizeStrategy>,
    ) -> Self {
        Self {
            window: TabuWindow::new(size_strategy, fading_size_strategy),
        }
    }

    /// Disables the aspiration override.
    pub fn without_aspiration(mut self) -> Self {
        self.window = self.window.without_aspiration();
        self
    }
}

impl<S, M> Acceptor<S, M> for ValueTabuAcceptor
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
        let keys = move_scope.r#move.value_keys();
        self.window
            .is_accepted(keys.iter(), move_scope.step_index, improves_best, rng)
    }

    fn phase_started(&mut self, _initial_score: &S::Score, entity_count: usize) {
        self.window.phase_started(entity_count);
    }

    fn step_ended(&mut self, step_scope: &LocalSearchStepScope<S, M>) {
        let keys = step_scope
            .step
            .iter()
            .flat_map(|step| step.value_keys().into_iter());
        self.window
            .step_ended(step_scope.entity_count, step_scope.step_index, keys);
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

    #[test]
    fn recently_assigned_value_is_tabu_on_any_entity() {
        let mut acceptor = ValueTabuAcceptor::new(3).without_aspiration();
        let zero = SimpleScore::of(0);
        Acceptor::<TestSolution, ChangeMove<TestSolution, i64>>::phase_started(&mut acceptor, &zero, 10);
        acceptor.step_ended(&LocalSearchStepScope {
            step_index: 1,
            step: Some(change(0, 42)),
            undo_step: None,
            score: zero,
            entity_count: 10,
        });

        let mut rng = StdRng::seed_from_u64(1);
        let best = SimpleScore::of(100);
        let same_value_elsewhere = change(5, 42);
        let other_value = change(5, 43);
        let scope = |m, score| LocalSearchMoveScope {
            move_index: 0,
            r#move: m,
            score: SimpleScore::of(score),
            step_index: 2,
            last_step_score: &zero,
            best_score: &best,
        };
        assert!(!acceptor.is_accepted(&scope(&same_value_elsewhere, -1), &mut rng));
        assert!(acceptor.is_accepted(&scope(&other_value, -1), &mut rng));
    }
}
