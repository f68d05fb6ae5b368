//! Entity tabu acceptor.

use rand::rngs::StdRng;

use planwright_core::domain::PlanningSolution;

use super::tabu::{EntityRatioTabuSize, FixedTabuSize, TabuSizeStrategy, TabuWindow};
use super::Acceptor;
use crate::heuristic::Move;
use crate::scope::{LocalSearchMoveScope, LocalSearchStepScope};

/// Makes the entities of recent winning steps tabu.
///
/// A candidate move is rejected while any entity it touches is still in
/// the tabu window, unless it would beat the phase best (aspiration).
#[derive(Debug)]
pub struct EntityTabuAcceptor {
    window: TabuWindow<usize>,
}

impl EntityTabuAcceptor {
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

    /// Creates an acceptor whose tabu size tracks the entity count.
    pub fn with_entity_ratio(ratio: f64) -> Self {
        Self::with_strategies(
            Box::new(EntityRatioTabuSize(ratio)),
            Box::new(FixedTabuSize(0)),
        )
    }

    /// Disables the aspiration override.
    pub fn without_aspiration(mut self) -> Self {
        self.window = self.window.without_aspiration();
        self
    }
}

impl<S, M> Acceptor<S, M> for EntityTabuAcceptor
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
            move_scope.r#move.entity_indices().iter(),
            move_scope.step_index,
            improves_best,
            rng,
        )
    }

    fn phase_started(&mut self, _initial_score: &S::Score, entity_count: usize) {
        self.window.phase_started(entity_count);
    }

    fn step_ended(&mut self, step_scope: &LocalSearchStepScope<S, M>) {
        let entities = step_scope
            .step
            .iter()
            .flat_map(|step| step.entity_indices().iter().copied());
        self.window
            .step_ended(step_scope.entity_count, step_scope.step_index, entities);
    }

    fn phase_ended(&mut self) {
        self.window.phase_ended();
    }
}
