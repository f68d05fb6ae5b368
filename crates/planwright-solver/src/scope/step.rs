//! Step-level scopes for local search.

use planwright_core::domain::PlanningSolution;

/// Snapshot of one candidate move mid-decision, handed to acceptors.
///
/// The trial move has already been applied and scored when the acceptor
/// sees this scope; it is undone again right after.
pub struct LocalSearchMoveScope<'a, S: PlanningSolution, M> {
    /// Position of this candidate within the current step's selection.
    pub move_index: usize,
    /// The candidate move itself.
    pub r#move: &'a M,
    /// Score of the working solution with the move applied.
    pub score: S::Score,
    /// Index of the step being decided.
    pub step_index: u64,
    /// Score the previous step ended with.
    pub last_step_score: &'a S::Score,
    /// Best score of the phase so far.
    pub best_score: &'a S::Score,
}

/// Outcome of one completed local search step.
///
/// `step` is `None` for a no-op step, where no candidate was accepted
/// and the working solution stayed as it was.
pub struct LocalSearchStepScope<S: PlanningSolution, M> {
    pub step_index: u64,
    pub step: Option<M>,
    pub undo_step: Option<M>,
    pub score: S::Score,
    pub entity_count: usize,
}
