//! Move selectors enumerate candidate moves for the decider.

mod change;
mod swap;

pub use change::ChangeMoveSelector;
pub use swap::SwapMoveSelector;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use crate::heuristic::Move;

/// Produces the candidate moves of one step, in selection order.
///
/// The decider buffers the enumeration into its step buffer before it
/// starts trialing moves, because trialing mutates the score director
/// the iterator was built from.
pub trait MoveSelector<S: PlanningSolution, M: Move<S>>: Send {
    /// Returns an iterator over the candidate moves for the current step.
    fn iter_moves<D: ScoreDirector<S>>(
        &self,
        score_director: &D,
    ) -> impl Iterator<Item = M> + Send;

    /// Returns true if the selection cycles forever, e.g. a randomized
    /// selector. Never-ending selectors need a selected count limit on
    /// the decider to keep the step's draw bounded.
    fn is_never_ending(&self) -> bool {
        false
    }

    /// Returns the selection size, or None when it cannot be counted
    /// up front.
    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> Option<usize>;

    /// Returns true if the selection size is known up front.
    fn is_countable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        self.size(score_director).is_some()
    }
}
