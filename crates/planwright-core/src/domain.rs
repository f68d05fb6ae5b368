//! Domain contract consumed by the solver.
//!
//! Planwright does not discover the problem model by reflection or
//! annotations: the solving core only needs this trait plus the
//! `ScoreDirector` and `Move` contracts, supplied by explicit registration.

use crate::score::Score;

/// A planning solution represents both the problem definition and the
/// (potentially partial) solution. It contains:
/// - Problem facts: immutable input data
/// - Planning entities: things to be optimized
/// - Score: the quality of the current solution
///
/// # Example
///
/// ```
/// use planwright_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct NQueens {
///     rows: Vec<Option<usize>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for NQueens {
///     type Score = SimpleScore;
///
///     fn score(&self) -> Option<Self::Score> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<Self::Score>) {
///         self.score = score;
///     }
/// }
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);
}
