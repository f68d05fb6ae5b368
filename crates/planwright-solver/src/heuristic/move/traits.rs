//! Move trait definition.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

/// A move that modifies one or more planning variables.
///
/// Moves are fully typed for maximum performance - no boxing, no virtual
/// dispatch. The decider trials a move by applying it, scoring the
/// result, and reverting it with the undo move obtained from
/// [`create_undo_move`](Move::create_undo_move) *before* the move is
/// applied.
///
/// # Implementation Notes
/// - Moves should be lightweight and cheap to clone; tabu lists and step
///   scopes keep copies of them.
/// - `Eq`/`Hash` identify a move by its effect (entity, variable,
///   target), never by incidental details like function pointers.
/// - All variable writes must be bracketed by the score director's
///   `before_variable_changed`/`after_variable_changed` notifications.
pub trait Move<S: PlanningSolution>:
    Clone + PartialEq + Eq + Hash + Debug + Send + Sync + 'static
{
    /// Returns true if this move can be executed in the current state.
    ///
    /// A move is not doable if it would not change anything, e.g. the
    /// target value already equals the current value.
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool;

    /// Executes this move, modifying the working solution through the
    /// score director.
    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D);

    /// Builds the move that reverts this one.
    ///
    /// Must be called *before* `do_move`, while the working solution
    /// still holds the state to restore.
    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self;

    /// Returns the entity indices involved in this move.
    fn entity_indices(&self) -> &[usize];

    /// Returns hashed keys of the planning values this move assigns,
    /// consumed by value tabu lists.
    ///
    /// Defaults to empty; moves without a natural value identity are
    /// never value-tabu.
    fn value_keys(&self) -> SmallVec<[u64; 4]> {
        SmallVec::new()
    }

    /// Returns the variable name this move affects.
    fn variable_name(&self) -> &str;
}
