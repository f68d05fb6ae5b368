// Score director trait definition.

use planwright_core::domain::PlanningSolution;

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Maintaining the working solution
// - Calculating scores (incrementally when possible)
// - Receiving variable change notifications from moves
// - Triggering shadow variable listeners
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    //
    // Implementations must invalidate any cached score, since the caller
    // may change anything the score depends on.
    fn working_solution_mut(&mut self) -> &mut S;

    // Calculates and returns the current score, storing it on the
    // working solution as a side effect.
    fn calculate_score(&mut self) -> S::Score;

    // Clones the working solution, typically to capture a new best.
    fn clone_working_solution(&self) -> S;

    // Called by a move before it changes a planning variable.
    fn before_variable_changed(&mut self, entity_index: usize, variable_name: &str);

    // Called by a move after it changed a planning variable.
    fn after_variable_changed(&mut self, entity_index: usize, variable_name: &str);

    // Triggers shadow variable listeners to update derived values.
    //
    // Must run after a move's variable changes and before score
    // calculation.
    fn trigger_variable_listeners(&mut self);

    // Returns the number of planning entities in the working solution.
    fn entity_count(&self) -> usize;

    // Returns true if this score director scores incrementally.
    fn is_incremental(&self) -> bool {
        false
    }

    // Recalculates the score from scratch and panics with diagnostic
    // context when it differs from `expected`.
    //
    // Used by corruption assertions: a mismatch means incremental
    // bookkeeping or a move's undo diverged from reality, which is a bug
    // in domain code, so solving must not continue.
    fn assert_working_score(&mut self, expected: &S::Score, context: &str) {
        // Mutable access invalidates cached scores, so the recalculation
        // below cannot be served from a cache.
        let _ = self.working_solution_mut();
        let actual = self.calculate_score();
        if actual != *expected {
            panic!(
                "Score corruption ({}): expected {} but recalculation produced {}",
                context, expected, actual
            );
        }
    }
}
