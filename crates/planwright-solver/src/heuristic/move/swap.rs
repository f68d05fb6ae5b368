//! SwapMove - exchanges the variable values of two entities.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::Move;

/// A move that swaps the values of the same variable on two entities.
///
/// A swap is its own structural inverse: applying the same swap again
/// restores the original assignment, so the undo move is just a copy.
pub struct SwapMove<S, V> {
    entity_indices: [usize; 2],
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> SwapMove<S, V> {
    /// Creates a new swap move between two entities.
    pub fn new(
        left_index: usize,
        right_index: usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_indices: [left_index, right_index],
            getter,
            setter,
            variable_name,
        }
    }

    /// Returns the first entity index.
    pub fn left_index(&self) -> usize {
        self.entity_indices[0]
    }

    /// Returns the second entity index.
    pub fn right_index(&self) -> usize {
        self.entity_indices[1]
    }
}

impl<S, V> Clone for SwapMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            entity_indices: self.entity_indices,
            getter: self.getter,
            setter: self.setter,
            variable_name: self.variable_name,
        }
    }
}

impl<S, V> PartialEq for SwapMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entity_indices == other.entity_indices && self.variable_name == other.variable_name
    }
}

impl<S, V> Eq for SwapMove<S, V> {}

impl<S, V> Hash for SwapMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_indices.hash(state);
        self.variable_name.hash(state);
    }
}

impl<S, V> Debug for SwapMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMove")
            .field("entity_indices", &self.entity_indices)
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> Move<S> for SwapMove<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let solution = score_director.working_solution();
        let left = (self.getter)(solution, self.entity_indices[0]);
        let right = (self.getter)(solution, self.entity_indices[1]);
        left != right
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let [left_index, right_index] = self.entity_indices;
        let left = (self.getter)(score_director.working_solution(), left_index);
        let right = (self.getter)(score_director.working_solution(), right_index);

        score_director.before_variable_changed(left_index, self.variable_name);
        (self.setter)(score_director.working_solution_mut(), left_index, right);
        score_director.after_variable_changed(left_index, self.variable_name);

        score_director.before_variable_changed(right_index, self.variable_name);
        (self.setter)(score_director.working_solution_mut(), right_index, left);
        score_director.after_variable_changed(right_index, self.variable_name);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, _score_director: &D) -> Self {
        self.clone()
    }

    fn entity_indices(&self) -> &[usize] {
        &self.entity_indices
    }

    fn variable_name(&self) -> &str {
        self.variable_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{get_value, set_value, test_director, TestSolution};

    fn swap(left: usize, right: usize) -> SwapMove<TestSolution, i64> {
        SwapMove::new(left, right, get_value, set_value, "value")
    }

    #[test]
    fn doable_only_when_values_differ() {
        let director = test_director(vec![Some(1), Some(2), Some(1)]);
        assert!(swap(0, 1).is_doable(&director));
        assert!(!swap(0, 2).is_doable(&director));
    }

    #[test]
    fn do_move_exchanges_values() {
        let mut director = test_director(vec![Some(1), Some(2)]);
        swap(0, 1).do_move(&mut director);
        assert_eq!(get_value(director.working_solution(), 0), Some(2));
        assert_eq!(get_value(director.working_solution(), 1), Some(1));
    }

    #[test]
    fn undo_move_restores_both_entities() {
        let mut director = test_director(vec![Some(1), None]);
        let m = swap(0, 1);
        let undo = m.create_undo_move(&director);
        m.do_move(&mut director);
        undo.do_move(&mut director);
        assert_eq!(get_value(director.working_solution(), 0), Some(1));
        assert_eq!(get_value(director.working_solution(), 1), None);
    }

    #[test]
    fn involves_both_entities() {
        assert_eq!(swap(2, 5).entity_indices(), &[2, 5]);
    }
}
