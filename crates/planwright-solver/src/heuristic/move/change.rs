//! ChangeMove - assigns a value to a planning variable.
//!
//! This is the most fundamental move type. It takes a value and assigns
//! it to a planning variable on an entity.
//!
//! # Zero-Erasure Design
//!
//! This move stores typed function pointers that operate directly on
//! the solution. No `Arc<dyn>`, no `Box<dyn Any>`, no `downcast_ref`.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::{value_key, Move};

/// A move that assigns a value to an entity's variable.
///
/// Stores typed function pointers for zero-erasure execution. Equality
/// and hashing cover the entity, variable name and target value; the
/// function pointers are deliberately excluded.
pub struct ChangeMove<S, V> {
    entity_index: usize,
    to_value: Option<V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> ChangeMove<S, V> {
    /// Creates a new change move with typed function pointers.
    ///
    /// # Arguments
    /// * `entity_index` - Index of the entity in its collection
    /// * `to_value` - The value to assign (None to unassign)
    /// * `getter` - Function pointer to get the current value
    /// * `setter` - Function pointer to set the value
    /// * `variable_name` - Name of the variable
    pub fn new(
        entity_index: usize,
        to_value: Option<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_index,
            to_value,
            getter,
            setter,
            variable_name,
        }
    }

    /// Returns the entity index.
    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    /// Returns the target value.
    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

impl<S, V: Clone> Clone for ChangeMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            entity_index: self.entity_index,
            to_value: self.to_value.clone(),
            getter: self.getter,
            setter: self.setter,
            variable_name: self.variable_name,
        }
    }
}

impl<S, V: PartialEq> PartialEq for ChangeMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entity_index == other.entity_index
            && self.variable_name == other.variable_name
            && self.to_value == other.to_value
    }
}

impl<S, V: Eq> Eq for ChangeMove<S, V> {}

impl<S, V: Hash> Hash for ChangeMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_index.hash(state);
        self.variable_name.hash(state);
        self.to_value.hash(state);
    }
}

impl<S, V: Debug> Debug for ChangeMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMove")
            .field("entity_index", &self.entity_index)
            .field("variable_name", &self.variable_name)
            .field("to_value", &self.to_value)
            .finish()
    }
}

impl<S, V> Move<S> for ChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let current = (self.getter)(score_director.working_solution(), self.entity_index);
        current != self.to_value
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        score_director.before_variable_changed(self.entity_index, self.variable_name);
        (self.setter)(
            score_director.working_solution_mut(),
            self.entity_index,
            self.to_value.clone(),
        );
        score_director.after_variable_changed(self.entity_index, self.variable_name);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        let old_value = (self.getter)(score_director.working_solution(), self.entity_index);
        Self {
            entity_index: self.entity_index,
            to_value: old_value,
            getter: self.getter,
            setter: self.setter,
            variable_name: self.variable_name,
        }
    }

    fn entity_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.entity_index)
    }

    fn value_keys(&self) -> SmallVec<[u64; 4]> {
        let mut keys = SmallVec::new();
        keys.push(value_key(&self.to_value));
        keys
    }

    fn variable_name(&self) -> &str {
        self.variable_name
    }
}
