//! Selector producing the cartesian product of entities and values as
//! change moves.

use std::fmt::Debug;
use std::hash::Hash;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::MoveSelector;
use crate::heuristic::{ChangeMove, Move};

/// Enumerates a [`ChangeMove`] for every (entity, value) combination.
///
/// Entities come from the score director's current entity count, values
/// from the configured value range. Enumeration order is deterministic:
/// entity-major, values in the configured order.
pub struct ChangeMoveSelector<S, V> {
    values: Vec<Option<V>>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> ChangeMoveSelector<S, V> {
    pub fn new(
        values: Vec<Option<V>>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            values,
            getter,
            setter,
            variable_name,
        }
    }
}

impl<S, V> MoveSelector<S, ChangeMove<S, V>> for ChangeMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
    ChangeMove<S, V>: Move<S>,
{
    fn iter_moves<D: ScoreDirector<S>>(
        &self,
        score_director: &D,
    ) -> impl Iterator<Item = ChangeMove<S, V>> + Send {
        let entity_count = score_director.entity_count();
        let values = self.values.clone();
        let getter = self.getter;
        let setter = self.setter;
        let variable_name = self.variable_name;
        (0..entity_count).flat_map(move |entity_index| {
            values.clone().into_iter().map(move |value| {
                ChangeMove::new(entity_index, value, getter, setter, variable_name)
            })
        })
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> Option<usize> {
        Some(score_director.entity_count() * self.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{get_value, set_value, test_director};

    #[test]
    fn enumerates_entity_major_cartesian_product() {
        let director = test_director(vec![Some(1), Some(2)]);
        let selector =
            ChangeMoveSelector::new(vec![Some(10), Some(20)], get_value, set_value, "value");
        let moves: Vec<_> = selector.iter_moves(&director).collect();
        assert_eq!(moves.len(), 4);
        assert_eq!(selector.size(&director), Some(4));
        assert!(selector.is_countable(&director));
        assert!(!selector.is_never_ending());
        assert_eq!(moves[0].entity_index(), 0);
        assert_eq!(moves[0].to_value(), Some(&10));
        assert_eq!(moves[1].entity_index(), 0);
        assert_eq!(moves[1].to_value(), Some(&20));
        assert_eq!(moves[3].entity_index(), 1);
    }

    #[test]
    fn empty_value_range_yields_no_moves() {
        let director = test_director(vec![Some(1)]);
        let selector = ChangeMoveSelector::<_, i64>::new(vec![], get_value, set_value, "value");
        assert_eq!(selector.iter_moves(&director).count(), 0);
    }
}
