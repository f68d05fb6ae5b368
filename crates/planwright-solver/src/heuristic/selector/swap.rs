//! Selector producing swap moves over all entity pairs.

use std::fmt::Debug;

use planwright_core::domain::PlanningSolution;
use planwright_scoring::ScoreDirector;

use super::MoveSelector;
use crate::heuristic::{Move, SwapMove};

/// Enumerates a [`SwapMove`] for every unordered entity pair.
pub struct SwapMoveSelector<S, V> {
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> SwapMoveSelector<S, V> {
    pub fn new(
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            getter,
            setter,
            variable_name,
        }
    }
}

impl<S, V> MoveSelector<S, SwapMove<S, V>> for SwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Send + Sync + Debug + 'static,
    SwapMove<S, V>: Move<S>,
{
    fn iter_moves<D: ScoreDirector<S>>(
        &self,
        score_director: &D,
    ) -> impl Iterator<Item = SwapMove<S, V>> + Send {
        let entity_count = score_director.entity_count();
        let getter = self.getter;
        let setter = self.setter;
        let variable_name = self.variable_name;
        (0..entity_count).flat_map(move |left| {
            (left + 1..entity_count)
                .map(move |right| SwapMove::new(left, right, getter, setter, variable_name))
        })
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> Option<usize> {
        let entity_count = score_director.entity_count();
        Some(entity_count * entity_count.saturating_sub(1) / 2)
    }
}
