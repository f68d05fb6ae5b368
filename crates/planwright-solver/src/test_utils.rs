//! Shared fixtures for the solver test suite.

use planwright_core::domain::PlanningSolution;
use planwright_core::{Score, SimpleScore};
use planwright_scoring::SimpleScoreDirector;

/// Minimal planning problem: assign an integer to each slot.
///
/// The score is the sum of assigned values, with each unassigned slot
/// counted in the init score. Maximizing means preferring larger values.
#[derive(Clone, Debug)]
pub struct TestSolution {
    pub values: Vec<Option<i64>>,
    pub score: Option<SimpleScore>,
}

impl PlanningSolution for TestSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<SimpleScore> {
        self.score
    }

    fn set_score(&mut self, score: Option<SimpleScore>) {
        self.score = score;
    }
}

pub fn get_value(solution: &TestSolution, index: usize) -> Option<i64> {
    solution.values.get(index).copied().flatten()
}

pub fn set_value(solution: &mut TestSolution, index: usize, value: Option<i64>) {
    if let Some(slot) = solution.values.get_mut(index) {
        *slot = value;
    }
}

pub fn calculate(solution: &TestSolution) -> SimpleScore {
    let sum: i64 = solution.values.iter().flatten().sum();
    let unassigned = solution.values.iter().filter(|v| v.is_none()).count() as i32;
    SimpleScore::of(sum).with_init_score(-unassigned)
}

pub fn entity_count(solution: &TestSolution) -> usize {
    solution.values.len()
}

pub type TestDirector =
    SimpleScoreDirector<TestSolution, fn(&TestSolution) -> SimpleScore, fn(&TestSolution) -> usize>;

pub fn test_director(values: Vec<Option<i64>>) -> TestDirector {
    SimpleScoreDirector::new(
        TestSolution {
            values,
            score: None,
        },
        calculate,
        entity_count,
    )
}
