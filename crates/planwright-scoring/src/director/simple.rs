//! Simple score director with full recalculation.

use planwright_core::domain::PlanningSolution;

use super::traits::ScoreDirector;

/// A score director that recalculates the full score on every evaluation
/// (zero-erasure).
///
/// The calculator and entity counter are stored as concrete generic type
/// parameters, not as `Arc<dyn Fn>`. Full recalculation is wasteful for
/// large problems but always correct, which also makes this director the
/// reference for corruption assertions.
pub struct SimpleScoreDirector<S: PlanningSolution, C, E> {
    working_solution: S,
    score_calculator: C,
    entity_counter: E,
    variable_listener: Option<fn(&mut S)>,
    score_dirty: bool,
    cached_score: Option<S::Score>,
    calculation_count: u64,
}

impl<S, C, E> SimpleScoreDirector<S, C, E>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
    E: Fn(&S) -> usize + Send + Sync,
{
    /// Creates a new SimpleScoreDirector.
    pub fn new(solution: S, score_calculator: C, entity_counter: E) -> Self {
        SimpleScoreDirector {
            working_solution: solution,
            score_calculator,
            entity_counter,
            variable_listener: None,
            score_dirty: true,
            cached_score: None,
            calculation_count: 0,
        }
    }

    /// Installs a listener that recomputes shadow variables. It runs on
    /// every `trigger_variable_listeners` call.
    pub fn with_variable_listener(mut self, listener: fn(&mut S)) -> Self {
        self.variable_listener = Some(listener);
        self
    }

    /// Returns how many full recalculations have run so far.
    pub fn calculation_count(&self) -> u64 {
        self.calculation_count
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl<S, C, E> ScoreDirector<S> for SimpleScoreDirector<S, C, E>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
    E: Fn(&S) -> usize + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.mark_dirty();
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.score_dirty {
            if let Some(ref score) = self.cached_score {
                return score.clone();
            }
        }

        let score = (self.score_calculator)(&self.working_solution);
        self.calculation_count += 1;
        tracing::trace!(calculation_count = self.calculation_count, %score, "Recalculated score");
        self.working_solution.set_score(Some(score.clone()));
        self.cached_score = Some(score.clone());
        self.score_dirty = false;
        score
    }

    fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    fn before_variable_changed(&mut self, _entity_index: usize, _variable_name: &str) {
        self.mark_dirty();
    }

    fn after_variable_changed(&mut self, _entity_index: usize, _variable_name: &str) {
        // Already marked dirty in before_variable_changed
    }

    fn trigger_variable_listeners(&mut self) {
        if let Some(listener) = self.variable_listener {
            listener(&mut self.working_solution);
            self.mark_dirty();
        }
    }

    fn entity_count(&self) -> usize {
        (self.entity_counter)(&self.working_solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwright_core::SimpleScore;

    #[derive(Clone)]
    struct Counters {
        values: Vec<i64>,
        score: Option<SimpleScore>,
    }

    impl PlanningSolution for Counters {
        type Score = SimpleScore;

        fn score(&self) -> Option<SimpleScore> {
            self.score
        }

        fn set_score(&mut self, score: Option<SimpleScore>) {
            self.score = score;
        }
    }

    fn director(
        values: Vec<i64>,
    ) -> SimpleScoreDirector<Counters, impl Fn(&Counters) -> SimpleScore + Send + Sync, impl Fn(&Counters) -> usize + Send + Sync>
    {
        SimpleScoreDirector::new(
            Counters {
                values,
                score: None,
            },
            |s: &Counters| SimpleScore::of(-s.values.iter().sum::<i64>()),
            |s: &Counters| s.values.len(),
        )
    }

    #[test]
    fn caches_score_until_marked_dirty() {
        let mut director = director(vec![1, 2, 3]);
        assert_eq!(director.calculate_score(), SimpleScore::of(-6));
        assert_eq!(director.calculate_score(), SimpleScore::of(-6));
        assert_eq!(director.calculation_count(), 1);

        director.before_variable_changed(0, "value");
        director.working_solution_mut().values[0] = 10;
        director.after_variable_changed(0, "value");
        assert_eq!(director.calculate_score(), SimpleScore::of(-15));
        assert_eq!(director.calculation_count(), 2);
    }

    #[test]
    fn stores_score_on_working_solution() {
        let mut director = director(vec![4]);
        director.calculate_score();
        assert_eq!(director.working_solution().score(), Some(SimpleScore::of(-4)));
    }

    #[test]
    fn variable_listener_updates_shadow_state() {
        // First value acts as a shadow: the count of positive values.
        let mut director = director(vec![0, 2, 3])
            .with_variable_listener(|s| s.values[0] = s.values.iter().skip(1).filter(|v| **v > 0).count() as i64);
        director.trigger_variable_listeners();
        assert_eq!(director.working_solution().values[0], 2);
        assert_eq!(director.calculate_score(), SimpleScore::of(-7));
    }

    #[test]
    fn entity_count_reflects_solution() {
        let director = director(vec![1, 2]);
        assert_eq!(director.entity_count(), 2);
    }

    #[test]
    fn assert_working_score_passes_on_match() {
        let mut director = director(vec![1]);
        let score = director.calculate_score();
        assert_eq!(director.calculation_count(), 1);
        director.assert_working_score(&score, "test");
        // The assertion must recalculate even though the cache is clean.
        assert_eq!(director.calculation_count(), 2);
    }

    #[test]
    #[should_panic(expected = "Score corruption")]
    fn assert_working_score_recalculates_past_a_clean_cache() {
        use std::sync::atomic::{AtomicI64, Ordering};
        use std::sync::Arc;

        // The calculator reads external state, so the true score can
        // drift while the cache stays clean.
        let factor = Arc::new(AtomicI64::new(1));
        let calculator_factor = Arc::clone(&factor);
        let mut director = SimpleScoreDirector::new(
            Counters {
                values: vec![1],
                score: None,
            },
            move |s: &Counters| {
                SimpleScore::of(
                    -s.values.iter().sum::<i64>() * calculator_factor.load(Ordering::SeqCst),
                )
            },
            |s: &Counters| s.values.len(),
        );
        let score = director.calculate_score();
        factor.store(42, Ordering::SeqCst);
        director.assert_working_score(&score, "move score");
    }

    #[test]
    #[should_panic(expected = "Score corruption")]
    fn assert_working_score_panics_on_mismatch() {
        let mut director = director(vec![1]);
        director.assert_working_score(&SimpleScore::of(99), "test");
    }
}
