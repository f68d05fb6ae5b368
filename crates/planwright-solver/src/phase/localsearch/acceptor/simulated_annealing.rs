//! Simulated annealing acceptor.

use rand::rngs::StdRng;
use rand::Rng;

use planwright_core::domain::PlanningSolution;
use planwright_core::Score;

use super::Acceptor;
use crate::scope::{LocalSearchMoveScope, LocalSearchStepScope};

/// Accepts worsening moves with a probability that decays over time.
///
/// Score deltas are collapsed to a scalar via [`Score::to_scalar`]; a
/// worsening move is accepted with probability `exp(delta / temperature)`.
/// The temperature is multiplied by `decay` after every step.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    decay: f64,
    temperature: f64,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(starting_temperature: f64, decay: f64) -> Self {
        assert!(
            starting_temperature > 0.0,
            "starting temperature must be positive"
        );
        assert!(
            (0.0..=1.0).contains(&decay),
            "decay must be within [0, 1]"
        );
        Self {
            starting_temperature,
            decay,
            temperature: starting_temperature,
        }
    }
}

impl<S: PlanningSolution, M> Acceptor<S, M> for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &mut self,
        move_scope: &LocalSearchMoveScope<'_, S, M>,
        rng: &mut StdRng,
    ) -> bool {
        if move_scope.score >= *move_scope.last_step_score {
            return true;
        }
        let delta = move_scope.score.to_scalar() - move_scope.last_step_score.to_scalar();
        let accept_chance = (delta / self.temperature.max(f64::MIN_POSITIVE)).exp();
        rng.random::<f64>() < accept_chance
    }

    fn phase_started(&mut self, _initial_score: &S::Score, _entity_count: usize) {
        self.temperature = self.starting_temperature;
    }

    fn step_ended(&mut self, _step_scope: &LocalSearchStepScope<S, M>) {
        self.temperature *= self.decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestSolution;
    use planwright_core::SimpleScore;
    use rand::SeedableRng;

    fn scope<'a>(
        score: i64,
        last: &'a SimpleScore,
        best: &'a SimpleScore,
    ) -> LocalSearchMoveScope<'a, TestSolution, ()> {
        LocalSearchMoveScope {
            move_index: 0,
            r#move: &(),
            score: SimpleScore::of(score),
            step_index: 0,
            last_step_score: last,
            best_score: best,
        }
    }

    #[test]
    fn always_accepts_non_worsening_moves() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(1.0, 0.9);
        let last = SimpleScore::of(0);
        let best = SimpleScore::of(0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(acceptor.is_accepted(&scope(0, &last, &best), &mut rng));
        assert!(acceptor.is_accepted(&scope(5, &last, &best), &mut rng));
    }

    #[test]
    fn hot_temperature_accepts_more_worsening_moves_than_cold() {
        let last = SimpleScore::of(0);
        let best = SimpleScore::of(0);
        let count_accepted = |temperature: f64| {
            let mut acceptor = SimulatedAnnealingAcceptor::new(temperature, 1.0);
            Acceptor::<TestSolution, ()>::phase_started(&mut acceptor, &last, 1);
            let mut rng = StdRng::seed_from_u64(7);
            (0..1000)
                .filter(|_| acceptor.is_accepted(&scope(-2, &last, &best), &mut rng))
                .count()
        };
        let hot = count_accepted(10.0);
        let cold = count_accepted(0.1);
        assert!(hot > cold);
        assert!(hot > 0);
        assert_eq!(cold, 0);
    }

    #[test]
    fn temperature_decays_per_step() {
        let mut acceptor = SimulatedAnnealingAcceptor::new(10.0, 0.5);
        let last = SimpleScore::of(0);
        Acceptor::<TestSolution, ()>::phase_started(&mut acceptor, &last, 1);
        acceptor.step_ended(&LocalSearchStepScope::<TestSolution, ()> {
            step_index: 0,
            step: None,
            undo_step: None,
            score: last,
            entity_count: 1,
        });
        assert!((acceptor.temperature - 5.0).abs() < 1e-9);
    }
}
