//! Hill climbing acceptor.

use rand::rngs::StdRng;

use planwright_core::domain::PlanningSolution;

use super::Acceptor;
use crate::scope::LocalSearchMoveScope;

/// Accepts any move that does not worsen the last step score.
///
/// Plateau moves are accepted, so the search can drift sideways; pair
/// it with an unimproved step count termination to avoid cycling.
#[derive(Debug, Default, Clone)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution, M> Acceptor<S, M> for HillClimbingAcceptor {
    fn is_accepted(
        &mut self,
        move_scope: &LocalSearchMoveScope<'_, S, M>,
        _rng: &mut StdRng,
    ) -> bool {
        move_scope.score >= *move_scope.last_step_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestSolution;
    use planwright_core::SimpleScore;
    use rand::SeedableRng;

    #[test]
    fn accepts_improving_and_plateau_rejects_worsening() {
        let mut acceptor = HillClimbingAcceptor::new();
        let last = SimpleScore::of(0);
        let best = SimpleScore::of(5);
        let mut rng = StdRng::seed_from_u64(1);
        let scope = |score| LocalSearchMoveScope::<'_, TestSolution, ()> {
            move_index: 0,
            r#move: &(),
            score: SimpleScore::of(score),
            step_index: 0,
            last_step_score: &last,
            best_score: &best,
        };
        assert!(acceptor.is_accepted(&scope(1), &mut rng));
        assert!(acceptor.is_accepted(&scope(0), &mut rng));
        assert!(!acceptor.is_accepted(&scope(-1), &mut rng));
    }
}
