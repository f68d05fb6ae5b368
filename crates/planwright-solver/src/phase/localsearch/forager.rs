//! Foragers collect trialed candidates and pick the winning step.

use rand::rngs::StdRng;
use rand::Rng;

use planwright_core::domain::PlanningSolution;

use super::finalist::FinalistPodium;

/// One fully trialed candidate: the move, its undo, and the score the
/// working solution had while the move was applied.
#[derive(Debug, Clone)]
pub struct CandidateMove<Sc, M> {
    pub move_index: usize,
    pub r#move: M,
    pub undo_move: M,
    pub score: Sc,
    pub accepted: bool,
}

/// When the forager may cut the selection short with a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickEarly {
    /// Exhaust the whole selection (or the accepted count limit).
    #[default]
    Never,
    /// Stop at the first accepted move improving on the phase best.
    FirstBestScoreImproving,
    /// Stop at the first accepted move improving on the last step.
    FirstLastStepScoreImproving,
}

/// Collects candidates during a step and picks the winning move.
pub trait LocalSearchForager<S: PlanningSolution, M>: Send {
    /// Called when a phase starts.
    fn phase_started(&mut self) {}

    /// Called when a step starts, before any candidate is trialed.
    fn step_started(&mut self, step_index: u64, last_step_score: &S::Score, best_score: &S::Score);

    /// Offers a trialed candidate to the forager.
    fn add_move(&mut self, candidate: CandidateMove<S::Score, M>);

    /// Returns true when the forager has seen enough candidates.
    fn is_quit_early(&self) -> bool;

    /// Picks the winning candidate, if any was accepted.
    fn pick_move(&mut self, rng: &mut StdRng) -> Option<CandidateMove<S::Score, M>>;

    /// Called when a step ends.
    fn step_ended(&mut self) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}
}

/// Standard forager: accepted candidates compete on a finalist podium,
/// ties break randomly.
///
/// `accepted_count_limit` bounds how many accepted candidates are
/// gathered per step; `pick_early` can cut the selection even shorter.
pub struct AcceptedForager<Sc, M, P> {
    podium: P,
    pick_early: PickEarly,
    accepted_count_limit: Option<usize>,
    accepted_count: usize,
    early_pick: Option<CandidateMove<Sc, M>>,
    last_step_score: Option<Sc>,
    best_score: Option<Sc>,
}

impl<Sc, M, P> AcceptedForager<Sc, M, P> {
    pub fn new(podium: P) -> Self {
        Self {
            podium,
            pick_early: PickEarly::Never,
            accepted_count_limit: None,
            accepted_count: 0,
            early_pick: None,
            last_step_score: None,
            best_score: None,
        }
    }

    pub fn with_pick_early(mut self, pick_early: PickEarly) -> Self {
        self.pick_early = pick_early;
        self
    }

    pub fn with_accepted_count_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "accepted count limit must be positive");
        self.accepted_count_limit = Some(limit);
        self
    }
}

impl<S, M, P> LocalSearchForager<S, M> for AcceptedForager<S::Score, M, P>
where
    S: PlanningSolution,
    M: Send,
    P: FinalistPodium<S, M>,
{
    fn step_started(&mut self, _step_index: u64, last_step_score: &S::Score, best_score: &S::Score) {
        self.accepted_count = 0;
        self.early_pick = None;
        self.last_step_score = Some(last_step_score.clone());
        self.best_score = Some(best_score.clone());
        self.podium.step_started(last_step_score, best_score);
    }

    fn add_move(&mut self, candidate: CandidateMove<S::Score, M>) {
        if !candidate.accepted {
            return;
        }
        self.accepted_count += 1;
        let improves_early_pick_target = match self.pick_early {
            PickEarly::Never => false,
            PickEarly::FirstBestScoreImproving => self
                .best_score
                .as_ref()
                .is_some_and(|best| candidate.score > *best),
            PickEarly::FirstLastStepScoreImproving => self
                .last_step_score
                .as_ref()
                .is_some_and(|last| candidate.score > *last),
        };
        if improves_early_pick_target {
            self.early_pick = Some(candidate);
        } else {
            self.podium.add_move(candidate);
        }
    }

    fn is_quit_early(&self) -> bool {
        self.early_pick.is_some()
            || self
                .accepted_count_limit
                .is_some_and(|limit| self.accepted_count >= limit)
    }

    fn pick_move(&mut self, rng: &mut StdRng) -> Option<CandidateMove<S::Score, M>> {
        if let Some(early) = self.early_pick.take() {
            return Some(early);
        }
        let mut finalists = self.podium.take_finalists();
        match finalists.len() {
            0 => None,
            1 => finalists.pop(),
            len => Some(finalists.swap_remove(rng.random_range(0..len))),
        }
    }
}
