//! Finalist podiums: per-step tournament among accepted candidates.

use planwright_core::domain::PlanningSolution;
use planwright_core::Score;

use super::forager::CandidateMove;

/// Collects the best accepted candidates of a step.
///
/// The forager feeds every accepted candidate to the podium; at the end
/// of the selection it takes the finalists and breaks any tie randomly.
pub trait FinalistPodium<S: PlanningSolution, M>: Send {
    /// Called when a step starts, before any candidate arrives.
    fn step_started(&mut self, last_step_score: &S::Score, best_score: &S::Score);

    /// Offers an accepted candidate to the podium.
    fn add_move(&mut self, candidate: CandidateMove<S::Score, M>);

    /// Drains the current finalists.
    fn take_finalists(&mut self) -> Vec<CandidateMove<S::Score, M>>;
}

/// Keeps the candidates with the highest score.
#[derive(Debug, Default)]
pub struct HighestScorePodium<Sc, M> {
    finalist_score: Option<Sc>,
    finalists: Vec<CandidateMove<Sc, M>>,
}

impl<Sc, M> HighestScorePodium<Sc, M> {
    pub fn new() -> Self {
        Self {
            finalist_score: None,
            finalists: Vec::new(),
        }
    }
}

impl<S, M> FinalistPodium<S, M> for HighestScorePodium<S::Score, M>
where
    S: PlanningSolution,
    M: Send,
{
    fn step_started(&mut self, _last_step_score: &S::Score, _best_score: &S::Score) {
        self.finalist_score = None;
        self.finalists.clear();
    }

    fn add_move(&mut self, candidate: CandidateMove<S::Score, M>) {
        match &self.finalist_score {
            Some(finalist_score) if candidate.score < *finalist_score => {}
            Some(finalist_score) if candidate.score == *finalist_score => {
                self.finalists.push(candidate);
            }
            _ => {
                self.finalist_score = Some(candidate.score.clone());
                self.finalists.clear();
                self.finalists.push(candidate);
            }
        }
    }

    fn take_finalists(&mut self) -> Vec<CandidateMove<S::Score, M>> {
        self.finalist_score = None;
        std::mem::take(&mut self.finalists)
    }
}

/// Podium that tolerates level trade-offs relative to a reference score.
///
/// Plain highest-score foraging always prefers the lexicographically
/// best candidate. Strategic oscillation instead favors a candidate
/// that improves on the reference score (last step or best score) at a
/// higher level, even when a lexicographically better candidate exists
/// that does not. This lets the search cross infeasible territory on
/// purpose.
#[derive(Debug)]
pub struct StrategicOscillationPodium<Sc: Score, M> {
    reference_best_score: bool,
    reference_score: Option<Sc>,
    reference_levels: Vec<Sc::Level>,
    finalist_score: Option<Sc>,
    finalist_improves_upon_reference: bool,
    finalists: Vec<CandidateMove<Sc, M>>,
}

impl<Sc: Score, M> StrategicOscillationPodium<Sc, M> {
    /// Oscillates around the last step score.
    pub fn new() -> Self {
        Self {
            reference_best_score: false,
            reference_score: None,
            reference_levels: Vec::new(),
            finalist_score: None,
            finalist_improves_upon_reference: false,
            finalists: Vec::new(),
        }
    }

    /// Oscillates around the phase best score instead of the last step.
    pub fn referencing_best_score(mut self) -> Self {
        self.reference_best_score = true;
        self
    }

    /// Compares a candidate against the current finalist, biased by the
    /// reference score.
    fn compare_to_finalist(&self, score: &Sc, finalist_score: &Sc) -> std::cmp::Ordering {
        let reference = self
            .reference_score
            .as_ref()
            .expect("step_started must run before candidates arrive");
        if self.finalist_improves_upon_reference || score > reference {
            return score.cmp(finalist_score);
        }
        let candidate_levels = score.to_level_numbers();
        let finalist_levels = finalist_score.to_level_numbers();
        for ((candidate, finalist), reference) in candidate_levels
            .iter()
            .zip(finalist_levels.iter())
            .zip(self.reference_levels.iter())
        {
            let candidate_higher = candidate > reference;
            let finalist_higher = finalist > reference;
            match (candidate_higher, finalist_higher) {
                (true, false) => return std::cmp::Ordering::Greater,
                (false, true) => return std::cmp::Ordering::Less,
                (true, true) => break,
                (false, false) => {}
            }
        }
        score.cmp(finalist_score)
    }
}

impl<Sc: Score, M> Default for StrategicOscillationPodium<Sc, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> FinalistPodium<S, M> for StrategicOscillationPodium<S::Score, M>
where
    S: PlanningSolution,
    M: Send,
{
    fn step_started(&mut self, last_step_score: &S::Score, best_score: &S::Score) {
        let reference = if self.reference_best_score {
            best_score
        } else {
            last_step_score
        };
        self.reference_levels = reference.to_level_numbers();
        self.reference_score = Some(reference.clone());
        self.finalist_score = None;
        self.finalist_improves_upon_reference = false;
        self.finalists.clear();
    }

    fn add_move(&mut self, candidate: CandidateMove<S::Score, M>) {
        let comparison = match &self.finalist_score {
            None => std::cmp::Ordering::Greater,
            Some(finalist_score) => self.compare_to_finalist(&candidate.score, finalist_score),
        };
        match comparison {
            std::cmp::Ordering::Greater => {
                self.finalist_improves_upon_reference = self
                    .reference_score
                    .as_ref()
                    .is_some_and(|reference| candidate.score > *reference);
                self.finalist_score = Some(candidate.score.clone());
                self.finalists.clear();
                self.finalists.push(candidate);
            }
            std::cmp::Ordering::Equal => {
                self.finalists.push(candidate);
            }
            std::cmp::Ordering::Less => {}
        }
    }

    fn take_finalists(&mut self) -> Vec<CandidateMove<S::Score, M>> {
        self.finalist_score = None;
        self.finalist_improves_upon_reference = false;
        std::mem::take(&mut self.finalists)
    }
}
