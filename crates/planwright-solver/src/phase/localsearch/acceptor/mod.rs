//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a trialed candidate move may compete for
//! the step, based on search history: tabu lists, late acceptance
//! buffers, annealing temperature.

mod entity_tabu;
mod hill_climbing;
mod late_acceptance;
mod move_tabu;
mod simulated_annealing;
mod tabu;
mod value_tabu;

use std::fmt::Debug;

use rand::rngs::StdRng;

use planwright_core::domain::PlanningSolution;

use crate::scope::{LocalSearchMoveScope, LocalSearchStepScope};

pub use entity_tabu::EntityTabuAcceptor;
pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use move_tabu::MoveTabuAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;
pub use tabu::{EntityRatioTabuSize, FixedTabuSize, TabuSizeStrategy, TabuWindow};
pub use value_tabu::ValueTabuAcceptor;

/// Trait for accepting or rejecting candidate moves in local search.
///
/// The move scope describes a candidate whose trial application has
/// already been scored. Probabilistic acceptors draw from the solver's
/// seeded random sequence so runs stay reproducible.
pub trait Acceptor<S: PlanningSolution, M>: Send + Debug {
    /// Returns true if the candidate move may compete for this step.
    fn is_accepted(
        &mut self,
        move_scope: &LocalSearchMoveScope<'_, S, M>,
        rng: &mut StdRng,
    ) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &S::Score, _entity_count: usize) {}

    /// Called when a step starts.
    fn step_started(&mut self, _step_index: u64) {}

    /// Called when a step ends, with the step's outcome.
    fn step_ended(&mut self, _step_scope: &LocalSearchStepScope<S, M>) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}
}
