//! Local search solver engine for Planwright.
//!
//! The engine walks a solution space one step at a time. Each step, a
//! move selector proposes candidate moves, the decider trials each one
//! against the score director, an acceptor filters them and a forager
//! picks the winning move, which then becomes the next step.
//!
//! # Architecture
//!
//! All hot paths are fully monomorphized: the solver, phases, deciders,
//! acceptors and foragers are generic over the solution, move and score
//! director types. The only virtual dispatch is the tabu size strategy,
//! which runs a handful of times per step.

// Zero-erasure architecture intentionally uses complex generic types
#![allow(clippy::type_complexity)]

pub mod builder;
pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod termination;

#[cfg(test)]
pub(crate) mod test_utils;

pub use builder::{
    forager_from_config, local_search_phase_from_config, solver_from_config, ConfiguredAcceptor,
    ConfiguredLocalSearchPhase, ConfiguredPodium, ConfiguredTermination,
};
pub use heuristic::{ChangeMove, ChangeMoveSelector, Move, MoveSelector, SwapMove, SwapMoveSelector};
pub use phase::localsearch::{
    AcceptedForager, Acceptor, CandidateMove, EntityRatioTabuSize, EntityTabuAcceptor,
    FinalistPodium, FixedTabuSize, HighestScorePodium, HillClimbingAcceptor,
    LateAcceptanceAcceptor, LocalSearchDecider, LocalSearchForager, LocalSearchPhase,
    MoveTabuAcceptor, PickEarly, SimulatedAnnealingAcceptor, StrategicOscillationPodium,
    TabuSizeStrategy, ValueTabuAcceptor,
};
pub use phase::Phase;
pub use scope::{LocalSearchMoveScope, LocalSearchStepScope, PhaseScope, SolverScope};
pub use solver::{NoTermination, Solver};
pub use termination::{
    AndTermination, BestScoreTermination, OrTermination, StepCountTermination, Termination,
    TimeTermination, UnimprovedStepCountTermination,
};
