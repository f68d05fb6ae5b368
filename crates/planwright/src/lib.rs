//! Planwright - A local search planning solver in Rust.
//!
//! Model your planning problem as a [`PlanningSolution`], expose its
//! moves through a move selector, and let a configured solver walk the
//! solution space step by step.
//!
//! # Example
//!
//! ```rust
//! use planwright::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! assert!(score.is_feasible());
//! ```

// Score types and core traits
pub use planwright_core::{
    BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, ParseableScore,
    PlanningSolution, PlanwrightError, Result, Score, SimpleScore,
};

// Score director infrastructure
pub use planwright_scoring::{ScoreDirector, SimpleScoreDirector};

// Solver engine
pub use planwright_solver::{
    local_search_phase_from_config, solver_from_config, AcceptedForager, Acceptor, ChangeMove,
    ChangeMoveSelector, EntityTabuAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    LocalSearchDecider, LocalSearchForager, LocalSearchPhase, Move, MoveSelector,
    MoveTabuAcceptor, NoTermination, Phase, SimulatedAnnealingAcceptor, Solver, SwapMove,
    SwapMoveSelector, Termination, ValueTabuAcceptor,
};

// Declarative configuration
pub use planwright_config::SolverConfig;

pub mod logging;

pub mod prelude {
    pub use super::{
        BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, ParseableScore,
        Score, SimpleScore,
    };
    pub use super::{PlanningSolution, ScoreDirector, SimpleScoreDirector};
    pub use super::{Solver, SolverConfig};
}
