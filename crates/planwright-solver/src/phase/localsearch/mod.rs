//! Local search: step-wise improvement guided by acceptors and foragers.
//!
//! Each step, the decider trials candidate moves against the score
//! director (apply, score, revert), the acceptor filters them based on
//! search history, and the forager collects accepted candidates and
//! picks the winning move at the end of the selection.

pub mod acceptor;
mod decider;
mod finalist;
mod forager;
mod phase;

pub use acceptor::{
    Acceptor, EntityRatioTabuSize, EntityTabuAcceptor, FixedTabuSize, HillClimbingAcceptor,
    LateAcceptanceAcceptor, MoveTabuAcceptor, SimulatedAnnealingAcceptor, TabuSizeStrategy,
    TabuWindow, ValueTabuAcceptor,
};
pub use decider::LocalSearchDecider;
pub use finalist::{FinalistPodium, HighestScorePodium, StrategicOscillationPodium};
pub use forager::{AcceptedForager, CandidateMove, LocalSearchForager, PickEarly};
pub use phase::LocalSearchPhase;
