//! Score director infrastructure for Planwright.
//!
//! A score director owns the working solution during solving and is the
//! only component that evaluates it. Moves never calculate scores
//! themselves; they mutate the working solution through the director's
//! variable-change notifications and let it (re)calculate.
//!
//! The calculator is stored as a concrete generic type parameter, not as
//! `Arc<dyn Fn>`, so scoring stays fully monomorphized.

pub mod director;

pub use director::{ScoreDirector, SimpleScoreDirector};
