//! Core types and traits for the Planwright planning solver.
//!
//! This crate holds the leaves of the dependency tree:
//! - The multi-level [`score::Score`] model (simple, hard/soft,
//!   hard/medium/soft, decimal and bendable variants).
//! - The [`domain::PlanningSolution`] contract that every solvable
//!   problem implements.
//! - Shared error types.

pub mod domain;
pub mod error;
#[macro_use]
pub mod score;

pub use domain::PlanningSolution;
pub use error::{PlanwrightError, Result};
pub use score::{
    BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftScore, ParseableScore,
    Score, ScoreParseError, SimpleScore,
};
