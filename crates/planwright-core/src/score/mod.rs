//! Score types for measuring solution quality.
//!
//! Every score type carries an init score dimension (the negated count of
//! unassigned planning variables) in front of its constraint levels, so a
//! partially initialized solution always compares worse than any fully
//! initialized one.
//!
//! Available score types:
//! - [`SimpleScore`]: single level, no feasibility notion beyond init
//! - [`HardSoftScore`]: hard constraints gate feasibility, soft optimize
//! - [`HardMediumSoftScore`]: three levels
//! - [`HardSoftDecimalScore`]: hard/soft with exact decimal arithmetic
//! - [`BendableScore`]: runtime-configurable number of hard and soft levels

#[macro_use]
mod macros;

pub mod traits;

mod bendable;
mod hard_medium_soft;
mod hard_soft;
mod hard_soft_decimal;
mod simple;

pub use bendable::BendableScore;
pub use hard_medium_soft::HardMediumSoftScore;
pub use hard_soft::HardSoftScore;
pub use hard_soft_decimal::HardSoftDecimalScore;
pub use simple::SimpleScore;
pub use traits::{ParseableScore, Score, ScoreParseError};
