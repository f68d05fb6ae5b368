//! Score director implementations.

mod simple;
mod traits;

pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;
