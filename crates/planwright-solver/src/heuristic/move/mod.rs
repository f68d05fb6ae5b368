//! Move types for local search.

mod change;
mod swap;
mod traits;

pub use change::ChangeMove;
pub use swap::SwapMove;
pub use traits::Move;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Collapses a planning value into the u64 key used by value tabu lists.
pub fn value_key<V: Hash>(value: &Option<V>) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
