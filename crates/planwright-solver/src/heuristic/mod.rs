//! Heuristic components for solving
//!
//! This module contains:
//! - Moves: Operations that modify planning variables
//! - Selectors: Components that enumerate candidate moves

pub mod r#move;
pub mod selector;

pub use r#move::{ChangeMove, Move, SwapMove};
pub use selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector};
