//! Error types for Planwright

use thiserror::Error;

/// Main error type for Planwright operations.
///
/// Note that contract violations detected during solving (score corruption,
/// undo corruption, tabu key hash instability, mismatched bendable level
/// counts) are bugs in caller-supplied domain code and surface as panics
/// with diagnostic context, never as recoverable errors.
#[derive(Debug, Error)]
pub enum PlanwrightError {
    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error in domain model definition
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Error during score calculation
    #[error("Score calculation error: {0}")]
    ScoreCalculation(String),

    /// Solver was cancelled before completion
    #[error("Solver was cancelled")]
    Cancelled,

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for Planwright operations
pub type Result<T> = std::result::Result<T, PlanwrightError>;
