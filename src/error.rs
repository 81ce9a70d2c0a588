//! Error types for u-orienteer.
//!
//! Expected search outcomes (a move that does not fit the budget, an
//! attempt to drop the anchor) are plain `bool`s on the schedule. The
//! variants here cover inputs that can never produce a valid plan.

use thiserror::Error;

/// Errors raised while building a pool, seeding a schedule, or
/// configuring the annealer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrienteerError {
    /// A task pool needs at least one task to pick an anchor from.
    #[error("task pool is empty")]
    EmptyPool,

    /// The anchor task alone does not fit the time budget.
    #[error("anchor task needs {required} time units but the budget is {budget}")]
    AnchorOverBudget { required: f64, budget: f64 },

    /// The time budget must be positive and finite.
    #[error("invalid time budget: {0}")]
    InvalidBudget(f64),

    /// Annealer configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for u-orienteer operations.
pub type Result<T> = std::result::Result<T, OrienteerError>;
