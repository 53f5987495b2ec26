//! Error types for the expense store

use thiserror::Error;
use trip_core::{ExpenseId, TripId};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Expense store error
///
/// `Clone` because errors are also fanned out to subscribers over a
/// broadcast channel.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Structurally invalid expense submitted
    #[error("Invalid expense: {0}")]
    Validation(#[from] trip_core::Error),

    /// Trip has no expense collection
    #[error("Trip not found: {0}")]
    TripNotFound(TripId),

    /// Expense not present in the trip's collection
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// Trip collection was removed while a subscription was live
    #[error("Trip removed: {0}")]
    TripRemoved(TripId),
}
