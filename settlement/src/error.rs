//! Error types for the settlement engine

use thiserror::Error;
use trip_core::{ExpenseId, MemberId};

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Structurally invalid expense (non-positive amount, bad participants)
    #[error("Invalid expense: {0}")]
    Core(#[from] trip_core::Error),

    /// Expense references a member the directory does not know
    #[error("Expense {expense} references unknown member {member}")]
    UnknownMember {
        /// Offending expense
        expense: ExpenseId,
        /// The unknown member id
        member: MemberId,
    },

    /// Settlement pools failed to both empty out
    ///
    /// Signals an upstream zero-sum violation. A defect, not a
    /// user-facing condition.
    #[error("Settlement failed to converge: {0}")]
    Convergence(String),

    /// Expense feed reported an error
    #[error("Feed error: {0}")]
    Feed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}
