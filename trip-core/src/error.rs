//! Error types for the core domain model

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::MemberId;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Structural expense faults
///
/// These are data-integrity errors. They are never silently dropped: a
/// malformed expense fails the whole operation it was submitted to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Expense amount is zero or negative
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Expense has an empty participant set
    #[error("Expense has no participants")]
    EmptyParticipants,

    /// Expense lists the same participant twice
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(MemberId),
}
