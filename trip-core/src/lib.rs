//! TripLedger core types
//!
//! Shared domain model for trip finances.
//!
//! # Design
//!
//! - **Exact arithmetic**: `Decimal` for money, no floats
//! - **Immutable expenses**: update is delete + recreate, never in-place
//! - **Derived state**: balances and settlements are computed downstream,
//!   never stored here

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod directory;
pub mod error;
pub mod types;

// Re-exports
pub use directory::MemberDirectory;
pub use error::{Error, Result};
pub use types::{Expense, ExpenseId, Member, MemberId, NewExpense, TripId};
