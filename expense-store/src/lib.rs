//! Expense store with push-based snapshot delivery
//!
//! In-memory per-trip expense collections with:
//! - Atomic add/delete (single lock per write)
//! - Full-snapshot subscriptions: every change delivers the complete
//!   current expense list, newest snapshot wins
//! - An error channel alongside each subscription
//!
//! Writes never retry internally. The optimistic-update/rollback dance
//! around a write is the caller's concern; the store just returns
//! `Result` and publishes the new snapshot on success.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod feed;
pub mod store;

pub use error::{Error, Result};
pub use feed::{ExpenseFeed, FeedEvent};
pub use store::ExpenseStore;
