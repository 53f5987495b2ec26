//! Settlement Engine
//!
//! Turns a trip's shared expenses into net balances and a minimal list
//! of point-to-point transfers that settles every debt.
//!
//! # Architecture
//!
//! The computation runs in three pure stages:
//!
//! 1. **Balances**: derive each member's net position from the full
//!    expense list ([`balance::compute_balances`])
//! 2. **Settlements**: greedy largest-pair matching of creditors against
//!    debtors ([`solver::compute_settlements`])
//! 3. **Summary**: assemble the caller-facing view model
//!    ([`summary::summarize`])
//!
//! [`SettlementEngine`] runs the pipeline once per call, or continuously
//! against an expense feed: every snapshot triggers a full recomputation
//! from scratch. Same input always yields the same output: the stages
//! own no mutable state and are safe to call concurrently.
//!
//! # Invariants
//!
//! - Zero-sum: Σ net over all members is zero (within tolerance)
//! - Settling: applying every transfer zeroes every balance
//! - At most N-1 transfers for N non-zero balances
//! - All-or-nothing: an integrity fault fails the whole computation
//!
//! # Example
//!
//! ```no_run
//! use settlement::{Config, SettlementEngine};
//! use trip_core::MemberId;
//!
//! fn main() -> settlement::Result<()> {
//!     let engine = SettlementEngine::new(Config::default());
//!     let summary = engine.evaluate(&[], &[], &MemberId::new("me"))?;
//!     assert!(summary.is_none());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod balance;
pub mod config;
pub mod engine;
pub mod error;
pub mod solver;
pub mod summary;
pub mod types;

// Re-exports
pub use balance::compute_balances;
pub use config::{Config, IntegrityMode, SolverConfig};
pub use engine::{SettlementEngine, SummaryHandler};
pub use error::{Error, Result};
pub use solver::{compute_settlements, compute_settlements_lenient};
pub use summary::summarize;
pub use types::{ExpensesSummary, MemberBalance, Settlement};
