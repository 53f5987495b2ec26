//! Main settlement engine
//!
//! Orchestrates balance computation, settlement solving, and summary
//! assembly, either once per call or continuously against an expense
//! feed.
//!
//! Recomputation is always from scratch over the full current expense
//! list: trip expense lists stay small, and a full pass has no
//! incremental-update bugs to chase.

use async_trait::async_trait;
use std::sync::Arc;
use trip_core::{Expense, Member, MemberDirectory, MemberId, TripId};

use expense_store::{ExpenseFeed, FeedEvent};

use crate::balance::compute_balances;
use crate::config::{Config, IntegrityMode};
use crate::error::{Error, Result};
use crate::solver::{compute_settlements, compute_settlements_lenient};
use crate::summary::summarize;
use crate::types::ExpensesSummary;

/// Receives recomputed summaries from a watch loop
#[async_trait]
pub trait SummaryHandler: Send + Sync {
    /// Called after every recomputation. Returning an error stops the
    /// watch loop.
    async fn on_summary(&self, summary: Option<ExpensesSummary>) -> Result<()>;

    /// Called when a snapshot fails to compute or the feed reports an
    /// error. The loop continues with the next snapshot.
    async fn on_error(&self, error: Error);
}

/// Settlement engine
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    config: Config,
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline once: balances, settlements, summary
    ///
    /// `Ok(None)` means nothing to show (no expenses or no members).
    pub fn evaluate(
        &self,
        expenses: &[Expense],
        members: &[Member],
        viewer: &MemberId,
    ) -> Result<Option<ExpensesSummary>> {
        let balances = compute_balances(expenses, members, self.config.integrity)?;

        // Best-effort balances are knowingly skewed (dropped unknown-id
        // contributions), so the convergence assertion does not apply.
        let settlements = match self.config.integrity {
            IntegrityMode::Strict => compute_settlements(&balances, &self.config.solver)?,
            IntegrityMode::BestEffort => {
                compute_settlements_lenient(&balances, &self.config.solver)
            }
        };

        tracing::debug!(
            expenses = expenses.len(),
            members = members.len(),
            settlements = settlements.len(),
            "settlement recomputed"
        );

        Ok(summarize(expenses, members, &balances, &settlements, viewer))
    }

    /// Watch an expense feed, recomputing on every snapshot
    ///
    /// Delivers the current state immediately, then one summary per
    /// change until the feed closes. A snapshot that fails to compute
    /// (for example a transient integrity fault while an optimistic
    /// update is in flight) goes to `on_error` and the loop keeps
    /// going; the member list is re-read from the directory for every
    /// recomputation.
    pub async fn watch<H>(
        &self,
        mut feed: ExpenseFeed,
        directory: Arc<MemberDirectory>,
        trip: TripId,
        viewer: MemberId,
        handler: Arc<H>,
    ) -> Result<()>
    where
        H: SummaryHandler + 'static,
    {
        tracing::info!(trip = %trip, viewer = %viewer, "starting expense watch");

        let snapshot = feed.current();
        self.deliver(&snapshot, &directory, &trip, &viewer, &handler)
            .await?;

        loop {
            match feed.next().await {
                FeedEvent::Snapshot(snapshot) => {
                    self.deliver(&snapshot, &directory, &trip, &viewer, &handler)
                        .await?;
                }
                FeedEvent::Error(error) => {
                    tracing::warn!(trip = %trip, %error, "expense feed error");
                    handler.on_error(Error::Feed(error.to_string())).await;
                }
                FeedEvent::Closed => {
                    tracing::info!(trip = %trip, "expense feed closed");
                    return Ok(());
                }
            }
        }
    }

    async fn deliver<H>(
        &self,
        expenses: &[Expense],
        directory: &MemberDirectory,
        trip: &TripId,
        viewer: &MemberId,
        handler: &Arc<H>,
    ) -> Result<()>
    where
        H: SummaryHandler + 'static,
    {
        let members = directory.members(trip);
        match self.evaluate(expenses, &members, viewer) {
            Ok(summary) => handler.on_summary(summary).await,
            Err(error) => {
                tracing::warn!(trip = %trip, %error, "snapshot failed to compute");
                handler.on_error(error).await;
                Ok(())
            }
        }
    }
}
