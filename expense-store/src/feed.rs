//! Expense snapshot subscription
//!
//! A feed delivers the full current expense list for one trip whenever it
//! changes. Snapshots are conflated: a subscriber that falls behind only
//! sees the newest state, which is all the settlement engine needs since
//! it recomputes from scratch on every change.

use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use trip_core::Expense;

use crate::error::Error;

/// One delivery from an [`ExpenseFeed`]
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Full current expense list after a change
    Snapshot(Arc<Vec<Expense>>),

    /// Store-side error fanned out to subscribers
    Error(Error),

    /// The trip's collection is gone; no further events will arrive
    Closed,
}

/// Subscription handle for one trip's expenses
#[derive(Debug)]
pub struct ExpenseFeed {
    snapshots: watch::Receiver<Arc<Vec<Expense>>>,
    errors: broadcast::Receiver<Error>,
    errors_closed: bool,
}

impl ExpenseFeed {
    pub(crate) fn new(
        snapshots: watch::Receiver<Arc<Vec<Expense>>>,
        errors: broadcast::Receiver<Error>,
    ) -> Self {
        Self {
            snapshots,
            errors,
            errors_closed: false,
        }
    }

    /// Current snapshot without waiting for a change
    pub fn current(&self) -> Arc<Vec<Expense>> {
        self.snapshots.borrow().clone()
    }

    /// Wait for the next event
    ///
    /// Returns [`FeedEvent::Closed`] once the trip's collection has been
    /// dropped; calling again after that keeps returning `Closed`.
    pub async fn next(&mut self) -> FeedEvent {
        loop {
            if self.errors_closed {
                return match self.snapshots.changed().await {
                    Ok(()) => FeedEvent::Snapshot(self.snapshots.borrow_and_update().clone()),
                    Err(_) => FeedEvent::Closed,
                };
            }

            // Biased so buffered errors are drained before the closed
            // snapshot channel turns into a bare `Closed`.
            tokio::select! {
                biased;
                error = self.errors.recv() => match error {
                    Ok(error) => return FeedEvent::Error(error),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "expense feed error channel lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // Snapshot side reports Closed once it drops too.
                        self.errors_closed = true;
                    }
                },
                changed = self.snapshots.changed() => {
                    return match changed {
                        Ok(()) => FeedEvent::Snapshot(self.snapshots.borrow_and_update().clone()),
                        Err(_) => FeedEvent::Closed,
                    };
                }
            }
        }
    }
}
