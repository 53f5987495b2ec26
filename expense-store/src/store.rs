//! In-memory expense store
//!
//! One expense collection per trip. Every write validates, applies, and
//! publishes the new full snapshot under a single lock, so subscribers
//! never observe a half-applied change. Expenses are immutable once
//! recorded: an edit is a delete followed by a fresh add.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use trip_core::{Expense, ExpenseId, MemberId, NewExpense, TripId};

use crate::error::{Error, Result};
use crate::feed::ExpenseFeed;

const ERROR_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug)]
struct TripExpenses {
    expenses: Vec<Expense>,
    snapshots: watch::Sender<Arc<Vec<Expense>>>,
    errors: broadcast::Sender<Error>,
}

impl TripExpenses {
    fn new() -> Self {
        let (snapshots, _) = watch::channel(Arc::new(Vec::new()));
        let (errors, _) = broadcast::channel(ERROR_CHANNEL_CAPACITY);
        Self {
            expenses: Vec::new(),
            snapshots,
            errors,
        }
    }

    fn publish(&self) {
        // send_replace updates the value even with no live subscribers,
        // so late subscribers still start from the current state.
        self.snapshots.send_replace(Arc::new(self.expenses.clone()));
    }
}

/// In-memory per-trip expense store
#[derive(Debug, Default)]
pub struct ExpenseStore {
    trips: RwLock<HashMap<TripId, TripExpenses>>,
}

impl ExpenseStore {
    /// Create empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new expense
    ///
    /// Validates the payload, stamps id and timestamps, inserts, and
    /// publishes the new snapshot, all under one write lock. `actor` is
    /// recorded for tracing only; authorization happens upstream.
    pub fn add_expense(
        &self,
        trip: &TripId,
        expense: NewExpense,
        actor: &MemberId,
    ) -> Result<ExpenseId> {
        expense.validate()?;

        let mut trips = self.trips.write();
        let entry = trips.entry(trip.clone()).or_insert_with(TripExpenses::new);

        let expense = expense.into_expense(ExpenseId::generate(), Utc::now());
        let id = expense.id;
        entry.expenses.push(expense);
        entry.publish();

        tracing::info!(trip = %trip, actor = %actor, expense = %id, "expense recorded");
        Ok(id)
    }

    /// Delete an expense
    pub fn delete_expense(
        &self,
        trip: &TripId,
        expense: ExpenseId,
        actor: &MemberId,
    ) -> Result<()> {
        let mut trips = self.trips.write();
        let entry = trips
            .get_mut(trip)
            .ok_or_else(|| Error::TripNotFound(trip.clone()))?;

        let before = entry.expenses.len();
        entry.expenses.retain(|e| e.id != expense);
        if entry.expenses.len() == before {
            return Err(Error::ExpenseNotFound(expense));
        }
        entry.publish();

        tracing::info!(trip = %trip, actor = %actor, expense = %expense, "expense deleted");
        Ok(())
    }

    /// Current expense list (empty for unknown trips)
    pub fn expenses(&self, trip: &TripId) -> Vec<Expense> {
        self.trips
            .read()
            .get(trip)
            .map(|entry| entry.expenses.clone())
            .unwrap_or_default()
    }

    /// Subscribe to a trip's expense snapshots
    ///
    /// Unknown trips get an empty collection created on the spot, so
    /// subscribing before the first expense is fine.
    pub fn subscribe(&self, trip: &TripId) -> ExpenseFeed {
        let mut trips = self.trips.write();
        let entry = trips.entry(trip.clone()).or_insert_with(TripExpenses::new);
        ExpenseFeed::new(entry.snapshots.subscribe(), entry.errors.subscribe())
    }

    /// Drop a trip's collection, notifying live subscribers
    pub fn remove_trip(&self, trip: &TripId) -> Result<()> {
        let mut trips = self.trips.write();
        let entry = trips
            .remove(trip)
            .ok_or_else(|| Error::TripNotFound(trip.clone()))?;

        let _ = entry.errors.send(Error::TripRemoved(trip.clone()));
        tracing::info!(trip = %trip, "trip removed, expense feed closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedEvent;
    use rust_decimal::Decimal;

    fn dinner(amount_cents: i64) -> NewExpense {
        NewExpense {
            label: "dinner".to_string(),
            amount: Decimal::new(amount_cents, 2),
            paid_by: MemberId::new("alice"),
            participants: vec![MemberId::new("alice"), MemberId::new("bob")],
        }
    }

    #[test]
    fn test_add_and_list_expenses() {
        let store = ExpenseStore::new();
        let trip = TripId::new("lisbon-2024");
        let actor = MemberId::new("alice");

        let id = store.add_expense(&trip, dinner(8000), &actor).unwrap();

        let expenses = store.expenses(&trip);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, id);
        assert_eq!(expenses[0].amount, Decimal::new(8000, 2));
    }

    #[test]
    fn test_delete_expense() {
        let store = ExpenseStore::new();
        let trip = TripId::new("lisbon-2024");
        let actor = MemberId::new("alice");

        let id = store.add_expense(&trip, dinner(8000), &actor).unwrap();
        store.delete_expense(&trip, id, &actor).unwrap();

        assert!(store.expenses(&trip).is_empty());
        assert_eq!(
            store.delete_expense(&trip, id, &actor),
            Err(Error::ExpenseNotFound(id))
        );
    }

    #[test]
    fn test_delete_from_unknown_trip() {
        let store = ExpenseStore::new();
        let trip = TripId::new("nowhere");
        let result =
            store.delete_expense(&trip, ExpenseId::generate(), &MemberId::new("alice"));
        assert_eq!(result, Err(Error::TripNotFound(trip)));
    }

    #[test]
    fn test_invalid_expense_rejected() {
        let store = ExpenseStore::new();
        let trip = TripId::new("lisbon-2024");

        let result = store.add_expense(&trip, dinner(0), &MemberId::new("alice"));
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(store.expenses(&trip).is_empty());
    }

    #[tokio::test]
    async fn test_feed_delivers_snapshots() {
        let store = ExpenseStore::new();
        let trip = TripId::new("lisbon-2024");
        let actor = MemberId::new("alice");

        let mut feed = store.subscribe(&trip);
        assert!(feed.current().is_empty());

        let id = store.add_expense(&trip, dinner(8000), &actor).unwrap();
        match feed.next().await {
            FeedEvent::Snapshot(snapshot) => {
                assert_eq!(snapshot.len(), 1);
                assert_eq!(snapshot[0].id, id);
            }
            other => panic!("expected snapshot, got {:?}", other),
        }

        store.delete_expense(&trip, id, &actor).unwrap();
        match feed.next().await {
            FeedEvent::Snapshot(snapshot) => assert!(snapshot.is_empty()),
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remove_trip_closes_feed() {
        let store = ExpenseStore::new();
        let trip = TripId::new("lisbon-2024");

        let mut feed = store.subscribe(&trip);
        store.remove_trip(&trip).unwrap();

        match feed.next().await {
            FeedEvent::Error(Error::TripRemoved(removed)) => assert_eq!(removed, trip),
            other => panic!("expected trip-removed error, got {:?}", other),
        }
        assert!(matches!(feed.next().await, FeedEvent::Closed));
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_current_state() {
        let store = ExpenseStore::new();
        let trip = TripId::new("lisbon-2024");
        let actor = MemberId::new("alice");

        store.add_expense(&trip, dinner(8000), &actor).unwrap();

        let feed = store.subscribe(&trip);
        assert_eq!(feed.current().len(), 1);
    }
}
