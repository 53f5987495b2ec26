//! Core types for trip finances
//!
//! All types are designed for:
//! - Deterministic ordering (`Ord` on identifiers)
//! - Exact arithmetic (`Decimal` for money)
//! - Serde round-tripping for fixtures and config

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Trip identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripId(String);

impl TripId {
    /// Create new trip ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Member identifier (unique and stable within a trip)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// Create new member ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trip member
///
/// Membership is managed externally; the settlement engine only reads
/// member lists and never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member ID
    pub id: MemberId,

    /// Human-readable label, used only for output formatting
    pub display_name: String,
}

impl Member {
    /// Create new member
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(id),
            display_name: display_name.into(),
        }
    }
}

/// Expense identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Generate a fresh expense ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable record of one shared cost
///
/// The payer fronted the full amount; the cost is divided equally among
/// the participants. The payer need not be a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID
    pub id: ExpenseId,

    /// Free-text description (display only)
    pub label: String,

    /// Amount fronted by the payer (always positive)
    pub amount: Decimal,

    /// Member who fronted the money
    pub paid_by: MemberId,

    /// Members among whom the cost is shared (non-empty, no duplicates)
    pub participants: Vec<MemberId>,

    /// Creation timestamp (informational)
    pub created_at: DateTime<Utc>,

    /// Last-update timestamp (informational)
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Check structural invariants: positive amount, non-empty and
    /// duplicate-free participants
    pub fn validate(&self) -> Result<()> {
        validate_shape(self.amount, &self.participants)
    }
}

/// Write-side expense payload: an [`Expense`] minus id and timestamps
///
/// The store stamps both atomically on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Free-text description
    pub label: String,

    /// Amount fronted by the payer
    pub amount: Decimal,

    /// Member who fronted the money
    pub paid_by: MemberId,

    /// Members among whom the cost is shared
    pub participants: Vec<MemberId>,
}

impl NewExpense {
    /// Check structural invariants (same rules as [`Expense::validate`])
    pub fn validate(&self) -> Result<()> {
        validate_shape(self.amount, &self.participants)
    }

    /// Stamp id and timestamps, producing the immutable record
    pub fn into_expense(self, id: ExpenseId, now: DateTime<Utc>) -> Expense {
        Expense {
            id,
            label: self.label,
            amount: self.amount,
            paid_by: self.paid_by,
            participants: self.participants,
            created_at: now,
            updated_at: now,
        }
    }
}

fn validate_shape(amount: Decimal, participants: &[MemberId]) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::NonPositiveAmount(amount));
    }
    if participants.is_empty() {
        return Err(Error::EmptyParticipants);
    }
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant) {
            return Err(Error::DuplicateParticipant(participant.clone()));
        }
    }
    Ok(())
}
