//! Core types for the settlement engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trip_core::MemberId;

/// A member's net position across all trip expenses
///
/// Derived, never stored. Positive `net` means the member is owed money,
/// negative means the member owes money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// Member ID
    pub member_id: MemberId,

    /// Total fronted by this member across all expenses
    pub total_paid: Decimal,

    /// Total of this member's shares across all expenses
    pub total_owed: Decimal,

    /// Net position: `total_paid - total_owed`
    pub net: Decimal,
}

impl MemberBalance {
    /// Create zeroed balance
    pub fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            total_paid: Decimal::ZERO,
            total_owed: Decimal::ZERO,
            net: Decimal::ZERO,
        }
    }

    /// Record an amount this member fronted
    pub fn add_paid(&mut self, amount: Decimal) {
        self.total_paid += amount;
        self.net = self.total_paid - self.total_owed;
    }

    /// Record a share this member owes
    pub fn add_owed(&mut self, share: Decimal) {
        self.total_owed += share;
        self.net = self.total_paid - self.total_owed;
    }

    /// Owed money beyond the tolerance
    pub fn is_creditor(&self, tolerance: Decimal) -> bool {
        self.net > tolerance
    }

    /// Owes money beyond the tolerance
    pub fn is_debtor(&self, tolerance: Decimal) -> bool {
        self.net < -tolerance
    }

    /// Absolute net position
    pub fn abs_net(&self) -> Decimal {
        self.net.abs()
    }
}

/// A recommended point-to-point transfer
///
/// Applying every settlement of a computed set brings each member's net
/// position to within one cent of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Debtor: the member who pays
    pub from: MemberId,

    /// Creditor: the member who receives
    pub to: MemberId,

    /// Transfer amount, rounded to currency precision
    pub amount: Decimal,
}

/// Caller-facing view model of a trip's finances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensesSummary {
    /// Sum of all expense amounts
    pub total_expenses: Decimal,

    /// Number of trip members
    pub total_members: usize,

    /// The viewing member's balance, if they are a trip member
    pub my_balance: Option<MemberBalance>,

    /// Every member's balance, keyed by member id
    pub member_balances: BTreeMap<MemberId, MemberBalance>,

    /// Recommended transfers that settle all debts
    pub settlements: Vec<Settlement>,

    /// `total_expenses / total_members`
    pub average_per_person: Decimal,
}
