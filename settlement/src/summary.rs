//! Summary aggregator
//!
//! Assembles the caller-facing view model from the computed balances and
//! settlements. Pure composition, no algorithmic content.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use trip_core::{Expense, Member, MemberId};

use crate::types::{ExpensesSummary, MemberBalance, Settlement};

/// Build the expenses summary for one viewer
///
/// Returns `None` when there are no expenses or no members: that is
/// "nothing to show", not an error. `my_balance` is `None` when the
/// viewer is not a trip member.
pub fn summarize(
    expenses: &[Expense],
    members: &[Member],
    balances: &BTreeMap<MemberId, MemberBalance>,
    settlements: &[Settlement],
    viewer: &MemberId,
) -> Option<ExpensesSummary> {
    if expenses.is_empty() || members.is_empty() {
        return None;
    }

    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

    Some(ExpensesSummary {
        total_expenses,
        total_members: members.len(),
        my_balance: balances.get(viewer).cloned(),
        member_balances: balances.clone(),
        settlements: settlements.to_vec(),
        average_per_person: total_expenses / Decimal::from(members.len()),
    })
}
