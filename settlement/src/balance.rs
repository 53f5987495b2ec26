//! Balance calculator
//!
//! Derives one [`MemberBalance`] per trip member from the full expense
//! list. Every member gets an entry, including members appearing in no
//! expense. Pure function: no I/O, no logging, safe to call repeatedly
//! and concurrently.
//!
//! # Numeric semantics
//!
//! Shares are `amount / participant_count` in exact `Decimal` arithmetic
//! with no intermediate rounding. Rounding to currency precision happens
//! once, at settlement output.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use trip_core::{Expense, Member, MemberId};

use crate::config::IntegrityMode;
use crate::error::{Error, Result};
use crate::types::MemberBalance;

/// Compute net balances for every trip member
///
/// Validation runs over the whole input before any accumulation, so the
/// result is all-or-nothing: a single bad expense fails the call and no
/// partial balances escape.
///
/// Integrity policy for unknown member ids:
/// - [`IntegrityMode::Strict`]: fail with [`Error::UnknownMember`]
/// - [`IntegrityMode::BestEffort`]: drop contributions to/from unknown
///   ids; the skew this introduces is the caller's choice to accept
///
/// Structural faults (non-positive amount, empty or duplicated
/// participants) fail in both modes.
pub fn compute_balances(
    expenses: &[Expense],
    members: &[Member],
    mode: IntegrityMode,
) -> Result<BTreeMap<MemberId, MemberBalance>> {
    let known: HashSet<&MemberId> = members.iter().map(|m| &m.id).collect();

    for expense in expenses {
        expense.validate()?;
        if mode == IntegrityMode::Strict {
            check_members_known(expense, &known)?;
        }
    }

    let mut balances: BTreeMap<MemberId, MemberBalance> = members
        .iter()
        .map(|m| (m.id.clone(), MemberBalance::new(m.id.clone())))
        .collect();

    for expense in expenses {
        // In Strict mode every lookup hits; in BestEffort the misses are
        // exactly the unknown-id contributions being dropped.
        if let Some(balance) = balances.get_mut(&expense.paid_by) {
            balance.add_paid(expense.amount);
        }

        let share = expense.amount / Decimal::from(expense.participants.len());
        for participant in &expense.participants {
            if let Some(balance) = balances.get_mut(participant) {
                balance.add_owed(share);
            }
        }
    }

    Ok(balances)
}

fn check_members_known(expense: &Expense, known: &HashSet<&MemberId>) -> Result<()> {
    if !known.contains(&expense.paid_by) {
        return Err(Error::UnknownMember {
            expense: expense.id,
            member: expense.paid_by.clone(),
        });
    }
    for participant in &expense.participants {
        if !known.contains(participant) {
            return Err(Error::UnknownMember {
                expense: expense.id,
                member: participant.clone(),
            });
        }
    }
    Ok(())
}
