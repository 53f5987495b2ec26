//! Settlement solver
//!
//! Converts net balances into a minimal list of point-to-point transfers
//! using greedy largest-pair matching.
//!
//! # Algorithm
//!
//! 1. Partition members into creditors and debtors, excluding anyone
//!    within the settled tolerance of zero
//! 2. Sort both pools by absolute position, largest first
//! 3. Repeatedly transfer `min(creditor, debtor)` between the pool heads,
//!    popping a head once its remainder drops inside the tolerance
//!
//! # Example
//!
//! ```text
//! Balances:
//!   A: +60.00
//!   B: -30.00
//!   C: -30.00
//!
//! Transfers:
//!   B pays A: 30.00
//!   C pays A: 30.00
//! ```
//!
//! Each step exhausts at least one pool head, so N non-zero balances
//! settle in at most N-1 transfers.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use trip_core::MemberId;

use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::types::{MemberBalance, Settlement};

/// Compute the transfers that settle every balance
///
/// Deterministic: pools are ordered by absolute position descending with
/// member id ascending as the tie-break, so identical input yields an
/// identical settlement list, order included.
///
/// Balances must come from a zero-sum computation. Sub-tolerance
/// exclusions and head-pop residues can legitimately strand up to one
/// tolerance per member across the pools; a leftover beyond
/// `tolerance * member_count` means the input was not zero-sum and the
/// call fails with [`Error::Convergence`].
pub fn compute_settlements(
    balances: &BTreeMap<MemberId, MemberBalance>,
    config: &SolverConfig,
) -> Result<Vec<Settlement>> {
    let (settlements, leftover_credit, leftover_debt) = settle_greedy(balances, config);

    let slack = config.settled_tolerance * Decimal::from(balances.len().max(1));
    if leftover_credit > slack || leftover_debt > slack {
        return Err(Error::Convergence(format!(
            "unmatched credit {} and debt {} after settlement",
            leftover_credit, leftover_debt
        )));
    }

    Ok(settlements)
}

/// Greedy matching without the convergence assertion
///
/// For balances that are knowingly skewed (best-effort integrity mode
/// dropped contributions involving unknown members): transfers are
/// produced until one pool drains and any unmatched remainder is left
/// unsettled rather than reported as a defect.
pub fn compute_settlements_lenient(
    balances: &BTreeMap<MemberId, MemberBalance>,
    config: &SolverConfig,
) -> Vec<Settlement> {
    settle_greedy(balances, config).0
}

fn settle_greedy(
    balances: &BTreeMap<MemberId, MemberBalance>,
    config: &SolverConfig,
) -> (Vec<Settlement>, Decimal, Decimal) {
    let tolerance = config.settled_tolerance;

    // (member, remaining) pools; debtors tracked as absolute values.
    let mut creditors: Vec<(MemberId, Decimal)> = balances
        .values()
        .filter(|b| b.is_creditor(tolerance))
        .map(|b| (b.member_id.clone(), b.net))
        .collect();
    let mut debtors: Vec<(MemberId, Decimal)> = balances
        .values()
        .filter(|b| b.is_debtor(tolerance))
        .map(|b| (b.member_id.clone(), b.abs_net()))
        .collect();

    creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    debtors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut settlements = Vec::new();
    let mut credit_head = 0;
    let mut debt_head = 0;

    while credit_head < creditors.len() && debt_head < debtors.len() {
        let creditor = &creditors[credit_head];
        let debtor = &debtors[debt_head];
        let amount = creditor.1.min(debtor.1);

        settlements.push(Settlement {
            from: debtor.0.clone(),
            to: creditor.0.clone(),
            amount: amount.round_dp(config.amount_dp),
        });

        // Remainders shrink by the unrounded amount so rounding error
        // never compounds across steps.
        creditors[credit_head].1 -= amount;
        debtors[debt_head].1 -= amount;

        if creditors[credit_head].1 <= tolerance {
            credit_head += 1;
        }
        if debtors[debt_head].1 <= tolerance {
            debt_head += 1;
        }
    }

    let leftover_credit: Decimal = creditors[credit_head..].iter().map(|c| c.1).sum();
    let leftover_debt: Decimal = debtors[debt_head..].iter().map(|d| d.1).sum();

    (settlements, leftover_credit, leftover_debt)
}
