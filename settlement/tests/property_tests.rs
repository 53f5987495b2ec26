//! Property-based tests for settlement invariants
//!
//! These tests use proptest to verify the critical invariants:
//! - Zero-sum: Σ net over all members ≈ 0 for any valid expense set
//! - Settling: applying every transfer zeroes every balance
//! - Cardinality: at most N-1 transfers for N non-zero balances
//! - No self-transfers, no non-positive amounts
//! - Determinism: same input → same output, order included

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement::{
    compute_balances, compute_settlements, IntegrityMode, SolverConfig,
};
use trip_core::{Expense, ExpenseId, Member, MemberId};

const MAX_MEMBERS: usize = 8;
const MAX_EXPENSES: usize = 20;

fn member_id(index: usize) -> MemberId {
    MemberId::new(format!("m{}", index))
}

/// Strategy for one valid expense over a roster of `member_count` members
fn expense_strategy(member_count: usize) -> impl Strategy<Value = Expense> {
    (
        1i64..1_000_000,
        0..member_count,
        prop::collection::btree_set(0..member_count, 1..=member_count),
    )
        .prop_map(|(cents, payer, participants)| Expense {
            id: ExpenseId::generate(),
            label: "prop".to_string(),
            amount: Decimal::new(cents, 2),
            paid_by: member_id(payer),
            participants: participants.into_iter().map(member_id).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
}

/// Strategy for a full trip: members plus a valid expense list
fn trip_strategy() -> impl Strategy<Value = (Vec<Member>, Vec<Expense>)> {
    (2usize..MAX_MEMBERS).prop_flat_map(|member_count| {
        prop::collection::vec(expense_strategy(member_count), 0..MAX_EXPENSES).prop_map(
            move |expenses| {
                let members = (0..member_count)
                    .map(|i| Member::new(format!("m{}", i), format!("Member {}", i)))
                    .collect();
                (members, expenses)
            },
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: balances always sum to zero for valid inputs
    #[test]
    fn prop_zero_sum((members, expenses) in trip_strategy()) {
        let balances =
            compute_balances(&expenses, &members, IntegrityMode::Strict).unwrap();

        let total: Decimal = balances.values().map(|b| b.net).sum();
        prop_assert!(total.abs() < Decimal::new(1, 6), "net sum was {}", total);
    }

    /// Property: applying every settlement zeroes every balance
    #[test]
    fn prop_settlements_settle((members, expenses) in trip_strategy()) {
        let config = SolverConfig::default();
        let balances =
            compute_balances(&expenses, &members, IntegrityMode::Strict).unwrap();
        let settlements = compute_settlements(&balances, &config).unwrap();

        let mut remaining: std::collections::BTreeMap<MemberId, Decimal> = balances
            .values()
            .map(|b| (b.member_id.clone(), b.net))
            .collect();
        let mut touches: std::collections::BTreeMap<MemberId, i64> =
            Default::default();

        for settlement in &settlements {
            *remaining.get_mut(&settlement.from).unwrap() += settlement.amount;
            *remaining.get_mut(&settlement.to).unwrap() -= settlement.amount;
            *touches.entry(settlement.from.clone()).or_default() += 1;
            *touches.entry(settlement.to.clone()).or_default() += 1;
        }

        // Each recorded amount is rounded to the cent, shifting a member's
        // residual by at most half a cent per transfer they appear in.
        for (member, net) in &remaining {
            let rounding_slack =
                Decimal::new(5, 3) * Decimal::from(*touches.get(member).unwrap_or(&0));
            let bound = config.settled_tolerance + rounding_slack;
            prop_assert!(
                net.abs() <= bound,
                "member {} left with {} (bound {})",
                member,
                net,
                bound
            );
        }
    }

    /// Property: at most N-1 transfers for N non-zero balances
    #[test]
    fn prop_settlement_cardinality((members, expenses) in trip_strategy()) {
        let config = SolverConfig::default();
        let balances =
            compute_balances(&expenses, &members, IntegrityMode::Strict).unwrap();
        let settlements = compute_settlements(&balances, &config).unwrap();

        let non_zero = balances
            .values()
            .filter(|b| b.abs_net() > config.settled_tolerance)
            .count();
        prop_assert!(settlements.len() <= non_zero.saturating_sub(1));
    }

    /// Property: no self-transfers, all amounts positive
    #[test]
    fn prop_settlements_well_formed((members, expenses) in trip_strategy()) {
        let balances =
            compute_balances(&expenses, &members, IntegrityMode::Strict).unwrap();
        let settlements =
            compute_settlements(&balances, &SolverConfig::default()).unwrap();

        for settlement in &settlements {
            prop_assert_ne!(&settlement.from, &settlement.to);
            prop_assert!(settlement.amount > Decimal::ZERO);
        }
    }

    /// Property: identical input yields identical output, order included
    #[test]
    fn prop_deterministic((members, expenses) in trip_strategy()) {
        let config = SolverConfig::default();

        let balances1 =
            compute_balances(&expenses, &members, IntegrityMode::Strict).unwrap();
        let balances2 =
            compute_balances(&expenses, &members, IntegrityMode::Strict).unwrap();
        prop_assert_eq!(&balances1, &balances2);

        let settlements1 = compute_settlements(&balances1, &config).unwrap();
        let settlements2 = compute_settlements(&balances2, &config).unwrap();
        prop_assert_eq!(settlements1, settlements2);
    }
}
