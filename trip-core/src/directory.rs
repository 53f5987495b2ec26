//! Member directory
//!
//! Canonical list of trip members. The settlement engine reads this to
//! initialize a balance for every member, including members with no
//! expenses. Membership lifecycle (join/leave) is driven from outside.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::types::{Member, MemberId, TripId};

/// In-memory member directory, keyed by trip
///
/// Reads are consistent at the time of each call: `members` returns a
/// snapshot, so a concurrent membership change never tears a balance
/// computation in half.
#[derive(Debug, Default)]
pub struct MemberDirectory {
    members: RwLock<HashMap<TripId, Vec<Member>>>,
}

impl MemberDirectory {
    /// Create empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member, or replace the display name of an existing one
    pub fn upsert_member(&self, trip: &TripId, member: Member) {
        let mut members = self.members.write();
        let roster = members.entry(trip.clone()).or_default();
        match roster.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => {
                tracing::debug!(trip = %trip, member = %member.id, "member joined");
                roster.push(member);
            }
        }
    }

    /// Remove a member; returns false if the member was not present
    pub fn remove_member(&self, trip: &TripId, member: &MemberId) -> bool {
        let mut members = self.members.write();
        let Some(roster) = members.get_mut(trip) else {
            return false;
        };
        let before = roster.len();
        roster.retain(|m| &m.id != member);
        if roster.len() < before {
            tracing::debug!(trip = %trip, member = %member, "member left");
            true
        } else {
            false
        }
    }

    /// Snapshot of the current member list (empty for unknown trips)
    pub fn members(&self, trip: &TripId) -> Vec<Member> {
        self.members
            .read()
            .get(trip)
            .cloned()
            .unwrap_or_default()
    }
}
