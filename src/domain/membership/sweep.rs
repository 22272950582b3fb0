//! Expiration sweep bookkeeping.

use serde::Serialize;

use crate::domain::foundation::{ProfileId, Timestamp};

use super::Profile;

/// Outcome of one sweep pass.
///
/// A failed downgrade does not abort the pass; the profile id lands in
/// `failures` and is picked up again by the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub downgraded_count: usize,
    pub failures: Vec<ProfileId>,
}

impl SweepReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.downgraded_count += 1;
    }

    pub fn record_failure(&mut self, id: ProfileId) {
        self.failures.push(id);
    }

    /// True when every candidate was downgraded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of profiles the pass attempted to downgrade.
    pub fn attempted(&self) -> usize {
        self.downgraded_count + self.failures.len()
    }
}

/// Returns true if the sweep should downgrade this profile at `now`.
///
/// Only `vip` profiles whose expiration is strictly in the past qualify.
/// Non-expiring VIPs and admins are never touched.
pub fn needs_downgrade(profile: &Profile, now: Timestamp) -> bool {
    profile.status(now).is_expired()
}
