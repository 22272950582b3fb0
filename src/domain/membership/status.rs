//! VIP status classification.
//!
//! Classification is a pure function of role, expiration and the
//! evaluation instant. It never mutates a profile: an expired VIP stays
//! `vip` in storage until the sweep or an explicit revoke downgrades it.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::Role;

/// Memberships with this many whole days or fewer left are expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 3;

/// Display-oriented VIP status of a profile at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VipStatus {
    /// Role is not `vip`.
    NotVip,

    /// VIP with more than [`EXPIRING_SOON_DAYS`] left.
    ///
    /// `days_remaining` is `None` for memberships without an expiration.
    ActiveVip { days_remaining: Option<i64> },

    /// VIP with between zero and [`EXPIRING_SOON_DAYS`] days left.
    ExpiringSoon { days_remaining: i64 },

    /// VIP whose expiration is strictly in the past.
    Expired,
}

impl VipStatus {
    /// Returns true if this status still unlocks VIP content.
    pub fn has_vip_access(&self) -> bool {
        matches!(self, VipStatus::ActiveVip { .. } | VipStatus::ExpiringSoon { .. })
    }

    /// Whole days left, if bounded and not expired.
    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            VipStatus::ActiveVip { days_remaining } => *days_remaining,
            VipStatus::ExpiringSoon { days_remaining } => Some(*days_remaining),
            VipStatus::NotVip | VipStatus::Expired => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        *self == VipStatus::Expired
    }
}

/// Classifies a membership at `now`.
pub fn classify(role: Role, expiration_date: Option<Timestamp>, now: Timestamp) -> VipStatus {
    if !role.is_vip() {
        return VipStatus::NotVip;
    }

    let Some(expiration) = expiration_date else {
        return VipStatus::ActiveVip {
            days_remaining: None,
        };
    };

    if expiration.is_before(&now) {
        return VipStatus::Expired;
    }

    let days_remaining = days_remaining(&expiration, &now);
    if days_remaining <= EXPIRING_SOON_DAYS {
        VipStatus::ExpiringSoon { days_remaining }
    } else {
        VipStatus::ActiveVip {
            days_remaining: Some(days_remaining),
        }
    }
}

/// `ceil((expiration - now) / 1 day)` for `expiration >= now`.
///
/// Returns 0 when `expiration == now`.
pub fn days_remaining(expiration: &Timestamp, now: &Timestamp) -> i64 {
    let remaining = expiration.duration_since(now);
    if remaining <= Duration::zero() {
        return 0;
    }
    let whole = remaining.num_days();
    match Duration::try_days(whole) {
        Some(whole_span) if remaining > whole_span => whole + 1,
        _ => whole,
    }
}
