//! Profile aggregate and field-level change sets.
//!
//! A profile is the per-user record holding the role and VIP expiration.
//! Every lifecycle mutation is expressed on the aggregate and then persisted
//! as a [`ProfileChanges`] set, so stores write only the fields the
//! operation actually owns.
//!
//! # Invariants
//!
//! - `expiration_date` is cleared whenever the role is written as anything
//!   other than `vip`
//! - Extension bases on the later of the current expiration and `now`
//! - Revocation is idempotent

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProfileId, Timestamp, ValidationError};

use super::{classify, MembershipError, PeriodDays, Role, VipStatus};

/// Per-user record holding role and VIP expiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identifier issued by the auth platform.
    pub id: ProfileId,

    /// Display name.
    pub username: Option<String>,

    /// Contact email.
    pub email: Option<String>,

    /// Current role.
    pub role: Role,

    /// VIP expiration. `None` with `role = vip` means the membership never
    /// expires; irrelevant for other roles.
    pub expiration_date: Option<Timestamp>,

    /// Pending self-service VIP request, consumed by the admin console.
    #[serde(default)]
    pub requested_vip: bool,
}

impl Profile {
    /// Creates a fresh `user` profile.
    pub fn new(id: ProfileId, username: Option<String>, email: Option<String>) -> Self {
        Self {
            id,
            username,
            email,
            role: Role::User,
            expiration_date: None,
            requested_vip: false,
        }
    }

    /// Classifies this profile's VIP state at `now`.
    pub fn status(&self, now: Timestamp) -> VipStatus {
        classify(self.role, self.expiration_date, now)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Extends (or starts) VIP time by `period`, promoting to `vip`.
    ///
    /// Returns the new expiration date.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the resulting instant is not
    /// representable.
    pub fn extend(&mut self, now: Timestamp, period: PeriodDays) -> Result<Timestamp, MembershipError> {
        let expiration = extended_expiration(self.expiration_date, now, period)?;
        self.role = Role::Vip;
        self.expiration_date = Some(expiration);
        Ok(expiration)
    }

    /// Forces the profile back to `user` and clears the expiration.
    ///
    /// Returns true if anything changed.
    pub fn revoke(&mut self) -> bool {
        let changed = self.role != Role::User || self.expiration_date.is_some();
        self.role = Role::User;
        self.expiration_date = None;
        changed
    }

    /// Flags a pending VIP request. The role is left untouched.
    ///
    /// Returns true if the flag was not already set.
    pub fn request_vip(&mut self) -> bool {
        let changed = !self.requested_vip;
        self.requested_vip = true;
        changed
    }

    /// Admin direct edit of the role.
    ///
    /// The expiration is kept only for `vip`; `None` grants a
    /// non-expiring membership.
    pub fn assign_role(&mut self, role: Role, expiration_date: Option<Timestamp>) {
        self.role = role;
        self.expiration_date = if role.is_vip() { expiration_date } else { None };
    }

    /// Admin approval of a pending request.
    ///
    /// With a period this behaves like [`Profile::extend`]; without one the
    /// profile becomes a non-expiring VIP. Either way the request flag is
    /// cleared.
    pub fn approve_vip_request(
        &mut self,
        now: Timestamp,
        period: Option<PeriodDays>,
    ) -> Result<Option<Timestamp>, MembershipError> {
        let expiration = match period {
            Some(period) => Some(self.extend(now, period)?),
            None => {
                self.assign_role(Role::Vip, None);
                None
            }
        };
        self.requested_vip = false;
        Ok(expiration)
    }

    /// Change set covering the membership fields (role and expiration).
    pub fn membership_changes(&self) -> ProfileChanges {
        ProfileChanges::membership(self.role, self.expiration_date)
    }
}

/// Computes the expiration produced by extending `current` by `period`.
///
/// The base is `current` when it is strictly after `now`, otherwise `now`,
/// so lapsed memberships restart from the renewal instead of compounding
/// from a past date.
pub fn extended_expiration(
    current: Option<Timestamp>,
    now: Timestamp,
    period: PeriodDays,
) -> Result<Timestamp, ValidationError> {
    let base = match current {
        Some(expiration) if expiration.is_after(&now) => expiration,
        _ => now,
    };
    base.checked_add_days(period.days()).ok_or_else(|| {
        ValidationError::invalid_format("period_days", "resulting expiration is out of range")
    })
}

/// Field-level update applied by a profile store.
///
/// `None` leaves a field untouched. For `expiration_date`, `Some(None)`
/// clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub role: Option<Role>,
    pub expiration_date: Option<Option<Timestamp>>,
    pub requested_vip: Option<bool>,
}

impl ProfileChanges {
    /// Writes role and expiration together.
    pub fn membership(role: Role, expiration_date: Option<Timestamp>) -> Self {
        Self {
            role: Some(role),
            expiration_date: Some(expiration_date),
            requested_vip: None,
        }
    }

    /// Writes only the request flag.
    pub fn requested_vip(flag: bool) -> Self {
        Self {
            requested_vip: Some(flag),
            ..Default::default()
        }
    }

    /// Adds the request flag to this change set.
    pub fn with_requested_vip(mut self, flag: bool) -> Self {
        self.requested_vip = Some(flag);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.expiration_date.is_none() && self.requested_vip.is_none()
    }

    /// Applies the change set to an in-memory profile.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(role) = self.role {
            profile.role = role;
        }
        if let Some(expiration) = self.expiration_date {
            profile.expiration_date = expiration;
        }
        if let Some(flag) = self.requested_vip {
            profile.requested_vip = flag;
        }
    }
}
