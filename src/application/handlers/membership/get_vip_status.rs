//! GetVipStatusHandler - Query handler for a profile's VIP classification.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{ProfileId, Timestamp};
use crate::domain::membership::{MembershipError, Profile, Role, VipStatus};
use crate::ports::{Clock, ProfileStore};

/// Query for the VIP status of one profile.
#[derive(Debug, Clone)]
pub struct GetVipStatusQuery {
    pub profile_id: ProfileId,
}

/// Profile membership fields plus their classification at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VipStatusView {
    pub profile_id: ProfileId,
    pub username: Option<String>,
    pub role: Role,
    pub expiration_date: Option<Timestamp>,
    pub requested_vip: bool,
    pub status: VipStatus,
}

impl VipStatusView {
    pub fn from_profile(profile: &Profile, now: Timestamp) -> Self {
        Self {
            profile_id: profile.id.clone(),
            username: profile.username.clone(),
            role: profile.role,
            expiration_date: profile.expiration_date,
            requested_vip: profile.requested_vip,
            status: profile.status(now),
        }
    }
}

/// Handler for classifying a stored profile.
///
/// Read-only: an expired VIP is reported as `Expired` but stays `vip` in
/// the store until the sweep or a revoke downgrades it.
pub struct GetVipStatusHandler {
    store: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
}

impl GetVipStatusHandler {
    pub fn new(store: Arc<dyn ProfileStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(&self, query: GetVipStatusQuery) -> Result<VipStatusView, MembershipError> {
        let profile = self
            .store
            .find_by_id(&query.profile_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(query.profile_id.clone()))?;

        Ok(VipStatusView::from_profile(&profile, self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::*;

    #[tokio::test]
    async fn classifies_stored_profile() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "vip-1",
            Role::Vip,
            Some(now().add_days(2)),
        )]));
        let handler = GetVipStatusHandler::new(store, test_clock());

        let view = handler
            .handle(GetVipStatusQuery {
                profile_id: profile_id("vip-1"),
            })
            .await
            .unwrap();

        assert_eq!(view.role, Role::Vip);
        assert_eq!(view.status, VipStatus::ExpiringSoon { days_remaining: 2 });
    }

    #[tokio::test]
    async fn expired_profile_is_reported_but_not_mutated() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "vip-1",
            Role::Vip,
            Some(now().minus_days(1)),
        )]));
        let handler = GetVipStatusHandler::new(store.clone(), test_clock());

        let view = handler
            .handle(GetVipStatusQuery {
                profile_id: profile_id("vip-1"),
            })
            .await
            .unwrap();

        assert_eq!(view.status, VipStatus::Expired);
        assert!(store.updates().is_empty());
        assert_eq!(store.get("vip-1").unwrap().role, Role::Vip);
    }

    #[tokio::test]
    async fn fails_when_profile_not_found() {
        let handler = GetVipStatusHandler::new(Arc::new(MockProfileStore::new()), test_clock());

        let result = handler
            .handle(GetVipStatusQuery {
                profile_id: profile_id("ghost"),
            })
            .await;

        assert!(matches!(result, Err(MembershipError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_outage_is_store_unavailable() {
        let handler =
            GetVipStatusHandler::new(Arc::new(MockProfileStore::failing_reads()), test_clock());

        let result = handler
            .handle(GetVipStatusQuery {
                profile_id: profile_id("vip-1"),
            })
            .await;

        assert!(matches!(result, Err(MembershipError::StoreUnavailable(_))));
    }
}
