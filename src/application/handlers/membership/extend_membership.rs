//! ExtendMembershipHandler - Command handler for adding VIP time.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ProfileId, Timestamp};
use crate::domain::membership::{MembershipError, PeriodDays, VipStatus};
use crate::ports::{Clock, ProfileStore};

/// Command to extend (or start) a profile's VIP membership.
#[derive(Debug, Clone)]
pub struct ExtendMembershipCommand {
    pub profile_id: ProfileId,
    /// Raw day count; validated before the store is touched.
    pub period_days: i64,
}

/// Result of a successful extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendMembershipResult {
    pub profile_id: ProfileId,
    pub expiration_date: Timestamp,
    pub status: VipStatus,
}

/// Handler for extending memberships.
///
/// Reads the current expiration, computes the new one and writes role and
/// expiration back. The read and the write are not atomic: two concurrent
/// extensions of the same profile race and the last write wins.
pub struct ExtendMembershipHandler {
    store: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
}

impl ExtendMembershipHandler {
    pub fn new(store: Arc<dyn ProfileStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: ExtendMembershipCommand,
    ) -> Result<ExtendMembershipResult, MembershipError> {
        // 1. Validate the period before any store call
        let period = PeriodDays::new(cmd.period_days)?;

        // 2. Load the profile
        let mut profile = self
            .store
            .find_by_id(&cmd.profile_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.profile_id.clone()))?;

        // 3. Apply the extension (domain logic)
        let now = self.clock.now();
        let expiration_date = profile.extend(now, period)?;

        // 4. Persist role and expiration
        self.store
            .update(&profile.id, &profile.membership_changes())
            .await?;

        info!(
            profile_id = %profile.id,
            period_days = period.days(),
            expiration_date = %expiration_date,
            "VIP membership extended"
        );

        Ok(ExtendMembershipResult {
            status: profile.status(now),
            profile_id: profile.id,
            expiration_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::*;
    use crate::domain::membership::Role;

    fn command(id: &str, period_days: i64) -> ExtendMembershipCommand {
        ExtendMembershipCommand {
            profile_id: profile_id(id),
            period_days,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn lapsed_membership_restarts_from_now() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "vip-1",
            Role::Vip,
            Some(now().minus_days(10)),
        )]));
        let handler = ExtendMembershipHandler::new(store.clone(), test_clock());

        let result = handler.handle(command("vip-1", 30)).await.unwrap();

        assert_eq!(result.expiration_date, now().add_days(30));
        assert_eq!(
            store.get("vip-1").unwrap().expiration_date,
            Some(now().add_days(30))
        );
    }

    #[tokio::test]
    async fn live_membership_compounds() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "vip-1",
            Role::Vip,
            Some(now().add_days(5)),
        )]));
        let handler = ExtendMembershipHandler::new(store, test_clock());

        let result = handler.handle(command("vip-1", 30)).await.unwrap();

        assert_eq!(result.expiration_date, now().add_days(35));
        assert_eq!(
            result.status,
            VipStatus::ActiveVip {
                days_remaining: Some(35)
            }
        );
    }

    #[tokio::test]
    async fn promotes_plain_user_to_vip() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "user-1",
            Role::User,
            None,
        )]));
        let handler = ExtendMembershipHandler::new(store.clone(), test_clock());

        handler.handle(command("user-1", 7)).await.unwrap();

        let stored = store.get("user-1").unwrap();
        assert_eq!(stored.role, Role::Vip);
        assert_eq!(stored.expiration_date, Some(now().add_days(7)));
    }

    #[tokio::test]
    async fn writes_only_membership_fields() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "user-1",
            Role::User,
            None,
        )]));
        let handler = ExtendMembershipHandler::new(store.clone(), test_clock());

        handler.handle(command("user-1", 7)).await.unwrap();

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.requested_vip, None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn rejects_non_positive_period_before_store_call() {
        let store = Arc::new(MockProfileStore::failing_reads());
        let handler = ExtendMembershipHandler::new(store.clone(), test_clock());

        for period in [0, -5] {
            let result = handler.handle(command("vip-1", period)).await;
            assert!(matches!(
                result,
                Err(MembershipError::ValidationFailed { ref field, .. }) if field == "period_days"
            ));
        }
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn fails_when_profile_not_found() {
        let handler = ExtendMembershipHandler::new(Arc::new(MockProfileStore::new()), test_clock());

        let result = handler.handle(command("ghost", 30)).await;

        assert!(matches!(result, Err(MembershipError::NotFound(_))));
    }

    #[tokio::test]
    async fn surfaces_write_failure() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "vip-1",
            Role::Vip,
            None,
        )]));
        store.fail_update_for(&profile_id("vip-1"));
        let handler = ExtendMembershipHandler::new(store, test_clock());

        let result = handler.handle(command("vip-1", 30)).await;

        assert!(matches!(result, Err(MembershipError::StoreUnavailable(_))));
    }
}
