//! RevokeMembershipHandler - Command handler for removing VIP access.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::ProfileId;
use crate::domain::membership::{MembershipError, Role};
use crate::ports::ProfileStore;

/// Command to revoke a profile's VIP membership.
#[derive(Debug, Clone)]
pub struct RevokeMembershipCommand {
    pub profile_id: ProfileId,
}

/// Result of a revocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeMembershipResult {
    pub profile_id: ProfileId,
    pub previous_role: Role,
    /// False when the profile was already a plain user without expiration.
    pub changed: bool,
}

/// Handler for revoking memberships.
///
/// Forces `role = user` and clears the expiration. Revoking an already
/// revoked profile succeeds and leaves the same state.
pub struct RevokeMembershipHandler {
    store: Arc<dyn ProfileStore>,
}

impl RevokeMembershipHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: RevokeMembershipCommand,
    ) -> Result<RevokeMembershipResult, MembershipError> {
        let mut profile = self
            .store
            .find_by_id(&cmd.profile_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.profile_id.clone()))?;

        let previous_role = profile.role;
        let changed = profile.revoke();

        self.store
            .update(&profile.id, &profile.membership_changes())
            .await?;

        info!(
            profile_id = %profile.id,
            previous_role = %previous_role,
            changed,
            "VIP membership revoked"
        );

        Ok(RevokeMembershipResult {
            profile_id: profile.id,
            previous_role,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::*;

    fn command(id: &str) -> RevokeMembershipCommand {
        RevokeMembershipCommand {
            profile_id: profile_id(id),
        }
    }

    #[tokio::test]
    async fn downgrades_vip_and_clears_expiration() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "vip-1",
            Role::Vip,
            Some(now().add_days(5)),
        )]));
        let handler = RevokeMembershipHandler::new(store.clone());

        let result = handler.handle(command("vip-1")).await.unwrap();

        assert_eq!(result.previous_role, Role::Vip);
        assert!(result.changed);
        let stored = store.get("vip-1").unwrap();
        assert_eq!(stored.role, Role::User);
        assert_eq!(stored.expiration_date, None);
    }

    #[tokio::test]
    async fn revoking_twice_leaves_identical_state() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "vip-1",
            Role::Vip,
            Some(now().add_days(5)),
        )]));
        let handler = RevokeMembershipHandler::new(store.clone());

        handler.handle(command("vip-1")).await.unwrap();
        let after_first = store.get("vip-1").unwrap();
        let second = handler.handle(command("vip-1")).await.unwrap();

        assert!(!second.changed);
        assert_eq!(store.get("vip-1").unwrap(), after_first);
    }

    #[tokio::test]
    async fn fails_when_profile_not_found() {
        let handler = RevokeMembershipHandler::new(Arc::new(MockProfileStore::new()));

        let result = handler.handle(command("ghost")).await;

        assert!(matches!(result, Err(MembershipError::NotFound(_))));
    }
}
