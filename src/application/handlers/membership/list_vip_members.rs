//! ListVipMembersHandler - Query handler for the admin VIP roster.

use std::sync::Arc;

use crate::domain::membership::{MembershipError, Role};
use crate::ports::{Clock, ProfileStore};

use super::VipStatusView;

#[derive(Debug, Clone, Default)]
pub struct ListVipMembersQuery;

/// Lists every `vip` profile with its classification.
///
/// Expired members still holding the role are included, so the roster
/// shows what the next sweep will downgrade. Ordered soonest expiration
/// first; non-expiring members last.
pub struct ListVipMembersHandler {
    store: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
}

impl ListVipMembersHandler {
    pub fn new(store: Arc<dyn ProfileStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        _query: ListVipMembersQuery,
    ) -> Result<Vec<VipStatusView>, MembershipError> {
        let now = self.clock.now();
        let mut members: Vec<VipStatusView> = self
            .store
            .find_by_role(Role::Vip)
            .await?
            .iter()
            .map(|profile| VipStatusView::from_profile(profile, now))
            .collect();

        members.sort_by(|a, b| match (a.expiration_date, b.expiration_date) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.profile_id.cmp(&b.profile_id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.profile_id.cmp(&b.profile_id),
        });

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::*;
    use crate::domain::membership::VipStatus;

    #[tokio::test]
    async fn lists_vips_with_status_soonest_first() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![
            profile("forever", Role::Vip, None),
            profile("later", Role::Vip, Some(now().add_days(20))),
            profile("user", Role::User, None),
            profile("lapsed", Role::Vip, Some(now().minus_days(1))),
        ]));
        let handler = ListVipMembersHandler::new(store, test_clock());

        let members = handler.handle(ListVipMembersQuery).await.unwrap();

        let ids: Vec<_> = members.iter().map(|m| m.profile_id.as_str()).collect();
        assert_eq!(ids, vec!["lapsed", "later", "forever"]);
        assert_eq!(members[0].status, VipStatus::Expired);
        assert_eq!(
            members[2].status,
            VipStatus::ActiveVip {
                days_remaining: None
            }
        );
    }
}
