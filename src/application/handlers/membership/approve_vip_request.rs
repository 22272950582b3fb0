//! ApproveVipRequestHandler - Command handler for admin approval of VIP requests.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ProfileId, Timestamp};
use crate::domain::membership::{MembershipError, PeriodDays, VipStatus};
use crate::ports::{Clock, ProfileStore};

/// Command to approve a pending VIP request.
#[derive(Debug, Clone)]
pub struct ApproveVipRequestCommand {
    pub profile_id: ProfileId,
    /// Optional period; `None` grants a non-expiring membership.
    pub period_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveVipRequestResult {
    pub profile_id: ProfileId,
    pub expiration_date: Option<Timestamp>,
    pub status: VipStatus,
}

/// Handler for approving VIP requests.
///
/// Approval does not require the request flag to be set; an admin may
/// approve proactively. The flag is cleared in the same write as the role.
pub struct ApproveVipRequestHandler {
    store: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
}

impl ApproveVipRequestHandler {
    pub fn new(store: Arc<dyn ProfileStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: ApproveVipRequestCommand,
    ) -> Result<ApproveVipRequestResult, MembershipError> {
        let period = cmd.period_days.map(PeriodDays::new).transpose()?;

        let mut profile = self
            .store
            .find_by_id(&cmd.profile_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.profile_id.clone()))?;

        let now = self.clock.now();
        let expiration_date = profile.approve_vip_request(now, period)?;

        let changes = profile.membership_changes().with_requested_vip(false);
        self.store.update(&profile.id, &changes).await?;

        info!(
            profile_id = %profile.id,
            period_days = period.map(|p| p.days()),
            "VIP request approved"
        );

        Ok(ApproveVipRequestResult {
            status: profile.status(now),
            profile_id: profile.id,
            expiration_date,
        })
    }
}
