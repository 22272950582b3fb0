//! RequestVipHandler - Command handler for self-service VIP requests.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::ProfileId;
use crate::domain::membership::{MembershipError, ProfileChanges};
use crate::ports::ProfileStore;

/// Command to flag a pending VIP request on the caller's profile.
#[derive(Debug, Clone)]
pub struct RequestVipCommand {
    pub profile_id: ProfileId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestVipResult {
    pub profile_id: ProfileId,
    /// True if a request was already pending.
    pub already_requested: bool,
}

/// Handler for VIP requests.
///
/// Sets `requested_vip` and nothing else. The admin console consumes the
/// flag through the approval operation.
pub struct RequestVipHandler {
    store: Arc<dyn ProfileStore>,
}

impl RequestVipHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: RequestVipCommand) -> Result<RequestVipResult, MembershipError> {
        let mut profile = self
            .store
            .find_by_id(&cmd.profile_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.profile_id.clone()))?;

        let already_requested = !profile.request_vip();

        self.store
            .update(&profile.id, &ProfileChanges::requested_vip(true))
            .await?;

        info!(profile_id = %profile.id, already_requested, "VIP requested");

        Ok(RequestVipResult {
            profile_id: profile.id,
            already_requested,
        })
    }
}
