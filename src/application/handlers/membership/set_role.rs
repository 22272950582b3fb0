//! SetRoleHandler - Command handler for admin role edits.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ProfileId, Timestamp};
use crate::domain::membership::{MembershipError, Role};
use crate::ports::ProfileStore;

/// Command to overwrite a profile's role.
#[derive(Debug, Clone)]
pub struct SetRoleCommand {
    pub profile_id: ProfileId,
    /// Submitted role value, parsed before any store call.
    pub role: String,
    /// Expiration for `vip`; `None` grants a non-expiring membership.
    /// Ignored for other roles.
    pub expiration_date: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRoleResult {
    pub profile_id: ProfileId,
    pub role: Role,
    pub expiration_date: Option<Timestamp>,
}

/// Handler for admin role edits.
pub struct SetRoleHandler {
    store: Arc<dyn ProfileStore>,
}

impl SetRoleHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SetRoleCommand) -> Result<SetRoleResult, MembershipError> {
        let role = Role::parse(&cmd.role)?;

        let mut profile = self
            .store
            .find_by_id(&cmd.profile_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.profile_id.clone()))?;

        profile.assign_role(role, cmd.expiration_date);

        self.store
            .update(&profile.id, &profile.membership_changes())
            .await?;

        info!(profile_id = %profile.id, role = %role, "Profile role updated");

        Ok(SetRoleResult {
            profile_id: profile.id,
            role: profile.role,
            expiration_date: profile.expiration_date,
        })
    }
}
