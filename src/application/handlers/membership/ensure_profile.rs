//! EnsureProfileHandler - Command handler that creates a profile on first sight.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{ErrorCode, ProfileId};
use crate::domain::membership::{MembershipError, Profile};
use crate::ports::ProfileStore;

/// Command to make sure a profile exists for an authenticated user.
#[derive(Debug, Clone)]
pub struct EnsureProfileCommand {
    pub profile_id: ProfileId,
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureProfileResult {
    pub profile: Profile,
    pub created: bool,
}

/// Handler for first-login profile creation.
///
/// Existing profiles are returned untouched. New profiles start as `user`.
pub struct EnsureProfileHandler {
    store: Arc<dyn ProfileStore>,
}

impl EnsureProfileHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EnsureProfileCommand) -> Result<EnsureProfileResult, MembershipError> {
        if let Some(profile) = self.store.find_by_id(&cmd.profile_id).await? {
            return Ok(EnsureProfileResult {
                profile,
                created: false,
            });
        }

        let profile = Profile::new(cmd.profile_id, cmd.username, cmd.email);
        match self.store.insert(&profile).await {
            Ok(()) => {
                info!(profile_id = %profile.id, "Profile created");
                Ok(EnsureProfileResult {
                    profile,
                    created: true,
                })
            }
            // Lost a race with a concurrent first request; read the winner.
            Err(e) if e.code == ErrorCode::ProfileExists => {
                let existing = self
                    .store
                    .find_by_id(&profile.id)
                    .await?
                    .ok_or_else(|| MembershipError::not_found(profile.id.clone()))?;
                Ok(EnsureProfileResult {
                    profile: existing,
                    created: false,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
