//! AdminAuthorizer backed by the caller's stored role.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProfileId};
use crate::ports::{AdminAuthorizer, ProfileStore};

/// Treats a caller as admin when their profile row has `role = admin`.
///
/// A caller without a profile is not an admin.
pub struct ProfileRoleAuthorizer {
    store: Arc<dyn ProfileStore>,
}

impl ProfileRoleAuthorizer {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AdminAuthorizer for ProfileRoleAuthorizer {
    async fn is_admin(&self, caller: &ProfileId) -> Result<bool, DomainError> {
        Ok(self
            .store
            .find_by_id(caller)
            .await?
            .map(|profile| profile.is_admin())
            .unwrap_or(false))
    }
}
