//! Admin authorization port.
//!
//! Admin-only operations (extend, revoke, role edits, approvals, sweep)
//! consult this port before touching the store.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProfileId};

/// Decides whether a caller holds the admin role.
///
/// # Contract
///
/// Implementations must fail closed: an unknown caller is not an admin.
/// Transport failures are returned as errors, never as `Ok(true)`.
#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    async fn is_admin(&self, caller: &ProfileId) -> Result<bool, DomainError>;
}
