//! Profile store port.
//!
//! Contract for reading and updating the `profiles` records that carry
//! role and VIP expiration. The catalog platform owns the record; this
//! service only writes the membership fields and the request flag.
//!
//! # Design
//!
//! - **Field-level updates**: `update` writes only the fields present in a
//!   [`ProfileChanges`] set, so concurrent edits to unrelated columns
//!   (username, avatar) are not clobbered
//! - **Last write wins**: there is no optimistic locking on the membership
//!   fields
//!
//! # Example
//!
//! ```ignore
//! async fn downgrade(store: &dyn ProfileStore, id: &ProfileId) -> Result<(), DomainError> {
//!     store
//!         .update(id, &ProfileChanges::membership(Role::User, None))
//!         .await
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId};
use crate::domain::membership::{Profile, ProfileChanges, Role};

/// Persistence port for profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Find a profile by id.
    ///
    /// Returns `None` if no record exists.
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError>;

    /// List every profile currently holding `role`.
    async fn find_by_role(&self, role: Role) -> Result<Vec<Profile>, DomainError>;

    /// List profiles with a pending VIP request.
    async fn find_vip_requests(&self) -> Result<Vec<Profile>, DomainError>;

    /// Apply a field-level update.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` (with a `profile_id` detail) if no record matches
    /// - `StoreUnavailable` / `DatabaseError` on transport failure
    async fn update(&self, id: &ProfileId, changes: &ProfileChanges) -> Result<(), DomainError>;

    /// Insert a new profile.
    ///
    /// # Errors
    ///
    /// - `ProfileExists` if a record with the same id is present
    async fn insert(&self, profile: &Profile) -> Result<(), DomainError>;
}

/// Builds the `ProfileNotFound` error stores return for a missing id.
pub fn profile_not_found(id: &ProfileId) -> DomainError {
    DomainError::new(ErrorCode::ProfileNotFound, format!("Profile not found: {}", id))
        .with_detail("profile_id", id.as_str())
}
