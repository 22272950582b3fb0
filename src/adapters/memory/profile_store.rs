//! In-memory ProfileStore for development and tests.
//!
//! Supports failure injection so callers can exercise partial-failure
//! paths (a single profile's writes failing, or the whole store being
//! unreachable) without a database.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId};
use crate::domain::membership::{Profile, ProfileChanges, Role};
use crate::ports::{profile_not_found, ProfileStore};

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<ProfileId, Profile>>,
    failing_updates: RwLock<HashSet<ProfileId>>,
    unavailable: RwLock<bool>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `profiles`.
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            profiles: RwLock::new(profiles),
            ..Self::default()
        }
    }

    /// Makes every subsequent update of `id` fail with a database error.
    pub async fn fail_updates_for(&self, id: ProfileId) {
        self.failing_updates.write().await.insert(id);
    }

    /// Makes every call fail with `StoreUnavailable` until reset.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    /// Returns a copy of the stored profile, bypassing failure injection.
    pub async fn snapshot(&self, id: &ProfileId) -> Option<Profile> {
        self.profiles.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if *self.unavailable.read().await {
            return Err(DomainError::store_unavailable("In-memory store marked unavailable"));
        }
        Ok(())
    }

    async fn collect(&self, predicate: impl Fn(&Profile) -> bool) -> Vec<Profile> {
        let mut matches: Vec<Profile> = self
            .profiles
            .read()
            .await
            .values()
            .filter(|p| predicate(*p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        self.check_available().await?;
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Profile>, DomainError> {
        self.check_available().await?;
        Ok(self.collect(|p| p.role == role).await)
    }

    async fn find_vip_requests(&self) -> Result<Vec<Profile>, DomainError> {
        self.check_available().await?;
        Ok(self.collect(|p| p.requested_vip).await)
    }

    async fn update(&self, id: &ProfileId, changes: &ProfileChanges) -> Result<(), DomainError> {
        self.check_available().await?;
        if self.failing_updates.read().await.contains(id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Injected update failure for {}", id),
            ));
        }

        let mut profiles = self.profiles.write().await;
        let profile = profiles.get_mut(id).ok_or_else(|| profile_not_found(id))?;
        changes.apply_to(profile);
        Ok(())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), DomainError> {
        self.check_available().await?;
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(
                DomainError::new(ErrorCode::ProfileExists, "Profile already exists")
                    .with_detail("profile_id", profile.id.as_str()),
            );
        }
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ProfileId {
        ProfileId::new(value).unwrap()
    }

    fn vip(value: &str) -> Profile {
        let mut profile = Profile::new(id(value), None, None);
        profile.role = Role::Vip;
        profile
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let mut seeded = vip("a");
        seeded.requested_vip = true;
        let store = InMemoryProfileStore::with_profiles([seeded]);

        store
            .update(&id("a"), &ProfileChanges::membership(Role::User, None))
            .await
            .unwrap();

        let stored = store.snapshot(&id("a")).await.unwrap();
        assert_eq!(stored.role, Role::User);
        assert!(stored.requested_vip);
    }

    #[tokio::test]
    async fn update_of_unknown_profile_is_not_found() {
        let store = InMemoryProfileStore::new();

        let err = store
            .update(&id("ghost"), &ProfileChanges::requested_vip(true))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
        assert_eq!(err.details.get("profile_id").map(String::as_str), Some("ghost"));
    }

    #[tokio::test]
    async fn injected_update_failure_targets_one_profile() {
        let store = InMemoryProfileStore::with_profiles([vip("a"), vip("b")]);
        store.fail_updates_for(id("a")).await;

        let changes = ProfileChanges::membership(Role::User, None);
        assert!(store.update(&id("a"), &changes).await.is_err());
        assert!(store.update(&id("b"), &changes).await.is_ok());
    }

    #[tokio::test]
    async fn unavailable_store_fails_reads() {
        let store = InMemoryProfileStore::with_profiles([vip("a")]);
        store.set_unavailable(true).await;

        let err = store.find_by_role(Role::Vip).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);

        store.set_unavailable(false).await;
        assert_eq!(store.find_by_role(Role::Vip).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryProfileStore::with_profiles([vip("a")]);

        let err = store.insert(&vip("a")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileExists);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn listings_are_ordered_by_id() {
        let store = InMemoryProfileStore::with_profiles([vip("c"), vip("a"), vip("b")]);

        let ids: Vec<String> = store
            .find_by_role(Role::Vip)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
