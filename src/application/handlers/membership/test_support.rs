//! Shared mocks for membership handler tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, Timestamp};
use crate::domain::membership::{Profile, ProfileChanges, Role};
use crate::ports::{profile_not_found, Clock, ProfileStore};

// ════════════════════════════════════════════════════════════════════════════
// Mock Profile Store
// ════════════════════════════════════════════════════════════════════════════

pub struct MockProfileStore {
    profiles: Mutex<Vec<Profile>>,
    updates: Mutex<Vec<(ProfileId, ProfileChanges)>>,
    failing_updates: Mutex<Vec<ProfileId>>,
    fail_reads: bool,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self::with_profiles(Vec::new())
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            updates: Mutex::new(Vec::new()),
            failing_updates: Mutex::new(Vec::new()),
            fail_reads: false,
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::new()
        }
    }

    pub fn fail_update_for(&self, id: &ProfileId) {
        self.failing_updates.lock().unwrap().push(id.clone());
    }

    pub fn get(&self, id: &str) -> Option<Profile> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
    }

    pub fn updates(&self) -> Vec<(ProfileId, ProfileChanges)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    fn check_reads(&self) -> Result<(), DomainError> {
        if self.fail_reads {
            return Err(DomainError::new(
                ErrorCode::StoreUnavailable,
                "Simulated read failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        self.check_reads()?;
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Profile>, DomainError> {
        self.check_reads()?;
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().filter(|p| p.role == role).cloned().collect())
    }

    async fn find_vip_requests(&self) -> Result<Vec<Profile>, DomainError> {
        self.check_reads()?;
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().filter(|p| p.requested_vip).cloned().collect())
    }

    async fn update(&self, id: &ProfileId, changes: &ProfileChanges) -> Result<(), DomainError> {
        if self.failing_updates.lock().unwrap().contains(id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated update failure",
            ));
        }
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| profile_not_found(id))?;
        changes.apply_to(profile);
        self.updates.lock().unwrap().push((id.clone(), changes.clone()));
        Ok(())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.id == profile.id) {
            return Err(DomainError::new(ErrorCode::ProfileExists, "Profile exists"));
        }
        profiles.push(profile.clone());
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Test Clock and Fixtures
// ════════════════════════════════════════════════════════════════════════════

pub struct TestClock(pub Timestamp);

impl Clock for TestClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

pub fn now() -> Timestamp {
    Timestamp::parse_rfc3339("2025-01-10T00:00:00Z").unwrap()
}

pub fn test_clock() -> std::sync::Arc<TestClock> {
    std::sync::Arc::new(TestClock(now()))
}

pub fn profile_id(id: &str) -> ProfileId {
    ProfileId::new(id).unwrap()
}

pub fn profile(id: &str, role: Role, expiration_date: Option<Timestamp>) -> Profile {
    let mut profile = Profile::new(
        profile_id(id),
        Some(format!("{}-name", id)),
        Some(format!("{}@example.com", id)),
    );
    profile.role = role;
    profile.expiration_date = expiration_date;
    profile
}
