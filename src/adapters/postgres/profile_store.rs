//! PostgreSQL implementation of ProfileStore.
//!
//! Reads and writes the `profiles` table. Profile ids are the auth
//! platform's user UUIDs.

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, Timestamp};
use crate::domain::membership::{Profile, ProfileChanges, Role};
use crate::ports::{profile_not_found, ProfileStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, username, email, role, expiration_date, requested_vip";

/// PostgreSQL implementation of the ProfileStore port.
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a profile.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    username: Option<String>,
    email: Option<String>,
    role: String,
    expiration_date: Option<DateTime<Utc>>,
    requested_vip: bool,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid role value: {}", row.role),
            )
        })?;

        Ok(Profile {
            id: ProfileId::new(row.id.to_string())?,
            username: row.username,
            email: row.email,
            role,
            expiration_date: row.expiration_date.map(Timestamp::from_datetime),
            requested_vip: row.requested_vip,
        })
    }
}

fn parse_profile_id_as_uuid(id: &ProfileId) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id.as_str()).map_err(|e| {
        DomainError::validation("profile_id", format!("Profile ID must be a valid UUID: {}", e))
    })
}

fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Builds `UPDATE profiles SET ... WHERE id = $n` for the fields present.
fn build_update(id: Uuid, changes: &ProfileChanges) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE profiles SET updated_at = NOW()");

    if let Some(role) = changes.role {
        builder.push(", role = ").push_bind(role.as_str());
    }
    if let Some(expiration) = changes.expiration_date {
        builder
            .push(", expiration_date = ")
            .push_bind(expiration.map(|t| *t.as_datetime()));
    }
    if let Some(flag) = changes.requested_vip {
        builder.push(", requested_vip = ").push_bind(flag);
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        let uuid = parse_profile_id_as_uuid(id)?;

        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to find profile", e))?;

        row.map(Profile::try_from).transpose()
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE role = $1 ORDER BY id",
            PROFILE_COLUMNS
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list profiles by role", e))?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    async fn find_vip_requests(&self) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE requested_vip ORDER BY id",
            PROFILE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list VIP requests", e))?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    async fn update(&self, id: &ProfileId, changes: &ProfileChanges) -> Result<(), DomainError> {
        let uuid = parse_profile_id_as_uuid(id)?;

        let result = build_update(uuid, changes)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to update profile", e))?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }

        Ok(())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), DomainError> {
        let uuid = parse_profile_id_as_uuid(&profile.id)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id, username, email, role, expiration_date, requested_vip)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(uuid)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(profile.role.as_str())
        .bind(profile.expiration_date.map(|t| *t.as_datetime()))
        .bind(profile.requested_vip)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("profiles_pkey") {
                    return DomainError::new(ErrorCode::ProfileExists, "Profile already exists")
                        .with_detail("profile_id", profile.id.as_str());
                }
            }
            database_error("Failed to insert profile", e)
        })?;

        Ok(())
    }
}
