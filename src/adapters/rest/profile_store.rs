//! PostgREST implementation of ProfileStore.
//!
//! Talks to the hosted backend's `/rest/v1/profiles` endpoint with the
//! service key, the same access path the catalog's web client uses.
//!
//! # Request shape
//!
//! - Reads: `GET /rest/v1/profiles?select=...&<column>=eq.<value>`
//! - Updates: `PATCH ...?id=eq.<id>` with `Prefer: return=representation`;
//!   an empty representation means no row matched
//! - Inserts: `POST` with `Prefer: return=minimal`; `409` means the row exists
//! - `400`/`422` reject the caller's id and surface as validation failures;
//!   `5xx`/`429` and transport errors surface as `StoreUnavailable`

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, Timestamp};
use crate::domain::membership::{Profile, ProfileChanges, Role};
use crate::ports::{profile_not_found, ProfileStore};

const SELECT_COLUMNS: &str = "id,username,email,role,expiration_date,requested_vip";

/// Connection settings for the REST profile store.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://project.example.co`.
    pub base_url: String,
    pub service_key: SecretString,
    pub timeout: Duration,
}

/// ProfileStore backed by a PostgREST-compatible HTTP API.
pub struct RestProfileStore {
    http_client: reqwest::Client,
    endpoint: String,
    service_key: SecretString,
}

impl RestProfileStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            http_client,
            endpoint: profiles_endpoint(&config.base_url),
            service_key: config.service_key,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();
        request
            .header("apikey", key.as_str())
            .bearer_auth(key)
            .header("Accept", "application/json")
    }

    async fn fetch(&self, filters: &[(&str, String)]) -> Result<Vec<Profile>, DomainError> {
        let mut query: Vec<(&str, String)> = vec![("select", SELECT_COLUMNS.to_string())];
        query.extend(filters.iter().cloned());

        let response = self
            .authorized(self.http_client.get(&self.endpoint))
            .query(&query)
            .send()
            .await
            .map_err(transport_error)?;

        let rows: Vec<ProfileRow> = ensure_success(response).await?.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to decode profiles: {}", e),
            )
        })?;

        rows.into_iter().map(Profile::try_from).collect()
    }
}

/// Profile row as returned by PostgREST.
#[derive(Debug, Serialize, Deserialize)]
struct ProfileRow {
    id: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    role: String,
    #[serde(default)]
    expiration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    requested_vip: Option<bool>,
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
            id: ProfileId::new(row.id)?,
            username: row.username,
            email: row.email,
            role,
            expiration_date: row.expiration_date.map(Timestamp::from_datetime),
            requested_vip: row.requested_vip.unwrap_or(false),
        })
    }
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            role: profile.role.as_str().to_string(),
            expiration_date: profile.expiration_date.map(|t| *t.as_datetime()),
            requested_vip: Some(profile.requested_vip),
        }
    }
}

fn profiles_endpoint(base_url: &str) -> String {
    format!("{}/rest/v1/profiles", base_url.trim_end_matches('/'))
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

/// JSON body for a field-level PATCH. Cleared fields are sent as `null`.
fn patch_body(changes: &ProfileChanges) -> Value {
    let mut body = Map::new();
    if let Some(role) = changes.role {
        body.insert("role".to_string(), Value::from(role.as_str()));
    }
    if let Some(expiration) = changes.expiration_date {
        body.insert(
            "expiration_date".to_string(),
            expiration.map_or(Value::Null, |t| Value::from(t.to_rfc3339())),
        );
    }
    if let Some(flag) = changes.requested_vip {
        body.insert("requested_vip".to_string(), Value::from(flag));
    }
    Value::Object(body)
}

fn transport_error(e: reqwest::Error) -> DomainError {
    tracing::error!("Profile store request failed: {}", e);
    DomainError::store_unavailable(format!("Profile store request failed: {}", e))
}

async fn ensure_success(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(%status, body = %body, "Profile store returned an error");
    Err(status_error(status, &body))
}

/// Maps a failed PostgREST status onto the port's error codes.
///
/// Outages and throttling are `StoreUnavailable`. A rejected request is
/// caused by the only caller-supplied value in the query, the profile id
/// (e.g. a non-UUID id against a `uuid` column), so it is a validation
/// failure on `profile_id`. Anything else is a store fault.
fn status_error(status: StatusCode, body: &str) -> DomainError {
    match status {
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            DomainError::store_unavailable(format!("Profile store returned {}", status))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => DomainError::validation(
            "profile_id",
            format!("Profile store rejected the request ({}): {}", status, body),
        ),
        StatusCode::CONFLICT => {
            DomainError::new(ErrorCode::ProfileExists, "Profile already exists")
        }
        _ => DomainError::new(
            ErrorCode::DatabaseError,
            format!("Profile store returned {}", status),
        ),
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError> {
        let mut profiles = self.fetch(&[("id", eq(id.as_str()))]).await?;
        Ok(profiles.pop())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Profile>, DomainError> {
        self.fetch(&[("role", eq(role.as_str())), ("order", "id".to_string())])
            .await
    }

    async fn find_vip_requests(&self) -> Result<Vec<Profile>, DomainError> {
        self.fetch(&[
            ("requested_vip", "is.true".to_string()),
            ("order", "id".to_string()),
        ])
        .await
    }

    async fn update(&self, id: &ProfileId, changes: &ProfileChanges) -> Result<(), DomainError> {
        let response = self
            .authorized(self.http_client.patch(&self.endpoint))
            .query(&[("id", eq(id.as_str())), ("select", "id".to_string())])
            .header("Prefer", "return=representation")
            .json(&patch_body(changes))
            .send()
            .await
            .map_err(transport_error)?;

        let updated: Vec<Value> = ensure_success(response).await?.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to decode update response: {}", e),
            )
        })?;

        if updated.is_empty() {
            return Err(profile_not_found(id));
        }

        Ok(())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), DomainError> {
        let response = self
            .authorized(self.http_client.post(&self.endpoint))
            .header("Prefer", "return=minimal")
            .json(&ProfileRow::from(profile))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::CONFLICT {
            return Err(
                DomainError::new(ErrorCode::ProfileExists, "Profile already exists")
                    .with_detail("profile_id", profile.id.as_str()),
            );
        }

        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipError;
    use axum::http::HeaderMap;
    use axum::routing::any;
    use axum::Router;
    use serde_json::json;
    use tokio::net::TcpListener;

    const SERVICE_KEY: &str = "service-role-key";

    // ════════════════════════════════════════════════════════════════════════════
    // Stub PostgREST server
    // ════════════════════════════════════════════════════════════════════════════

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{}", addr)
    }

    /// Answers every request to the profiles endpoint with `status` and `body`.
    async fn stub(status: u16, body: Value) -> String {
        let status = axum::http::StatusCode::from_u16(status).unwrap();
        let router = Router::new().route(
            "/rest/v1/profiles",
            any(move || {
                let body = body.clone();
                async move { (status, axum::Json(body)) }
            }),
        );
        serve(router).await
    }

    fn store(base_url: String) -> RestProfileStore {
        RestProfileStore::new(RestStoreConfig {
            base_url,
            service_key: SecretString::new(SERVICE_KEY.to_string()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn id(value: &str) -> ProfileId {
        ProfileId::new(value).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Store behaviour over HTTP
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn find_by_id_sends_service_key_and_decodes_row() {
        let router = Router::new().route(
            "/rest/v1/profiles",
            any(|headers: HeaderMap| async move {
                let expected_bearer = format!("Bearer {}", SERVICE_KEY);
                let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
                let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
                if apikey != Some(SERVICE_KEY) || bearer != Some(expected_bearer.as_str()) {
                    return (axum::http::StatusCode::UNAUTHORIZED, axum::Json(json!([])));
                }
                (
                    axum::http::StatusCode::OK,
                    axum::Json(json!([{ "id": "fan-1", "role": "vip", "requested_vip": true }])),
                )
            }),
        );
        let store = store(serve(router).await);

        let profile = store.find_by_id(&id("fan-1")).await.unwrap().unwrap();

        assert_eq!(profile.role, Role::Vip);
        assert!(profile.requested_vip);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_empty_result() {
        let store = store(stub(200, json!([])).await);
        assert!(store.find_by_id(&id("ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_matching_no_row_is_not_found() {
        let store = store(stub(200, json!([])).await);

        let err = store
            .update(&id("ghost"), &ProfileChanges::requested_vip(true))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
        assert_eq!(
            MembershipError::from(err),
            MembershipError::NotFound(id("ghost"))
        );
    }

    #[tokio::test]
    async fn update_with_representation_succeeds() {
        let store = store(stub(200, json!([{ "id": "fan-1" }])).await);
        assert!(store
            .update(&id("fan-1"), &ProfileChanges::membership(Role::User, None))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn insert_conflict_is_profile_exists() {
        let store = store(stub(409, json!({ "code": "23505" })).await);

        let err = store
            .insert(&Profile::new(id("fan-1"), None, None))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileExists);
        assert_eq!(err.details.get("profile_id").map(String::as_str), Some("fan-1"));
    }

    #[tokio::test]
    async fn server_error_is_store_unavailable() {
        let store = store(stub(503, json!({ "message": "down" })).await);

        let err = store.find_by_role(Role::Vip).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StoreUnavailable);
        assert!(MembershipError::from(err).is_retryable());
    }

    #[tokio::test]
    async fn rejected_id_is_a_validation_failure_not_an_outage() {
        let store = store(
            stub(400, json!({ "code": "22P02", "message": "invalid input syntax for type uuid" }))
                .await,
        );

        let err = store
            .update(&id("not-a-uuid"), &ProfileChanges::requested_vip(true))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let err = MembershipError::from(err);
        assert!(matches!(
            err,
            MembershipError::ValidationFailed { ref field, .. } if field == "profile_id"
        ));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn unreachable_server_is_store_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let store = store(format!("http://{}", addr));

        let err = store.find_by_id(&id("fan-1")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StoreUnavailable);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Pure helpers
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn status_mapping_covers_each_class() {
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "").code,
            ErrorCode::StoreUnavailable
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY, "").code,
            ErrorCode::StoreUnavailable
        );
        assert_eq!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY, "").code,
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            status_error(StatusCode::CONFLICT, "").code,
            ErrorCode::ProfileExists
        );
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, "").code,
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            profiles_endpoint("https://project.example.co/"),
            "https://project.example.co/rest/v1/profiles"
        );
        assert_eq!(
            profiles_endpoint("http://localhost:54321"),
            "http://localhost:54321/rest/v1/profiles"
        );
    }

    #[test]
    fn row_decodes_into_profile() {
        let row: ProfileRow = serde_json::from_value(json!({
            "id": "7b1c1f5e-0000-4000-8000-000000000001",
            "username": "fan",
            "email": null,
            "role": "vip",
            "expiration_date": "2025-02-01T00:00:00+00:00",
            "requested_vip": null
        }))
        .unwrap();

        let profile = Profile::try_from(row).unwrap();

        assert_eq!(profile.role, Role::Vip);
        assert_eq!(
            profile.expiration_date,
            Some(Timestamp::parse_rfc3339("2025-02-01T00:00:00Z").unwrap())
        );
        assert!(!profile.requested_vip);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let row: ProfileRow = serde_json::from_value(json!({
            "id": "abc",
            "role": "owner"
        }))
        .unwrap();

        assert_eq!(
            Profile::try_from(row).unwrap_err().code,
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn revoke_patch_clears_expiration_with_null() {
        let body = patch_body(&ProfileChanges::membership(Role::User, None));
        assert_eq!(body, json!({ "role": "user", "expiration_date": null }));
    }

    #[test]
    fn request_patch_only_touches_flag() {
        let body = patch_body(&ProfileChanges::requested_vip(true));
        assert_eq!(body, json!({ "requested_vip": true }));
    }

    #[test]
    fn extension_patch_carries_rfc3339_expiration() {
        let expiration = Timestamp::parse_rfc3339("2025-03-01T12:00:00Z").unwrap();
        let body = patch_body(&ProfileChanges::membership(Role::Vip, Some(expiration)));
        assert_eq!(body["expiration_date"], json!(expiration.to_rfc3339()));
        assert_eq!(body["role"], json!("vip"));
    }
}
