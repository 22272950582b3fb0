//! Data transfer objects for membership HTTP endpoints.
//!
//! Request bodies are decoded into these types before any handler runs; a
//! malformed body becomes a `VALIDATION_FAILED` response.

use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{
    ApproveVipRequestResult, ExtendMembershipResult, RequestVipResult, RevokeMembershipResult,
    SetRoleResult, VipStatusView,
};
use crate::domain::foundation::{ProfileId, Timestamp};
use crate::domain::membership::{Profile, Role, SweepReport, VipStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /profiles/:id/extend`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtendMembershipRequest {
    pub period_days: i64,
}

/// Body of `POST /profiles/:id/approve`. An empty object grants a
/// non-expiring membership.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApproveVipRequestRequest {
    #[serde(default)]
    pub period_days: Option<i64>,
}

/// Body of `PUT /profiles/:id/role`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
    #[serde(default)]
    pub expiration_date: Option<Timestamp>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Membership state of one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileStatusResponse {
    pub profile_id: String,
    pub username: Option<String>,
    pub role: Role,
    pub expiration_date: Option<Timestamp>,
    pub requested_vip: bool,
    pub status: VipStatus,
    pub has_vip_access: bool,
}

impl From<VipStatusView> for ProfileStatusResponse {
    fn from(view: VipStatusView) -> Self {
        Self {
            profile_id: view.profile_id.to_string(),
            username: view.username,
            role: view.role,
            expiration_date: view.expiration_date,
            requested_vip: view.requested_vip,
            has_vip_access: view.status.has_vip_access(),
            status: view.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendMembershipResponse {
    pub profile_id: String,
    pub expiration_date: Timestamp,
    pub status: VipStatus,
}

impl From<ExtendMembershipResult> for ExtendMembershipResponse {
    fn from(result: ExtendMembershipResult) -> Self {
        Self {
            profile_id: result.profile_id.to_string(),
            expiration_date: result.expiration_date,
            status: result.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeMembershipResponse {
    pub profile_id: String,
    pub previous_role: Role,
    pub changed: bool,
}

impl From<RevokeMembershipResult> for RevokeMembershipResponse {
    fn from(result: RevokeMembershipResult) -> Self {
        Self {
            profile_id: result.profile_id.to_string(),
            previous_role: result.previous_role,
            changed: result.changed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRoleResponse {
    pub profile_id: String,
    pub role: Role,
    pub expiration_date: Option<Timestamp>,
}

impl From<SetRoleResult> for SetRoleResponse {
    fn from(result: SetRoleResult) -> Self {
        Self {
            profile_id: result.profile_id.to_string(),
            role: result.role,
            expiration_date: result.expiration_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveVipRequestResponse {
    pub profile_id: String,
    pub expiration_date: Option<Timestamp>,
    pub status: VipStatus,
}

impl From<ApproveVipRequestResult> for ApproveVipRequestResponse {
    fn from(result: ApproveVipRequestResult) -> Self {
        Self {
            profile_id: result.profile_id.to_string(),
            expiration_date: result.expiration_date,
            status: result.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestVipResponse {
    pub profile_id: String,
    pub requested_vip: bool,
    pub already_requested: bool,
}

impl From<RequestVipResult> for RequestVipResponse {
    fn from(result: RequestVipResult) -> Self {
        Self {
            profile_id: result.profile_id.to_string(),
            requested_vip: true,
            already_requested: result.already_requested,
        }
    }
}

/// Pending request entry for the admin console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipRequestEntry {
    pub profile_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl From<Profile> for VipRequestEntry {
    fn from(profile: Profile) -> Self {
        Self {
            profile_id: profile.id.to_string(),
            username: profile.username,
            email: profile.email,
            role: profile.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipRequestsResponse {
    pub requests: Vec<VipRequestEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipMembersResponse {
    pub members: Vec<ProfileStatusResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResponse {
    pub downgraded_count: usize,
    pub failures: Vec<String>,
}

impl From<SweepReport> for SweepResponse {
    fn from(report: SweepReport) -> Self {
        Self {
            downgraded_count: report.downgraded_count,
            failures: report.failures.into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::parse_rfc3339("2025-01-10T00:00:00Z").unwrap()
    }

    #[test]
    fn approve_request_accepts_empty_body() {
        let request: ApproveVipRequestRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.period_days, None);
    }

    #[test]
    fn extend_request_rejects_non_numeric_period() {
        assert!(serde_json::from_str::<ExtendMembershipRequest>(r#"{"period_days":"30"}"#).is_err());
        assert!(serde_json::from_str::<ExtendMembershipRequest>("{}").is_err());
    }

    #[test]
    fn set_role_request_parses_rfc3339_expiration() {
        let request: SetRoleRequest = serde_json::from_str(
            r#"{"role":"vip","expiration_date":"2025-02-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(request.role, "vip");
        assert!(request.expiration_date.is_some());
    }

    #[test]
    fn status_response_flags_access() {
        let view = VipStatusView {
            profile_id: ProfileId::new("fan").unwrap(),
            username: None,
            role: Role::Vip,
            expiration_date: Some(now()),
            requested_vip: false,
            status: VipStatus::ExpiringSoon { days_remaining: 0 },
        };

        let response = ProfileStatusResponse::from(view);
        let json = serde_json::to_value(&response).unwrap();

        assert!(response.has_vip_access);
        assert_eq!(json["status"]["state"], "expiring_soon");
        assert_eq!(json["role"], "vip");
    }

    #[test]
    fn sweep_response_lists_failed_ids() {
        let mut report = SweepReport::new();
        report.record_success();
        report.record_failure(ProfileId::new("broken").unwrap());

        let response = SweepResponse::from(report);

        assert_eq!(response.downgraded_count, 1);
        assert_eq!(response.failures, vec!["broken".to_string()]);
    }

    #[test]
    fn error_response_serializes_without_details_when_none() {
        let json = serde_json::to_string(&ErrorResponse::new("PROFILE_NOT_FOUND", "Not found"))
            .unwrap();
        assert!(!json.contains("details"));
    }
}
