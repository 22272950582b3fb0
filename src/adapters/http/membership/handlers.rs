//! HTTP handlers for membership endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::{AuthRejection, RequireAuth};
use crate::application::handlers::membership::{
    ApproveVipRequestCommand, ApproveVipRequestHandler, EnsureProfileCommand,
    EnsureProfileHandler, ExtendMembershipCommand, ExtendMembershipHandler, GetVipStatusHandler,
    GetVipStatusQuery, ListVipMembersHandler, ListVipMembersQuery, ListVipRequestsHandler,
    ListVipRequestsQuery, RequestVipCommand, RequestVipHandler, RevokeMembershipCommand,
    RevokeMembershipHandler, SetRoleCommand, SetRoleHandler, SweepExpiredCommand,
    SweepExpiredHandler, VipStatusView,
};
use crate::domain::foundation::{AuthenticatedUser, ProfileId};
use crate::domain::membership::MembershipError;
use crate::ports::{AdminAuthorizer, Clock, ProfileStore};

use super::dto::{
    ApproveVipRequestRequest, ApproveVipRequestResponse, ErrorResponse, ExtendMembershipRequest,
    ExtendMembershipResponse, ProfileStatusResponse, RequestVipResponse,
    RevokeMembershipResponse, SetRoleRequest, SetRoleResponse, SweepResponse,
    VipMembersResponse, VipRequestEntry, VipRequestsResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct MembershipAppState {
    pub profile_store: Arc<dyn ProfileStore>,
    pub clock: Arc<dyn Clock>,
    pub admin_authorizer: Arc<dyn AdminAuthorizer>,
}

impl MembershipAppState {
    pub fn get_vip_status_handler(&self) -> GetVipStatusHandler {
        GetVipStatusHandler::new(self.profile_store.clone(), self.clock.clone())
    }

    pub fn extend_membership_handler(&self) -> ExtendMembershipHandler {
        ExtendMembershipHandler::new(self.profile_store.clone(), self.clock.clone())
    }

    pub fn revoke_membership_handler(&self) -> RevokeMembershipHandler {
        RevokeMembershipHandler::new(self.profile_store.clone())
    }

    pub fn set_role_handler(&self) -> SetRoleHandler {
        SetRoleHandler::new(self.profile_store.clone())
    }

    pub fn approve_vip_request_handler(&self) -> ApproveVipRequestHandler {
        ApproveVipRequestHandler::new(self.profile_store.clone(), self.clock.clone())
    }

    pub fn request_vip_handler(&self) -> RequestVipHandler {
        RequestVipHandler::new(self.profile_store.clone())
    }

    pub fn list_vip_requests_handler(&self) -> ListVipRequestsHandler {
        ListVipRequestsHandler::new(self.profile_store.clone())
    }

    pub fn list_vip_members_handler(&self) -> ListVipMembersHandler {
        ListVipMembersHandler::new(self.profile_store.clone(), self.clock.clone())
    }

    pub fn sweep_expired_handler(&self) -> SweepExpiredHandler {
        SweepExpiredHandler::new(self.profile_store.clone(), self.clock.clone())
    }

    pub fn ensure_profile_handler(&self) -> EnsureProfileHandler {
        EnsureProfileHandler::new(self.profile_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Gate
// ════════════════════════════════════════════════════════════════════════════════

/// Extractor that admits only callers holding the admin role.
///
/// Runs before the route handler, so a rejected caller never reaches a
/// store mutation. Missing authentication is 401; a non-admin is 403; an
/// authorizer failure is 503 and never an implicit grant.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<MembershipAppState> for RequireAdmin {
    type Rejection = Response;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        state: &'life1 MembershipAppState,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| AuthRejection::Unauthenticated.into_response())?;

            match state.admin_authorizer.is_admin(&user.id).await {
                Ok(true) => Ok(RequireAdmin(user)),
                Ok(false) => {
                    tracing::warn!(caller = %user.id, "Non-admin caller rejected");
                    Err(MembershipApiError(MembershipError::unauthorized()).into_response())
                }
                Err(e) => {
                    tracing::error!(caller = %user.id, error = %e, "Admin check failed");
                    Err(MembershipApiError(MembershipError::store_unavailable(e.message))
                        .into_response())
                }
            }
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Self-Service Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/membership/me - Current user's VIP status, creating the profile on first sight
pub async fn get_my_status(
    State(state): State<MembershipAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, MembershipApiError> {
    let ensured = state
        .ensure_profile_handler()
        .handle(EnsureProfileCommand {
            username: user.suggested_username(),
            email: user.email.clone(),
            profile_id: user.id,
        })
        .await?;

    let view = VipStatusView::from_profile(&ensured.profile, state.clock.now());
    Ok(Json(ProfileStatusResponse::from(view)))
}

/// POST /api/membership/me/request - Flag a pending VIP request
pub async fn request_vip(
    State(state): State<MembershipAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, MembershipApiError> {
    let result = state
        .request_vip_handler()
        .handle(RequestVipCommand {
            profile_id: user.id,
        })
        .await?;

    Ok((StatusCode::ACCEPTED, Json(RequestVipResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/membership/profiles/:id/status
pub async fn get_profile_status(
    State(state): State<MembershipAppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let view = state
        .get_vip_status_handler()
        .handle(GetVipStatusQuery {
            profile_id: parse_profile_id(id)?,
        })
        .await?;

    Ok(Json(ProfileStatusResponse::from(view)))
}

/// POST /api/membership/profiles/:id/extend
pub async fn extend_membership(
    State(state): State<MembershipAppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    payload: Result<Json<ExtendMembershipRequest>, JsonRejection>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let Json(request) = payload.map_err(body_rejection)?;
    let profile_id = parse_profile_id(id)?;
    tracing::info!(admin = %admin.id, profile_id = %profile_id, "Admin extending membership");

    let result = state
        .extend_membership_handler()
        .handle(ExtendMembershipCommand {
            profile_id,
            period_days: request.period_days,
        })
        .await?;

    Ok(Json(ExtendMembershipResponse::from(result)))
}

/// POST /api/membership/profiles/:id/revoke
pub async fn revoke_membership(
    State(state): State<MembershipAppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let profile_id = parse_profile_id(id)?;
    tracing::info!(admin = %admin.id, profile_id = %profile_id, "Admin revoking membership");

    let result = state
        .revoke_membership_handler()
        .handle(RevokeMembershipCommand { profile_id })
        .await?;

    Ok(Json(RevokeMembershipResponse::from(result)))
}

/// PUT /api/membership/profiles/:id/role
pub async fn set_role(
    State(state): State<MembershipAppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    payload: Result<Json<SetRoleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let Json(request) = payload.map_err(body_rejection)?;
    let profile_id = parse_profile_id(id)?;
    tracing::info!(admin = %admin.id, profile_id = %profile_id, role = %request.role, "Admin setting role");

    let result = state
        .set_role_handler()
        .handle(SetRoleCommand {
            profile_id,
            role: request.role,
            expiration_date: request.expiration_date,
        })
        .await?;

    Ok(Json(SetRoleResponse::from(result)))
}

/// POST /api/membership/profiles/:id/approve
pub async fn approve_vip_request(
    State(state): State<MembershipAppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    payload: Result<Json<ApproveVipRequestRequest>, JsonRejection>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        // A bodiless approval grants a non-expiring membership.
        Err(JsonRejection::MissingJsonContentType(_)) => ApproveVipRequestRequest::default(),
        Err(rejection) => return Err(body_rejection(rejection)),
    };
    let profile_id = parse_profile_id(id)?;
    tracing::info!(admin = %admin.id, profile_id = %profile_id, "Admin approving VIP request");

    let result = state
        .approve_vip_request_handler()
        .handle(ApproveVipRequestCommand {
            profile_id,
            period_days: request.period_days,
        })
        .await?;

    Ok(Json(ApproveVipRequestResponse::from(result)))
}

/// GET /api/membership/requests
pub async fn list_vip_requests(
    State(state): State<MembershipAppState>,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, MembershipApiError> {
    let requests = state
        .list_vip_requests_handler()
        .handle(ListVipRequestsQuery)
        .await?;

    Ok(Json(VipRequestsResponse {
        requests: requests.into_iter().map(VipRequestEntry::from).collect(),
    }))
}

/// GET /api/membership/vips
pub async fn list_vip_members(
    State(state): State<MembershipAppState>,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, MembershipApiError> {
    let members = state
        .list_vip_members_handler()
        .handle(ListVipMembersQuery)
        .await?;

    Ok(Json(VipMembersResponse {
        members: members.into_iter().map(ProfileStatusResponse::from).collect(),
    }))
}

/// POST /api/membership/sweep
pub async fn sweep_expired(
    State(state): State<MembershipAppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse, MembershipApiError> {
    tracing::info!(admin = %admin.id, "Admin triggered expiration sweep");

    let report = state
        .sweep_expired_handler()
        .handle(SweepExpiredCommand)
        .await?;

    Ok(Json(SweepResponse::from(report)))
}

fn parse_profile_id(raw: String) -> Result<ProfileId, MembershipError> {
    ProfileId::new(raw).map_err(MembershipError::from)
}

fn body_rejection(rejection: JsonRejection) -> MembershipApiError {
    MembershipApiError(MembershipError::validation("body", rejection.body_text()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for proper HTTP response conversion.
#[derive(Debug)]
pub struct MembershipApiError(pub MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        MembershipApiError(err)
    }
}

impl From<crate::domain::foundation::DomainError> for MembershipApiError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        MembershipApiError(MembershipError::from(err))
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err {
            MembershipError::NotFound(_) => StatusCode::NOT_FOUND,
            MembershipError::StoreUnavailable(msg) => {
                tracing::error!("Profile store unavailable: {}", msg);
                StatusCode::SERVICE_UNAVAILABLE
            }
            MembershipError::Unauthorized => StatusCode::FORBIDDEN,
            MembershipError::InvalidRole(_) => StatusCode::BAD_REQUEST,
            MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        };

        let code = err.code().to_string();
        let body = match &err {
            MembershipError::NotFound(id) => ErrorResponse::with_details(
                code,
                err.message(),
                serde_json::json!({ "profile_id": id.as_str() }),
            ),
            MembershipError::ValidationFailed { field, .. } => ErrorResponse::with_details(
                code,
                err.message(),
                serde_json::json!({ "field": field }),
            ),
            _ => ErrorResponse::new(code, err.message()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: MembershipError) -> StatusCode {
        MembershipApiError(err).into_response().status()
    }

    #[test]
    fn errors_map_to_documented_statuses() {
        assert_eq!(
            status_of(MembershipError::not_found(ProfileId::new("x").unwrap())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(MembershipError::store_unavailable("down")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(MembershipError::unauthorized()), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(MembershipError::invalid_role("root")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MembershipError::validation("period_days", "must be positive")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn empty_path_id_is_a_validation_error() {
        assert!(matches!(
            parse_profile_id("  ".to_string()),
            Err(MembershipError::ValidationFailed { .. })
        ));
    }
}
