//! Axum router configuration for membership endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    approve_vip_request, extend_membership, get_my_status, get_profile_status, list_vip_members,
    list_vip_requests, request_vip, revoke_membership, set_role, sweep_expired,
    MembershipAppState,
};

/// Create the membership API router.
///
/// # Routes
///
/// ## User Endpoints (require authentication)
/// - `GET /me` - Current user's VIP status
/// - `POST /me/request` - Request VIP
///
/// ## Admin Endpoints (require admin role)
/// - `GET /profiles/:id/status` - Classify a profile
/// - `POST /profiles/:id/extend` - Extend membership
/// - `POST /profiles/:id/revoke` - Revoke membership
/// - `PUT /profiles/:id/role` - Set role
/// - `POST /profiles/:id/approve` - Approve a VIP request
/// - `GET /requests` - Pending VIP requests
/// - `GET /vips` - VIP roster
/// - `POST /sweep` - Run the expiration sweep
pub fn membership_routes() -> Router<MembershipAppState> {
    Router::new()
        // User endpoints
        .route("/me", get(get_my_status))
        .route("/me/request", post(request_vip))
        // Admin endpoints
        .route("/profiles/:id/status", get(get_profile_status))
        .route("/profiles/:id/extend", post(extend_membership))
        .route("/profiles/:id/revoke", post(revoke_membership))
        .route("/profiles/:id/role", put(set_role))
        .route("/profiles/:id/approve", post(approve_vip_request))
        .route("/requests", get(list_vip_requests))
        .route("/vips", get(list_vip_members))
        .route("/sweep", post(sweep_expired))
}

/// Membership routes nested under `/membership`, ready to mount at `/api`.
pub fn membership_router() -> Router<MembershipAppState> {
    Router::new().nest("/membership", membership_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::clock::SystemClock;
    use crate::adapters::membership::ProfileRoleAuthorizer;
    use crate::adapters::memory::InMemoryProfileStore;

    fn test_state() -> MembershipAppState {
        let store = Arc::new(InMemoryProfileStore::new());
        MembershipAppState {
            profile_store: store.clone(),
            clock: Arc::new(SystemClock),
            admin_authorizer: Arc::new(ProfileRoleAuthorizer::new(store)),
        }
    }

    #[test]
    fn membership_router_builds_with_state() {
        let _: Router<()> = membership_router().with_state(test_state());
    }
}
