//! HTTP adapter for membership endpoints.
//!
//! Exposes the VIP lifecycle via REST API under `/api/membership`:
//! - `GET /me` - Current user's VIP status
//! - `POST /me/request` - Request VIP
//! - `GET /profiles/:id/status` - Classify a profile (admin)
//! - `POST /profiles/:id/extend` - Extend membership (admin)
//! - `POST /profiles/:id/revoke` - Revoke membership (admin)
//! - `PUT /profiles/:id/role` - Set role (admin)
//! - `POST /profiles/:id/approve` - Approve a VIP request (admin)
//! - `GET /requests` - Pending requests (admin)
//! - `GET /vips` - VIP roster (admin)
//! - `POST /sweep` - Expiration sweep (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{MembershipApiError, MembershipAppState, RequireAdmin};
pub use routes::{membership_router, membership_routes};
