//! Membership handlers.
//!
//! Command and query handlers for the VIP lifecycle:
//!
//! ## Commands
//! - Extending and revoking memberships
//! - Sweeping expired memberships
//! - Self-service VIP requests and admin approval
//! - Admin role edits
//! - First-login profile creation
//!
//! ## Queries
//! - VIP status of a profile
//! - Pending requests and the VIP roster (admin)
//!
//! Handlers enforce no authorization; the HTTP layer gates admin-only
//! operations before a handler is built.

mod approve_vip_request;
mod ensure_profile;
mod extend_membership;
mod get_vip_status;
mod list_vip_members;
mod list_vip_requests;
mod request_vip;
mod revoke_membership;
mod set_role;
mod sweep_expired;

#[cfg(test)]
pub(crate) mod test_support;

// Commands
pub use approve_vip_request::{
    ApproveVipRequestCommand, ApproveVipRequestHandler, ApproveVipRequestResult,
};
pub use ensure_profile::{EnsureProfileCommand, EnsureProfileHandler, EnsureProfileResult};
pub use extend_membership::{
    ExtendMembershipCommand, ExtendMembershipHandler, ExtendMembershipResult,
};
pub use request_vip::{RequestVipCommand, RequestVipHandler, RequestVipResult};
pub use revoke_membership::{
    RevokeMembershipCommand, RevokeMembershipHandler, RevokeMembershipResult,
};
pub use set_role::{SetRoleCommand, SetRoleHandler, SetRoleResult};
pub use sweep_expired::{SweepExpiredCommand, SweepExpiredHandler};

// Queries
pub use get_vip_status::{GetVipStatusHandler, GetVipStatusQuery, VipStatusView};
pub use list_vip_members::{ListVipMembersHandler, ListVipMembersQuery};
pub use list_vip_requests::{ListVipRequestsHandler, ListVipRequestsQuery};
