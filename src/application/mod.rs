//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;
pub mod sweep_scheduler;

pub use handlers::membership::{
    // Commands
    ApproveVipRequestCommand, ApproveVipRequestHandler, ApproveVipRequestResult,
    EnsureProfileCommand, EnsureProfileHandler, EnsureProfileResult,
    ExtendMembershipCommand, ExtendMembershipHandler, ExtendMembershipResult,
    RequestVipCommand, RequestVipHandler, RequestVipResult,
    RevokeMembershipCommand, RevokeMembershipHandler, RevokeMembershipResult,
    SetRoleCommand, SetRoleHandler, SetRoleResult,
    SweepExpiredCommand, SweepExpiredHandler,
    // Queries
    GetVipStatusHandler, GetVipStatusQuery, VipStatusView,
    ListVipMembersHandler, ListVipMembersQuery,
    ListVipRequestsHandler, ListVipRequestsQuery,
};

pub use sweep_scheduler::spawn_sweep_scheduler;
