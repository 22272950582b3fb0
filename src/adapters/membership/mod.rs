//! Membership adapters - implementations of membership-related ports.
//!
//! - `ProfileRoleAuthorizer` - Admin check against the caller's stored role

mod role_authorizer;

pub use role_authorizer::ProfileRoleAuthorizer;
