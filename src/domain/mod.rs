//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `membership` - Profile roles, VIP classification and lifecycle rules

pub mod foundation;
pub mod membership;
