//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Membership Ports
//!
//! - `ProfileStore` - Profile persistence (Postgres, PostgREST, in-memory)
//! - `Clock` - Source of "now" for lifecycle decisions
//! - `AdminAuthorizer` - Admin role check for privileged operations
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Bearer token validation

mod admin_authorizer;
mod clock;
mod profile_store;
mod session_validator;

pub use admin_authorizer::AdminAuthorizer;
pub use clock::Clock;
pub use profile_store::{profile_not_found, ProfileStore};
pub use session_validator::SessionValidator;
