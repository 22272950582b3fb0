//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory profile store (development, tests)
//! - `postgres` - PostgreSQL profile store
//! - `rest` - Hosted PostgREST profile store
//! - `clock` - System and fixed clocks
//! - `auth` - Session validators (JWT, mock)
//! - `membership` - Admin authorizer
//! - `http` - Axum REST API

pub mod auth;
pub mod clock;
pub mod http;
pub mod membership;
pub mod memory;
pub mod postgres;
pub mod rest;

pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryProfileStore;
pub use postgres::PostgresProfileStore;
pub use rest::{RestProfileStore, RestStoreConfig};
