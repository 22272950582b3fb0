//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresProfileStore` - Profile reads and field-level updates

mod profile_store;

pub use profile_store::PostgresProfileStore;
