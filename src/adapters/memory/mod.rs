//! In-memory adapters for development and testing.

mod profile_store;

pub use profile_store::InMemoryProfileStore;
