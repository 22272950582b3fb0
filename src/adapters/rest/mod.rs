//! Hosted REST (PostgREST) adapters.

mod profile_store;

pub use profile_store::{RestProfileStore, RestStoreConfig};
