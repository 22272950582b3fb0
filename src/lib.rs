//! VIP Lifecycle - membership tier management for a streaming catalog
//!
//! This crate owns the rules for granting, extending, revoking and expiring
//! the VIP tier on user profiles, and exposes them over an admin-gated
//! HTTP API backed by a pluggable profile store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
