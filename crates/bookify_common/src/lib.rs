// --- File: crates/bookify_common/src/lib.rs ---
//! Shared building blocks for the Bookify workspace.
//!
//! This crate holds the collaborator traits (calendar, notification sink,
//! advisor store), the shared domain models, logging initialization and the
//! shared HTTP client. Feature crates depend on this crate instead of on
//! each other.

pub mod http;
pub mod logging;
pub mod models;
pub mod services;
