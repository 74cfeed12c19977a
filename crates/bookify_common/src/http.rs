// --- File: crates/bookify_common/src/http.rs ---
//! Shared HTTP client utilities.

pub mod client;

pub use client::HTTP_CLIENT;
