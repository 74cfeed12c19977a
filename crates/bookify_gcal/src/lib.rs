// --- File: crates/bookify_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod error;
pub mod handlers;
pub mod oauth;
pub mod routes;
pub mod service;
