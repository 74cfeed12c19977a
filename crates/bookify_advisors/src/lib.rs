// --- File: crates/bookify_advisors/src/lib.rs ---
// Declare modules within this crate
pub mod error;
pub mod handlers;
pub mod routes;
pub mod slug;
pub mod store;
