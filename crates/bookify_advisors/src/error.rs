// --- File: crates/bookify_advisors/src/error.rs ---
//! Error types for the advisor store.

use thiserror::Error;

/// Errors that can occur when working with the advisor store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reading or writing the backing file
    #[error("Advisor store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error encoding or decoding the stored records
    #[error("Advisor store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
