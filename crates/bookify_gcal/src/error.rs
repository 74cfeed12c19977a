// --- File: crates/bookify_gcal/src/error.rs ---
//! Error types for the Google Calendar connector.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GcalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("OAuth token exchange failed ({status}): {message}")]
    TokenExchange { status: u16, message: String },

    #[error("Google OAuth credentials are not configured")]
    NotConfigured,

    #[error("Access token expired and no refresh token is available")]
    MissingRefreshToken,

    #[error("Unexpected response from Google: {0}")]
    UnexpectedResponse(String),
}
