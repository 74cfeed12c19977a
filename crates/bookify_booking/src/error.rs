// --- File: crates/bookify_booking/src/error.rs ---
//! Error taxonomy for availability and booking.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use bookify_common::services::BoxedError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Advisor not found")]
    NotFound,

    #[error("Advisor has not connected a Google account")]
    NotConnected,

    #[error("Advisor has no calendars selected")]
    NoCalendarsSelected,

    #[error("Missing required field: {0}")]
    Validation(&'static str),

    #[error("Could not fetch availability from the calendar provider")]
    AvailabilityFetchFailed(#[source] BoxedError),

    #[error("Could not create the calendar event")]
    BookingCommitFailed(#[source] BoxedError),

    #[error("Advisor store unavailable")]
    Store(#[source] BoxedError),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::NotFound => StatusCode::NOT_FOUND,
            BookingError::NotConnected
            | BookingError::NoCalendarsSelected
            | BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::AvailabilityFetchFailed(source)
            | BookingError::BookingCommitFailed(source)
            | BookingError::Store(source) => {
                error!("Booking backend failure: {}", source);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
