// --- File: crates/bookify_booking/src/handlers.rs ---
//! Client-facing booking handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use crate::error::BookingError;
use crate::service::{AvailabilityResponse, BookingConfirmation, BookingRequest, BookingService};

// Shared state for the booking routes.
pub struct BookingState {
    pub service: BookingService,
}

/// Handler returning the advisor's open slots for the next two weeks.
#[axum::debug_handler]
pub async fn availability_handler(
    State(state): State<Arc<BookingState>>,
    Path(advisor_id): Path<String>,
) -> Result<Json<AvailabilityResponse>, BookingError> {
    let response = state.service.availability(&advisor_id).await?;
    Ok(Json(response))
}

/// Handler committing a booking for the requested slot.
#[axum::debug_handler]
pub async fn book_slot_handler(
    State(state): State<Arc<BookingState>>,
    Path(advisor_id): Path<String>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>, BookingError> {
    let confirmation = state.service.book(&advisor_id, request).await?;
    Ok(Json(confirmation))
}
