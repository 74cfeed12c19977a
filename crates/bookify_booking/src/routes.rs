// --- File: crates/bookify_booking/src/routes.rs ---
//! Route table for the client booking API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{availability_handler, book_slot_handler, BookingState};

/// Booking routes, mounted under the shared `/api` prefix.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/book/{advisor_id}/availability", get(availability_handler))
        .route("/book/{advisor_id}", post(book_slot_handler))
        .with_state(state)
}
