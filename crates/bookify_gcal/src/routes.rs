// --- File: crates/bookify_gcal/src/routes.rs ---
//! Route tables for the OAuth flow and the calendar listing API.

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    auth_callback_handler, auth_start_handler, list_advisor_calendars_handler, GcalState,
};

/// Browser-facing OAuth routes, mounted at the application root so the
/// registered redirect URI stays short.
pub fn auth_routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/auth/start/{advisor_id}", get(auth_start_handler))
        .route("/auth/callback", get(auth_callback_handler))
        .with_state(state)
}

/// JSON API routes, mounted under the shared `/api` prefix.
pub fn api_routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route(
            "/advisor/{advisor_id}/calendars",
            get(list_advisor_calendars_handler),
        )
        .with_state(state)
}
