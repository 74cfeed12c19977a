// --- File: crates/bookify_advisors/src/routes.rs ---

use crate::handlers::{
    create_advisor_handler, delete_advisor_handler, get_advisor_handler, list_advisors_handler,
    update_settings_handler, AdvisorsState,
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing the admin/setup routes for advisor records.
pub fn routes(state: Arc<AdvisorsState>) -> Router {
    Router::new()
        .route(
            "/advisors",
            get(list_advisors_handler).post(create_advisor_handler),
        )
        .route("/advisors/{id}", delete(delete_advisor_handler))
        .route("/advisor/{id}", get(get_advisor_handler))
        .route("/advisor/{id}/settings", post(update_settings_handler))
        .with_state(state)
}
