// --- File: crates/bookify_advisors/src/handlers.rs ---
//! Admin and setup handlers for advisor records.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use bookify_common::models::{Advisor, CalendarRef, WorkingHours};
use bookify_common::services::{AdvisorStore, BoxedError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::slug::{derive_advisor_id, synthetic_advisor_id};

// Shared state for the advisor admin routes.
pub struct AdvisorsState {
    pub store: Arc<dyn AdvisorStore<Error = BoxedError>>,
    pub base_url: String,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

fn store_error(err: BoxedError) -> ApiError {
    error!("Advisor store error: {}", err);
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Advisor store unavailable",
    )
}

#[derive(Serialize, Debug)]
pub struct AdvisorSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub is_connected: bool,
    pub meeting_duration: i64,
    pub working_hours: WorkingHours,
}

impl From<Advisor> for AdvisorSummary {
    fn from(advisor: Advisor) -> Self {
        Self {
            id: advisor.id.clone(),
            name: advisor.name,
            email: advisor.email,
            is_connected: advisor.tokens.is_some(),
            meeting_duration: advisor.meeting_duration,
            working_hours: advisor.working_hours,
        }
    }
}

/// Handler to list all advisors.
#[axum::debug_handler]
pub async fn list_advisors_handler(
    State(state): State<Arc<AdvisorsState>>,
) -> Result<Json<Vec<AdvisorSummary>>, ApiError> {
    let mut advisors = state.store.list().await.map_err(store_error)?;
    advisors.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(Json(advisors.into_iter().map(Into::into).collect()))
}

#[derive(Deserialize, Debug)]
pub struct CreateAdvisorRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Debug)]
pub struct CreateAdvisorResponse {
    pub success: bool,
    pub id: String,
    pub setup_link: String,
}

/// Handler to create an advisor with default settings.
///
/// The id is a slug derived from the name; empty names are rejected and a
/// name that normalizes to nothing gets a synthetic time-based id.
#[axum::debug_handler]
pub async fn create_advisor_handler(
    State(state): State<Arc<AdvisorsState>>,
    Json(payload): Json<CreateAdvisorRequest>,
) -> Result<Json<CreateAdvisorResponse>, ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Name is required"));
    }

    let id = derive_advisor_id(&name).unwrap_or_else(|| synthetic_advisor_id(Utc::now()));

    if state.store.get(&id).await.map_err(store_error)?.is_some() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "An advisor with this name already exists",
        ));
    }

    state
        .store
        .put(Advisor::new(id.clone(), name))
        .await
        .map_err(store_error)?;
    info!("Created advisor '{}'", id);

    let setup_link = format!("{}/setup/{}", state.base_url, id);
    Ok(Json(CreateAdvisorResponse {
        success: true,
        id,
        setup_link,
    }))
}

/// Handler to delete an advisor. Booking history lives on the calendar and
/// is not touched.
#[axum::debug_handler]
pub async fn delete_advisor_handler(
    State(state): State<Arc<AdvisorsState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if state.store.delete(&id).await.map_err(store_error)? {
        info!("Deleted advisor '{}'", id);
        Ok(Json(json!({ "success": true })))
    } else {
        Err(api_error(StatusCode::NOT_FOUND, "Advisor not found"))
    }
}

#[derive(Serialize, Debug)]
pub struct AdvisorDetail {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub is_connected: bool,
    pub calendars: Vec<CalendarRef>,
    pub meeting_duration: i64,
    pub working_hours: WorkingHours,
    pub booking_link: String,
}

/// Handler for the setup page: full advisor view plus the booking link.
#[axum::debug_handler]
pub async fn get_advisor_handler(
    State(state): State<Arc<AdvisorsState>>,
    Path(id): Path<String>,
) -> Result<Json<AdvisorDetail>, ApiError> {
    let advisor = state
        .store
        .get(&id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Advisor not found"))?;

    let booking_link = format!("{}/book/{}", state.base_url, advisor.id);
    Ok(Json(AdvisorDetail {
        id: advisor.id.clone(),
        name: advisor.name,
        email: advisor.email,
        is_connected: advisor.tokens.is_some(),
        calendars: advisor.calendars,
        meeting_duration: advisor.meeting_duration,
        working_hours: advisor.working_hours,
        booking_link,
    }))
}

#[derive(Deserialize, Debug)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub calendars: Option<Vec<CalendarRef>>,
    #[serde(default)]
    pub meeting_duration: Option<i64>,
    #[serde(default)]
    pub working_hours: Option<WorkingHours>,
}

/// Handler to update advisor settings. Only the provided fields change.
#[axum::debug_handler]
pub async fn update_settings_handler(
    State(state): State<Arc<AdvisorsState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut advisor = state
        .store
        .get(&id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Advisor not found"))?;

    if let Some(calendars) = payload.calendars {
        advisor.calendars = calendars;
    }
    if let Some(duration) = payload.meeting_duration {
        if duration <= 0 {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "meeting_duration must be positive",
            ));
        }
        advisor.meeting_duration = duration;
    }
    if let Some(hours) = payload.working_hours {
        if hours.start >= hours.end || hours.end > 23 {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "working_hours must satisfy 0 <= start < end <= 23",
            ));
        }
        advisor.working_hours = hours;
    }

    state.store.put(advisor).await.map_err(store_error)?;
    Ok(Json(json!({ "success": true })))
}
