// --- File: crates/bookify_gcal/src/handlers.rs ---
//! OAuth connect flow and calendar listing handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Redirect},
};
use bookify_common::models::CalendarRef;
use bookify_common::services::{AdvisorStore, BoxedError, CalendarConnector};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::oauth::OAuthClient;

// Shared state for the OAuth and calendar routes.
pub struct GcalState {
    pub oauth: OAuthClient,
    pub connector: Arc<dyn CalendarConnector<Error = BoxedError>>,
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

/// Handler that starts the Google consent flow for one advisor.
#[axum::debug_handler]
pub async fn auth_start_handler(
    State(state): State<Arc<GcalState>>,
    Path(advisor_id): Path<String>,
) -> Result<Redirect, ApiError> {
    if state
        .store
        .get(&advisor_id)
        .await
        .map_err(store_error)?
        .is_none()
    {
        return Err(api_error(StatusCode::NOT_FOUND, "Advisor not found"));
    }

    let url = state.oauth.auth_url(&advisor_id).map_err(|err| {
        error!("Cannot start OAuth flow: {}", err);
        api_error(
            StatusCode::BAD_REQUEST,
            "Google OAuth is not configured on this server",
        )
    })?;
    Ok(Redirect::temporary(&url))
}

#[derive(Deserialize, Debug)]
pub struct AuthCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    /// Advisor id, round-tripped through the consent screen.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Handler for the OAuth redirect. Exchanges the code, records the
/// connected account's email on the advisor, and sends the browser back to
/// the setup page. Every failure path is a redirect; the user is mid-flow
/// in a browser, not an API client.
#[axum::debug_handler]
pub async fn auth_callback_handler(
    State(state): State<Arc<GcalState>>,
    Query(query): Query<AuthCallbackQuery>,
) -> Redirect {
    let advisor_id = match query.state {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Redirect::temporary(&format!(
                "{}/admin.html?auth=error&message=invalid_advisor",
                state.base_url
            ))
        }
    };

    let setup_redirect = |outcome: &str| {
        Redirect::temporary(&format!(
            "{}/setup/{}?auth={}",
            state.base_url, advisor_id, outcome
        ))
    };

    if let Some(err) = query.error {
        error!("Google consent denied for '{}': {}", advisor_id, err);
        return setup_redirect("error");
    }
    let code = match query.code {
        Some(code) => code,
        None => return setup_redirect("error"),
    };

    let mut advisor = match state.store.get(&advisor_id).await {
        Ok(Some(advisor)) => advisor,
        Ok(None) => {
            return Redirect::temporary(&format!(
                "{}/admin.html?auth=error&message=invalid_advisor",
                state.base_url
            ))
        }
        Err(err) => {
            error!("Advisor store error during OAuth callback: {}", err);
            return setup_redirect("error");
        }
    };

    let tokens = match state.oauth.exchange_code(&code).await {
        Ok(tokens) => tokens,
        Err(err) => {
            error!("OAuth code exchange failed for '{}': {}", advisor_id, err);
            return setup_redirect("error");
        }
    };

    match state.oauth.fetch_user_email(&tokens.access_token).await {
        Ok(email) => advisor.email = Some(email),
        Err(err) => error!("Could not read connected account email: {}", err),
    }
    advisor.tokens = Some(tokens);

    if let Err(err) = state.store.put(advisor).await {
        error!("Could not persist tokens for '{}': {}", advisor_id, err);
        return setup_redirect("error");
    }

    info!("Advisor '{}' connected their Google account", advisor_id);
    setup_redirect("success")
}

/// Handler listing the calendars visible to a connected advisor.
#[axum::debug_handler]
pub async fn list_advisor_calendars_handler(
    State(state): State<Arc<GcalState>>,
    Path(advisor_id): Path<String>,
) -> Result<Json<Vec<CalendarRef>>, ApiError> {
    let advisor = state
        .store
        .get(&advisor_id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Advisor not found"))?;

    let tokens = advisor.tokens.ok_or_else(|| {
        api_error(
            StatusCode::UNAUTHORIZED,
            "Advisor has not connected a Google account",
        )
    })?;

    let calendars = state.connector.list_calendars(&tokens).await.map_err(|err| {
        error!("Calendar list failed for '{}': {}", advisor_id, err);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not fetch calendars from Google",
        )
    })?;
    Ok(Json(calendars))
}
