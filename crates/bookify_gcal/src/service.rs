// --- File: crates/bookify_gcal/src/service.rs ---
//! Google Calendar REST connector.
//!
//! Implements [`CalendarConnector`] over the Calendar v3 API: calendar
//! listing, one batched free/busy query, and event creation with attendee
//! notifications. Access tokens are refreshed transparently when a caller
//! hands us an expired one.

use bookify_common::http::HTTP_CLIENT;
use bookify_common::models::{CalendarRef, OAuthTokens};
use bookify_common::services::{
    BoxFuture, CalendarConnector, CreatedEvent, EventSpec, FreeBusyMap,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::GcalError;
use crate::oauth::OAuthClient;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CalendarListEntry {
    id: String,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CalendarListResponse {
    #[serde(default)]
    items: Vec<CalendarListEntry>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FreeBusyPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<FreeBusyPeriod>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: std::collections::HashMap<String, FreeBusyCalendar>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct EventDateTime {
    date_time: String,
    time_zone: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    html_link: Option<String>,
}

/// Calendar provider backed by the Google Calendar v3 REST API.
#[derive(Clone)]
pub struct GoogleCalendarConnector {
    oauth: OAuthClient,
}

impl GoogleCalendarConnector {
    pub fn new(oauth: OAuthClient) -> Self {
        Self { oauth }
    }

    /// A usable access token for this call, refreshing if the stored one
    /// has expired. The refreshed token is used in place; persisting it is
    /// the store owner's concern, a stale record just costs one extra
    /// refresh round-trip later.
    async fn bearer_token(&self, tokens: &OAuthTokens) -> Result<String, GcalError> {
        if tokens.is_expired(Utc::now()) {
            let refreshed = self.oauth.refresh(tokens).await?;
            Ok(refreshed.access_token)
        } else {
            Ok(tokens.access_token.clone())
        }
    }

    async fn api_error(response: reqwest::Response) -> GcalError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        GcalError::Api { status, message }
    }

    async fn list_calendars_impl(&self, tokens: OAuthTokens) -> Result<Vec<CalendarRef>, GcalError> {
        let token = self.bearer_token(&tokens).await?;
        let response = HTTP_CLIENT
            .get(format!("{}/users/me/calendarList", CALENDAR_API_BASE))
            .bearer_auth(token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let list: CalendarListResponse = response.json().await?;
        Ok(list
            .items
            .into_iter()
            .map(|entry| CalendarRef {
                id: entry.id,
                name: entry.summary,
            })
            .collect())
    }

    async fn query_free_busy_impl(
        &self,
        tokens: OAuthTokens,
        calendar_ids: Vec<String>,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<FreeBusyMap, GcalError> {
        let token = self.bearer_token(&tokens).await?;
        let items: Vec<_> = calendar_ids.iter().map(|id| json!({ "id": id })).collect();
        debug!(calendars = calendar_ids.len(), "Querying free/busy");
        let response = HTTP_CLIENT
            .post(format!("{}/freeBusy", CALENDAR_API_BASE))
            .bearer_auth(token)
            .json(&json!({
                "timeMin": rfc3339(range_start),
                "timeMax": rfc3339(range_end),
                "timeZone": "UTC",
                "items": items,
            }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let body: FreeBusyResponse = response.json().await?;
        Ok(body
            .calendars
            .into_iter()
            .map(|(id, calendar)| {
                let periods = calendar
                    .busy
                    .into_iter()
                    .map(|period| (period.start, period.end))
                    .collect();
                (id, periods)
            })
            .collect())
    }

    async fn create_event_impl(
        &self,
        tokens: OAuthTokens,
        calendar_id: String,
        event: EventSpec,
    ) -> Result<CreatedEvent, GcalError> {
        let token = self.bearer_token(&tokens).await?;
        let mut body = json!({
            "summary": event.summary,
            "start": EventDateTime {
                date_time: rfc3339(event.start),
                time_zone: event.time_zone.clone(),
            },
            "end": EventDateTime {
                date_time: rfc3339(event.end),
                time_zone: event.time_zone.clone(),
            },
        });
        if let Some(description) = &event.description {
            body["description"] = json!(description);
        }
        if let Some(email) = &event.attendee_email {
            body["attendees"] = json!([{ "email": email }]);
        }
        let url = format!(
            "{}/calendars/{}/events?sendUpdates=all",
            CALENDAR_API_BASE,
            urlencoding::encode(&calendar_id)
        );
        let response = HTTP_CLIENT
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let inserted: InsertedEvent = response.json().await?;
        Ok(CreatedEvent {
            event_id: inserted.id,
            html_link: inserted.html_link,
        })
    }
}

impl CalendarConnector for GoogleCalendarConnector {
    type Error = GcalError;

    fn list_calendars(
        &self,
        tokens: &OAuthTokens,
    ) -> BoxFuture<'_, Vec<CalendarRef>, Self::Error> {
        let tokens = tokens.clone();
        Box::pin(async move { self.list_calendars_impl(tokens).await })
    }

    fn query_free_busy(
        &self,
        tokens: &OAuthTokens,
        calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, FreeBusyMap, Self::Error> {
        let tokens = tokens.clone();
        let calendar_ids = calendar_ids.to_vec();
        Box::pin(async move {
            self.query_free_busy_impl(tokens, calendar_ids, range_start, range_end)
                .await
        })
    }

    fn create_event(
        &self,
        tokens: &OAuthTokens,
        calendar_id: &str,
        event: EventSpec,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let tokens = tokens.clone();
        let calendar_id = calendar_id.to_string();
        Box::pin(async move { self.create_event_impl(tokens, calendar_id, event).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_formats_without_fractional_seconds() {
        let ts = DateTime::parse_from_rfc3339("2026-09-01T09:30:00.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(rfc3339(ts), "2026-09-01T09:30:00Z");
    }

    #[test]
    fn free_busy_response_deserializes_busy_periods() {
        let raw = r#"{
            "calendars": {
                "primary": {
                    "busy": [
                        {"start": "2026-09-01T10:00:00Z", "end": "2026-09-01T10:30:00Z"}
                    ]
                },
                "team@example.com": {}
            }
        }"#;
        let parsed: FreeBusyResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.calendars["primary"].busy.len(), 1);
        assert!(parsed.calendars["team@example.com"].busy.is_empty());
    }

    #[test]
    fn calendar_list_tolerates_missing_summary() {
        let raw = r#"{"items": [{"id": "primary"}, {"id": "x", "summary": "Work"}]}"#;
        let parsed: CalendarListResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert!(parsed.items[0].summary.is_none());
        assert_eq!(parsed.items[1].summary.as_deref(), Some("Work"));
    }
}
