// --- File: crates/bookify_booking/src/service.rs ---
//! Availability and booking orchestration.
//!
//! `BookingService` owns the client-facing flow: look up the advisor,
//! fetch fresh busy data, run the slot generator, and commit bookings to
//! the advisor's calendar. The calendar provider, webhook sink and advisor
//! store are injected as trait objects.

use bookify_common::services::{
    AdvisorStore, BoxedError, CalendarConnector, EventSpec, NotificationSink,
};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::BookingError;
use crate::logic::{
    generate_available_slots, BusyInterval, CandidateSlot, DEFAULT_EXCLUDED_WEEKDAYS,
    DEFAULT_LOCALE,
};

/// Bookings are offered this many days out from the moment of the query.
const AVAILABILITY_HORIZON_DAYS: i64 = 14;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorSummary {
    pub name: String,
    pub meeting_duration: i64,
}

#[derive(Serialize, Debug)]
pub struct AvailabilityResponse {
    pub advisor: AdvisorSummary,
    pub slots: Vec<CandidateSlot>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SlotSelection {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BookingRequest {
    #[serde(default)]
    pub slot: Option<SlotSelection>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    pub message: String,
    pub event_link: Option<String>,
}

pub struct BookingService {
    store: Arc<dyn AdvisorStore<Error = BoxedError>>,
    connector: Arc<dyn CalendarConnector<Error = BoxedError>>,
    webhook: Option<Arc<dyn NotificationSink<Error = BoxedError>>>,
    time_zone: Tz,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn AdvisorStore<Error = BoxedError>>,
        connector: Arc<dyn CalendarConnector<Error = BoxedError>>,
        webhook: Option<Arc<dyn NotificationSink<Error = BoxedError>>>,
        time_zone: Tz,
    ) -> Self {
        Self {
            store,
            connector,
            webhook,
            time_zone,
        }
    }

    /// Fresh availability for an advisor over the next two weeks.
    pub async fn availability(
        &self,
        advisor_id: &str,
    ) -> Result<AvailabilityResponse, BookingError> {
        self.availability_at(advisor_id, Utc::now()).await
    }

    /// Availability relative to an explicit `now`. Slots are recomputed
    /// from a fresh free/busy query on every call; nothing is cached.
    pub async fn availability_at(
        &self,
        advisor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AvailabilityResponse, BookingError> {
        let advisor = self
            .store
            .get(advisor_id)
            .await
            .map_err(BookingError::Store)?
            .ok_or(BookingError::NotFound)?;
        let tokens = advisor.tokens.as_ref().ok_or(BookingError::NotConnected)?;
        if advisor.calendars.is_empty() {
            return Err(BookingError::NoCalendarsSelected);
        }

        let range_end = now + Duration::days(AVAILABILITY_HORIZON_DAYS);
        let calendar_ids: Vec<String> =
            advisor.calendars.iter().map(|c| c.id.clone()).collect();
        let free_busy = self
            .connector
            .query_free_busy(tokens, &calendar_ids, now, range_end)
            .await
            .map_err(BookingError::AvailabilityFetchFailed)?;

        // One flat list across all selected calendars; the overlap test is
        // pairwise, order does not matter.
        let busy: Vec<BusyInterval> = free_busy
            .into_values()
            .flatten()
            .map(|(start, end)| BusyInterval { start, end })
            .collect();

        let slots = generate_available_slots(
            now,
            range_end,
            &busy,
            advisor.meeting_duration,
            &advisor.working_hours,
            &DEFAULT_EXCLUDED_WEEKDAYS,
            now,
            self.time_zone,
            DEFAULT_LOCALE,
        );

        Ok(AvailabilityResponse {
            advisor: AdvisorSummary {
                name: advisor.name,
                meeting_duration: advisor.meeting_duration,
            },
            slots,
        })
    }

    /// Commits a booking: creates the calendar event, then notifies the
    /// webhook if one is configured.
    ///
    /// The requested slot is not re-checked against fresh busy data before
    /// the event is written, and the calendar itself accepts overlapping
    /// events; two clients racing for the same window can both succeed.
    pub async fn book(
        &self,
        advisor_id: &str,
        request: BookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        let advisor = self
            .store
            .get(advisor_id)
            .await
            .map_err(BookingError::Store)?
            .ok_or(BookingError::NotFound)?;
        let tokens = advisor.tokens.as_ref().ok_or(BookingError::NotConnected)?;

        let start = request
            .slot
            .as_ref()
            .and_then(|s| s.start)
            .ok_or(BookingError::Validation("slot.start"))?;
        let end = request
            .slot
            .as_ref()
            .and_then(|s| s.end)
            .ok_or(BookingError::Validation("slot.end"))?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(BookingError::Validation("name"));
        }
        let email = request.email.trim();
        if email.is_empty() {
            return Err(BookingError::Validation("email"));
        }

        let phone = request
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("not provided");
        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("none");

        // First selected calendar, or the account default when the advisor
        // connected without picking any.
        let calendar_id = advisor
            .calendars
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_else(|| "primary".to_string());

        let event = EventSpec {
            summary: format!("Meeting with {}", name),
            description: Some(format!(
                "Name: {}\nEmail: {}\nPhone: {}\nNotes: {}",
                name, email, phone, notes
            )),
            start,
            end,
            time_zone: self.time_zone.name().to_string(),
            attendee_email: Some(email.to_string()),
        };

        let created = self
            .connector
            .create_event(tokens, &calendar_id, event)
            .await
            .map_err(BookingError::BookingCommitFailed)?;
        info!(
            "Booked {} - {} with advisor '{}'",
            start, end, advisor.id
        );

        // The event is already committed; a failed notification is logged
        // and never surfaced to the client.
        if let Some(webhook) = &self.webhook {
            let payload = json!({
                "event": "booking_created",
                "advisor": {
                    "id": advisor.id,
                    "name": advisor.name,
                    "email": advisor.email,
                },
                "event_id": created.event_id,
                "event_link": created.html_link,
                "slot": { "start": start, "end": end },
                "attendee": {
                    "name": name,
                    "email": email,
                    "phone": request.phone,
                    "notes": request.notes,
                },
                "created_at": Utc::now(),
            });
            if let Err(err) = webhook.post(payload).await {
                error!("Webhook delivery failed after booking: {}", err);
            }
        }

        Ok(BookingConfirmation {
            success: true,
            message: "Booking confirmed".to_string(),
            event_link: created.html_link,
        })
    }
}
