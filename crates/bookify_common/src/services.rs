// --- File: crates/bookify_common/src/services.rs ---
//! Collaborator traits for external services.
//!
//! The booking core talks to three collaborators: the calendar provider,
//! the webhook notification sink and the advisor store. Each is a trait so
//! the core can be wired with real implementations in the backend and with
//! in-memory mocks in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::models::{Advisor, CalendarRef, OAuthTokens};

/// Type alias for a boxed future that returns a Result.
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for
/// Box<dyn std::error::Error + Send + Sync>, so collaborators can be held
/// as `Arc<dyn Trait<Error = BoxedError>>`.
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A busy period on one of the advisor's calendars, keyed by calendar id.
pub type FreeBusyMap = HashMap<String, Vec<(DateTime<Utc>, DateTime<Utc>)>>;

/// The event the booking committer asks the calendar provider to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSpec {
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA zone name the provider should attach to both endpoints.
    pub time_zone: String,
    /// Attendee to invite (and notify) on the created event.
    pub attendee_email: Option<String>,
}

/// What the calendar provider reports back for a created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub event_id: Option<String>,
    pub html_link: Option<String>,
}

/// A trait for the calendar provider the advisors connect.
///
/// The OAuth tokens are passed per call: each advisor brings their own
/// credentials, the connector itself holds only the app-level client
/// configuration.
pub trait CalendarConnector: Send + Sync {
    /// Error type returned by calendar operations.
    type Error: StdError + Send + Sync + 'static;

    /// List the calendars visible to the connected account.
    fn list_calendars(&self, tokens: &OAuthTokens)
        -> BoxFuture<'_, Vec<CalendarRef>, Self::Error>;

    /// One batched free/busy query over all given calendar ids.
    fn query_free_busy(
        &self,
        tokens: &OAuthTokens,
        calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, FreeBusyMap, Self::Error>;

    /// Create an event, notifying attendees.
    fn create_event(
        &self,
        tokens: &OAuthTokens,
        calendar_id: &str,
        event: EventSpec,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error>;
}

/// A trait for the webhook notification sink.
///
/// Delivery failures are the caller's business to recover from; the sink
/// just reports them.
pub trait NotificationSink: Send + Sync {
    /// Error type returned by delivery attempts.
    type Error: StdError + Send + Sync + 'static;

    /// Post a JSON payload to the configured endpoint.
    fn post(&self, payload: serde_json::Value) -> BoxFuture<'_, (), Self::Error>;
}

/// A trait for the keyed advisor store.
///
/// Plain get/list/put/delete over advisor records; the core never touches
/// the storage medium directly.
pub trait AdvisorStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: StdError + Send + Sync + 'static;

    /// Look up an advisor by id.
    fn get(&self, id: &str) -> BoxFuture<'_, Option<Advisor>, Self::Error>;

    /// All advisors, in unspecified order.
    fn list(&self) -> BoxFuture<'_, Vec<Advisor>, Self::Error>;

    /// Insert or overwrite the record under `advisor.id` (last write wins).
    fn put(&self, advisor: Advisor) -> BoxFuture<'_, (), Self::Error>;

    /// Remove a record. Returns whether it existed.
    fn delete(&self, id: &str) -> BoxFuture<'_, bool, Self::Error>;
}

/// Adapter that erases a connector's concrete error type to [`BoxedError`].
pub struct BoxedCalendarConnector<C>(pub C);

impl<C: CalendarConnector> CalendarConnector for BoxedCalendarConnector<C> {
    type Error = BoxedError;

    fn list_calendars(
        &self,
        tokens: &OAuthTokens,
    ) -> BoxFuture<'_, Vec<CalendarRef>, Self::Error> {
        let fut = self.0.list_calendars(tokens);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn query_free_busy(
        &self,
        tokens: &OAuthTokens,
        calendar_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, FreeBusyMap, Self::Error> {
        let fut = self
            .0
            .query_free_busy(tokens, calendar_ids, range_start, range_end);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn create_event(
        &self,
        tokens: &OAuthTokens,
        calendar_id: &str,
        event: EventSpec,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let fut = self.0.create_event(tokens, calendar_id, event);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}

/// Adapter that erases a sink's concrete error type to [`BoxedError`].
pub struct BoxedNotificationSink<N>(pub N);

impl<N: NotificationSink> NotificationSink for BoxedNotificationSink<N> {
    type Error = BoxedError;

    fn post(&self, payload: serde_json::Value) -> BoxFuture<'_, (), Self::Error> {
        let fut = self.0.post(payload);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}

/// Adapter that erases a store's concrete error type to [`BoxedError`].
pub struct BoxedAdvisorStore<S>(pub S);

impl<S: AdvisorStore> AdvisorStore for BoxedAdvisorStore<S> {
    type Error = BoxedError;

    fn get(&self, id: &str) -> BoxFuture<'_, Option<Advisor>, Self::Error> {
        let fut = self.0.get(id);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn list(&self) -> BoxFuture<'_, Vec<Advisor>, Self::Error> {
        let fut = self.0.list();
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn put(&self, advisor: Advisor) -> BoxFuture<'_, (), Self::Error> {
        let fut = self.0.put(advisor);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let fut = self.0.delete(id);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}
