// --- File: crates/bookify_common/src/models.rs ---
//! Domain models shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily working-hour bounds for slot generation. Whole hours, 0-23,
/// `start < end` (a degenerate range simply yields no slots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: u32,
    pub end: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self { start: 9, end: 17 }
    }
}

/// A calendar the advisor selected for busy-time merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// OAuth tokens obtained when the advisor connected their Google account.
/// Opaque to everything except the calendar connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl OAuthTokens {
    /// Whether the access token is past (or within a minute of) its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expiry) => now + chrono::Duration::seconds(60) >= expiry,
            None => false,
        }
    }
}

fn default_meeting_duration() -> i64 {
    30
}

/// An advisor record as kept in the advisor store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisor {
    /// Stable slug, unique across the store.
    pub id: String,
    pub name: String,
    /// Filled in after the advisor completes the OAuth flow.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tokens: Option<OAuthTokens>,
    /// Calendars to merge busy time from, in selection order. The first one
    /// receives booked events.
    #[serde(default)]
    pub calendars: Vec<CalendarRef>,
    /// Meeting length in minutes.
    #[serde(default = "default_meeting_duration")]
    pub meeting_duration: i64,
    #[serde(default)]
    pub working_hours: WorkingHours,
}

impl Advisor {
    /// A fresh record with the defaults the admin flow hands out.
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            email: None,
            tokens: None,
            calendars: Vec::new(),
            meeting_duration: default_meeting_duration(),
            working_hours: WorkingHours::default(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.tokens.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn advisor_defaults_match_admin_flow() {
        let advisor = Advisor::new("jane-doe".into(), "Jane Doe".into());
        assert!(!advisor.is_connected());
        assert!(advisor.calendars.is_empty());
        assert_eq!(advisor.meeting_duration, 30);
        assert_eq!(advisor.working_hours, WorkingHours { start: 9, end: 17 });
    }

    #[test]
    fn token_expiry_includes_leeway() {
        let now = Utc::now();
        let tokens = OAuthTokens {
            access_token: "t".into(),
            refresh_token: None,
            expires_at: Some(now + Duration::seconds(30)),
        };
        assert!(tokens.is_expired(now));

        let fresh = OAuthTokens {
            expires_at: Some(now + Duration::hours(1)),
            ..tokens.clone()
        };
        assert!(!fresh.is_expired(now));

        let no_expiry = OAuthTokens {
            expires_at: None,
            ..tokens
        };
        assert!(!no_expiry.is_expired(now));
    }
}
