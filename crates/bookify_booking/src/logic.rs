// --- File: crates/bookify_booking/src/logic.rs ---
//! Slot generation.
//!
//! Pure calendar arithmetic: given busy intervals, working hours and a
//! meeting duration, enumerate the bookable windows over a date range.
//! Everything here is deterministic in its inputs, including `now`; the
//! caller re-runs it per request instead of caching, because both `now`
//! and the busy data go stale immediately.

use bookify_common::models::WorkingHours;
use chrono::{DateTime, Datelike, Duration, Locale, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

/// Days on which no slots are offered: the local weekend.
pub const DEFAULT_EXCLUDED_WEEKDAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];

/// Locale used for the human-readable slot label.
pub const DEFAULT_LOCALE: Locale = Locale::he_IL;

/// A half-open time interval `[start, end)` occupied on one of the
/// advisor's calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Half-open overlap test. Touching intervals do not overlap. This is
    /// the only conflict predicate in the system; slot generation and
    /// booking validation must agree on it.
    pub fn overlaps(&self, other: &BusyInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A bookable window offered to clients.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub display: String,
}

fn local_hour(tz: Tz, date: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    tz.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Renders a slot as `"<localized date> | <HH:MM> - <HH:MM>"` in the
/// given zone.
pub fn format_slot_display(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: Tz,
    locale: Locale,
) -> String {
    let local_start = start.with_timezone(&tz);
    let local_end = end.with_timezone(&tz);
    format!(
        "{} | {} - {}",
        local_start.format_localized("%A, %-d %B %Y", locale),
        local_start.format("%H:%M"),
        local_end.format("%H:%M"),
    )
}

/// Enumerates candidate slots between `range_start` and `range_end`.
///
/// Days are walked in the advisor's zone. If the first day's working
/// window has already opened by `now`, enumeration starts on the next
/// calendar day. Excluded weekdays yield nothing. Within a day, windows of
/// `duration_minutes` step from `working_hours.start` and stop before the
/// first window that would cross `working_hours.end`; no partial slots. A
/// window qualifies if it starts strictly after `now` and overlaps no busy
/// interval.
#[allow(clippy::too_many_arguments)]
pub fn generate_available_slots(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    busy: &[BusyInterval],
    duration_minutes: i64,
    working_hours: &WorkingHours,
    excluded_weekdays: &[Weekday],
    now: DateTime<Utc>,
    tz: Tz,
    locale: Locale,
) -> Vec<CandidateSlot> {
    let duration = Duration::minutes(duration_minutes);
    let mut slots = Vec::new();
    if duration <= Duration::zero() {
        return slots;
    }

    let mut day = range_start.with_timezone(&tz).date_naive();
    let end_date = range_end.with_timezone(&tz).date_naive();

    // The first day is only offered whole: once its working window has
    // opened, move on to the next day.
    if let Some(first_open) = local_hour(tz, day, working_hours.start) {
        if now > first_open {
            match day.succ_opt() {
                Some(next) => day = next,
                None => return slots,
            }
        }
    }

    debug!(
        "Generating slots {} - {}, duration {} min",
        range_start, range_end, duration_minutes
    );

    // A day counts as in range while its working-start instant precedes
    // `range_end`; on the last day the whole working window is offered.
    while day <= end_date {
        if !excluded_weekdays.contains(&day.weekday()) {
            if let (Some(day_start), Some(day_end)) = (
                local_hour(tz, day, working_hours.start),
                local_hour(tz, day, working_hours.end),
            ) {
                if day_start >= range_end {
                    break;
                }
                let mut window_start = day_start;
                loop {
                    let window_end = window_start + duration;
                    if window_end > day_end {
                        break;
                    }
                    let window = BusyInterval {
                        start: window_start,
                        end: window_end,
                    };
                    if window_start > now && !busy.iter().any(|b| b.overlaps(&window)) {
                        slots.push(CandidateSlot {
                            start: window_start,
                            end: window_end,
                            display: format_slot_display(window_start, window_end, tz, locale),
                        });
                    }
                    window_start = window_end;
                }
            }
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    slots
}
