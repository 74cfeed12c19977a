// --- File: crates/bookify_booking/src/logic_test.rs ---
use crate::logic::{
    format_slot_display, generate_available_slots, BusyInterval, DEFAULT_EXCLUDED_WEEKDAYS,
    DEFAULT_LOCALE,
};
use bookify_common::models::WorkingHours;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

const TZ: Tz = chrono_tz::Asia::Jerusalem;

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    // September 2026; the 1st is a Tuesday, the 4th/5th are Fri/Sat.
    TZ.with_ymd_and_hms(2026, 9, day, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn hours_9_to_17() -> WorkingHours {
    WorkingHours { start: 9, end: 17 }
}

#[test]
fn adjacent_intervals_do_not_overlap() {
    let a = BusyInterval {
        start: at(1, 9, 0),
        end: at(1, 9, 30),
    };
    let b = BusyInterval {
        start: at(1, 9, 30),
        end: at(1, 10, 0),
    };
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn contained_interval_overlaps() {
    let outer = BusyInterval {
        start: at(1, 9, 0),
        end: at(1, 10, 0),
    };
    let inner = BusyInterval {
        start: at(1, 9, 30),
        end: at(1, 9, 45),
    };
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn full_free_day_yields_sixteen_half_hour_slots() {
    let now = at(1, 6, 0);
    let slots = generate_available_slots(
        at(1, 0, 0),
        at(2, 0, 0),
        &[],
        30,
        &hours_9_to_17(),
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0].start, at(1, 9, 0));
    assert_eq!(slots[0].end, at(1, 9, 30));
    assert_eq!(slots[15].start, at(1, 16, 30));
    assert_eq!(slots[15].end, at(1, 17, 0));
}

#[test]
fn busy_interval_removes_exactly_its_slot() {
    let now = at(1, 6, 0);
    let busy = [BusyInterval {
        start: at(1, 10, 0),
        end: at(1, 10, 30),
    }];
    let slots = generate_available_slots(
        at(1, 0, 0),
        at(2, 0, 0),
        &busy,
        30,
        &hours_9_to_17(),
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    assert_eq!(slots.len(), 15);
    assert!(slots.iter().all(|s| s.start != at(1, 10, 0)));
    assert!(slots.iter().any(|s| s.start == at(1, 9, 30)));
    assert!(slots.iter().any(|s| s.start == at(1, 10, 30)));
}

#[test]
fn slot_starting_exactly_at_now_is_dropped() {
    // now == working start: the day is kept but the first window is not
    // strictly in the future.
    let now = at(1, 9, 0);
    let slots = generate_available_slots(
        at(1, 0, 0),
        at(2, 0, 0),
        &[],
        30,
        &hours_9_to_17(),
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    assert_eq!(slots.len(), 15);
    assert_eq!(slots[0].start, at(1, 9, 30));
}

#[test]
fn started_workday_skips_to_the_next_day() {
    let now = at(1, 12, 0);
    let slots = generate_available_slots(
        at(1, 0, 0),
        at(3, 0, 0),
        &[],
        30,
        &hours_9_to_17(),
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    assert_eq!(slots.len(), 16);
    assert!(slots.iter().all(|s| s.start >= at(2, 9, 0)));
}

#[test]
fn afternoon_request_still_offers_the_last_horizon_day() {
    // A request at midday skips the started first day; the final day of
    // the range must still be offered in full, its working start being
    // before the range end.
    let now = at(1, 12, 0);
    let range_end = at(15, 12, 0);
    let slots = generate_available_slots(
        now,
        range_end,
        &[],
        30,
        &hours_9_to_17(),
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    // Sep 15 is a Tuesday; its whole working day is on offer.
    assert!(slots.iter().any(|s| s.start == at(15, 9, 0)));
    assert_eq!(slots.last().map(|s| s.start), Some(at(15, 16, 30)));
}

#[test]
fn excluded_weekdays_yield_no_slots() {
    // Friday the 4th and Saturday the 5th only.
    let now = at(3, 6, 0);
    let slots = generate_available_slots(
        at(4, 0, 0),
        at(6, 0, 0),
        &[],
        30,
        &hours_9_to_17(),
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    assert!(slots.is_empty());
}

#[test]
fn overflowing_last_window_is_dropped() {
    // 480 working minutes, 50-minute meetings: nine windows fit, the tenth
    // would cross 17:00.
    let now = at(1, 6, 0);
    let slots = generate_available_slots(
        at(1, 0, 0),
        at(2, 0, 0),
        &[],
        50,
        &hours_9_to_17(),
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    assert_eq!(slots.len(), 9);
    assert_eq!(slots[8].start, at(1, 15, 40));
    assert_eq!(slots[8].end, at(1, 16, 30));
}

#[test]
fn inverted_working_hours_yield_no_slots() {
    let now = at(1, 6, 0);
    let slots = generate_available_slots(
        at(1, 0, 0),
        at(2, 0, 0),
        &[],
        30,
        &WorkingHours { start: 17, end: 9 },
        &DEFAULT_EXCLUDED_WEEKDAYS,
        now,
        TZ,
        DEFAULT_LOCALE,
    );
    assert!(slots.is_empty());
}

#[test]
fn generation_is_deterministic() {
    let now = at(1, 6, 0);
    let busy = [BusyInterval {
        start: at(2, 11, 0),
        end: at(2, 12, 15),
    }];
    let run = || {
        generate_available_slots(
            at(1, 0, 0),
            at(8, 0, 0),
            &busy,
            45,
            &hours_9_to_17(),
            &DEFAULT_EXCLUDED_WEEKDAYS,
            now,
            TZ,
            DEFAULT_LOCALE,
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn display_shows_local_times_after_the_pipe() {
    let display = format_slot_display(at(1, 9, 0), at(1, 9, 30), TZ, DEFAULT_LOCALE);
    let (date_part, time_part) = display.split_once(" | ").unwrap();
    assert!(date_part.contains("2026"));
    assert_eq!(time_part, "09:00 - 09:30");
}
