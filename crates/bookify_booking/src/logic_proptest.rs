// --- File: crates/bookify_booking/src/logic_proptest.rs ---
use crate::logic::{
    generate_available_slots, BusyInterval, DEFAULT_EXCLUDED_WEEKDAYS, DEFAULT_LOCALE,
};
use bookify_common::models::WorkingHours;
use chrono::{Datelike, Duration, NaiveTime, TimeZone, Utc};
use proptest::prelude::*;

proptest! {
    #[test]
    fn generated_slots_respect_every_constraint(
        duration in 15i64..=120,
        start_hour in 6u32..=12,
        end_hour in 13u32..=20,
        busy_specs in proptest::collection::vec((0i64..14 * 24 * 60, 15i64..=180), 0..20),
    ) {
        let tz = chrono_tz::Asia::Jerusalem;
        let now = tz
            .with_ymd_and_hms(2026, 9, 1, 6, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let range_end = now + Duration::days(14);
        let busy: Vec<BusyInterval> = busy_specs
            .iter()
            .map(|(offset, len)| BusyInterval {
                start: now + Duration::minutes(*offset),
                end: now + Duration::minutes(offset + len),
            })
            .collect();
        let hours = WorkingHours { start: start_hour, end: end_hour };

        let slots = generate_available_slots(
            now, range_end, &busy, duration, &hours,
            &DEFAULT_EXCLUDED_WEEKDAYS, now, tz, DEFAULT_LOCALE,
        );

        let work_start = NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap();
        let work_end = NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap();
        for slot in &slots {
            prop_assert_eq!(slot.end - slot.start, Duration::minutes(duration));
            prop_assert!(slot.start > now);

            let local_start = slot.start.with_timezone(&tz);
            let local_end = slot.end.with_timezone(&tz);
            prop_assert!(!DEFAULT_EXCLUDED_WEEKDAYS.contains(&local_start.weekday()));
            prop_assert!(local_start.time() >= work_start);
            prop_assert!(local_end.time() <= work_end);
            prop_assert_eq!(local_start.date_naive(), local_end.date_naive());

            let window = BusyInterval { start: slot.start, end: slot.end };
            for interval in &busy {
                prop_assert!(!window.overlaps(interval));
            }
        }

        for pair in slots.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }

        let again = generate_available_slots(
            now, range_end, &busy, duration, &hours,
            &DEFAULT_EXCLUDED_WEEKDAYS, now, tz, DEFAULT_LOCALE,
        );
        prop_assert_eq!(&slots, &again);
    }
}
