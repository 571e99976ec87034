#[cfg(test)]
mod tests {
    use crate::availability::compute_slots;
    use crate::models::{
        Appointment, AppointmentStatus, ServiceDefinition, TimeWindow, WorkingHours,
        WorkingSchedule,
    };
    use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
    use chrono_tz::Tz;
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};
    use uuid::Uuid;

    // Monday, far from any DST edge in the zones we test with.
    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn schedule(professional_id: Uuid, start_hour: u32, end_hour: u32) -> WorkingSchedule {
        let hours = WorkingHours::new(
            NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
            None,
            None,
        )
        .unwrap();
        let mut map = HashMap::new();
        map.insert(Weekday::Mon, hours);
        WorkingSchedule::new(professional_id, map)
    }

    fn service(duration_minutes: i64, professional_id: Uuid) -> ServiceDefinition {
        ServiceDefinition::new(
            Uuid::new_v4(),
            "Haircut".to_string(),
            duration_minutes,
            4500,
            HashSet::from([professional_id]),
        )
        .unwrap()
    }

    fn busy_appointments(
        professional_id: Uuid,
        start_hours: &[u32],
        duration_minutes: i64,
    ) -> Vec<Appointment> {
        start_hours
            .iter()
            .map(|&h| {
                let start = Utc.with_ymd_and_hms(2025, 5, 5, h, 0, 0).unwrap();
                Appointment {
                    id: Uuid::new_v4(),
                    business_id: Uuid::new_v4(),
                    customer_id: Uuid::new_v4(),
                    professional_id,
                    service_id: Uuid::new_v4(),
                    window: TimeWindow::new(start, start + Duration::minutes(duration_minutes))
                        .unwrap(),
                    status: AppointmentStatus::Confirmed,
                    notes: None,
                }
            })
            .collect()
    }

    proptest! {
        // Every slot stays inside working hours and has the service length.
        #[test]
        fn test_slots_fit_working_hours_and_duration(
            work_start_hour in 0..12u32,
            work_end_hour in 13..23u32,
            duration_minutes in 15..121i64,
            interval_minutes in 5..61i64,
        ) {
            let tz = Tz::UTC;
            let professional = Uuid::new_v4();
            let svc = service(duration_minutes, professional);
            let slots = compute_slots(
                &schedule(professional, work_start_hour, work_end_hour),
                day(),
                &svc,
                &[],
                Duration::minutes(interval_minutes),
                tz,
            ).unwrap();

            for slot in &slots {
                prop_assert_eq!(slot.duration(), Duration::minutes(duration_minutes));
                let start_time = slot.start().time();
                let end_time = slot.end().time();
                prop_assert!(
                    start_time >= NaiveTime::from_hms_opt(work_start_hour, 0, 0).unwrap(),
                    "slot starts before opening: {:?}", start_time
                );
                prop_assert!(
                    end_time <= NaiveTime::from_hms_opt(work_end_hour, 0, 0).unwrap(),
                    "slot ends after closing: {:?}", end_time
                );
            }
        }

        // Every slot start sits on the grid anchored at the working-hours start.
        #[test]
        fn test_slots_are_grid_aligned_and_ascending(
            work_start_hour in 6..12u32,
            duration_minutes in 15..91i64,
            interval_minutes in 5..61i64,
        ) {
            let tz = Tz::UTC;
            let professional = Uuid::new_v4();
            let svc = service(duration_minutes, professional);
            let slots = compute_slots(
                &schedule(professional, work_start_hour, 20),
                day(),
                &svc,
                &[],
                Duration::minutes(interval_minutes),
                tz,
            ).unwrap();

            let anchor = i64::from(work_start_hour) * 60;
            for slot in &slots {
                let t = slot.start().time();
                let minutes = i64::from(t.hour()) * 60 + i64::from(t.minute());
                prop_assert_eq!((minutes - anchor) % interval_minutes, 0,
                    "slot start off the grid: {:?}", t);
            }
            for pair in slots.windows(2) {
                prop_assert!(pair[0].start() < pair[1].start());
            }
        }

        // No advertised slot ever overlaps a live booking.
        #[test]
        fn test_slots_never_overlap_busy_periods(
            duration_minutes in 15..91i64,
            interval_minutes in 15..61i64,
            busy_hours in proptest::collection::vec(9..17u32, 0..4),
            busy_duration_minutes in 30..121i64,
        ) {
            let tz = Tz::UTC;
            let professional = Uuid::new_v4();
            let svc = service(duration_minutes, professional);
            let busy = busy_appointments(professional, &busy_hours, busy_duration_minutes);
            let slots = compute_slots(
                &schedule(professional, 8, 20),
                day(),
                &svc,
                &busy,
                Duration::minutes(interval_minutes),
                tz,
            ).unwrap();

            for slot in &slots {
                for appointment in &busy {
                    prop_assert!(
                        !slot.overlaps(&appointment.window),
                        "slot {:?} overlaps booking {:?}",
                        slot, appointment.window
                    );
                }
            }
        }
    }
}
