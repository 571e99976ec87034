#[cfg(test)]
mod tests {
    use crate::conflict::{validate, BookingDecision, RejectReason};
    use crate::models::{
        Appointment, AppointmentStatus, TimeWindow, WorkingHours, WorkingSchedule,
    };
    use crate::time::resolve_time_zone;
    use chrono::{NaiveTime, TimeZone, Utc, Weekday};
    use chrono_tz::Tz;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn utc() -> Tz {
        resolve_time_zone("UTC").unwrap()
    }

    fn nine_to_six(professional_id: Uuid) -> WorkingSchedule {
        let hours = WorkingHours::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            None,
            None,
        )
        .unwrap();
        let mut map = HashMap::new();
        map.insert(Weekday::Mon, hours);
        WorkingSchedule::new(professional_id, map)
    }

    fn monday(h: u32, m: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, h, m, 0).unwrap()
    }

    fn booked(professional_id: Uuid, start_h: u32, end_h: u32) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            professional_id,
            service_id: Uuid::new_v4(),
            window: TimeWindow::new(monday(start_h, 0), monday(end_h, 0)).unwrap(),
            status: AppointmentStatus::Scheduled,
            notes: None,
        }
    }

    fn reason_of(decision: BookingDecision) -> RejectReason {
        match decision {
            BookingDecision::Reject(r) => r.reason,
            BookingDecision::Accept => panic!("expected a rejection"),
        }
    }

    #[test]
    fn test_inverted_window_is_invalid() {
        let professional = Uuid::new_v4();
        let schedule = nine_to_six(professional);
        let decision = validate(monday(11, 0), monday(10, 0), &schedule, &[], utc());
        assert_eq!(reason_of(decision), RejectReason::InvalidWindow);
        let decision = validate(monday(11, 0), monday(11, 0), &schedule, &[], utc());
        assert_eq!(reason_of(decision), RejectReason::InvalidWindow);
    }

    #[test]
    fn test_outside_working_hours() {
        let professional = Uuid::new_v4();
        let schedule = nine_to_six(professional);
        // Before opening
        let decision = validate(monday(8, 0), monday(9, 0), &schedule, &[], utc());
        assert_eq!(reason_of(decision), RejectReason::OutsideWorkingHours);
        // Tuesday is not in the schedule at all
        let tue_start = Utc.with_ymd_and_hms(2025, 5, 6, 10, 0, 0).unwrap();
        let tue_end = Utc.with_ymd_and_hms(2025, 5, 6, 11, 0, 0).unwrap();
        let decision = validate(tue_start, tue_end, &schedule, &[], utc());
        assert_eq!(reason_of(decision), RejectReason::OutsideWorkingHours);
    }

    #[test]
    fn test_overlap_names_the_conflicting_appointment() {
        let professional = Uuid::new_v4();
        let schedule = nine_to_six(professional);
        let existing = booked(professional, 11, 12);
        let existing_id = existing.id;
        let decision = validate(monday(10, 0), monday(11, 1), &schedule, &[existing], utc());
        match decision {
            BookingDecision::Reject(rejection) => {
                assert_eq!(rejection.reason, RejectReason::AlreadyBooked);
                assert_eq!(rejection.conflict_with, Some(existing_id));
            }
            BookingDecision::Accept => panic!("expected a conflict"),
        }
    }

    #[test]
    fn test_touching_boundary_is_accepted() {
        let professional = Uuid::new_v4();
        let schedule = nine_to_six(professional);
        let existing = booked(professional, 11, 12);
        let decision = validate(monday(10, 0), monday(11, 0), &schedule, &[existing], utc());
        assert_eq!(decision, BookingDecision::Accept);
    }

    #[test]
    fn test_cancelled_appointments_do_not_conflict() {
        let professional = Uuid::new_v4();
        let schedule = nine_to_six(professional);
        let mut existing = booked(professional, 10, 11);
        existing.status = AppointmentStatus::Cancelled;
        let decision = validate(monday(10, 0), monday(11, 0), &schedule, &[existing], utc());
        assert_eq!(decision, BookingDecision::Accept);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // A window that is both inverted and out of hours reports the
        // window problem, the first rule in order.
        let professional = Uuid::new_v4();
        let schedule = nine_to_six(professional);
        let decision = validate(monday(8, 0), monday(7, 0), &schedule, &[], utc());
        assert_eq!(reason_of(decision), RejectReason::InvalidWindow);
    }
}
