#[cfg(test)]
mod tests {
    use crate::lifecycle::{create_appointment, transition, LifecycleEventKind};
    use crate::models::{AppointmentStatus, BookingPolicy, TimeWindow};
    use crate::SchedulingError;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn policy(require_confirmation: bool) -> BookingPolicy {
        BookingPolicy {
            min_notice_hours: 24,
            max_advance_days: 30,
            allow_reschedule: true,
            reschedule_limit_hours: 24,
            allow_cancellation: true,
            cancellation_limit_hours: 24,
            require_confirmation,
            confirmation_deadline_hours: 48,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    fn window_days_out(days: i64) -> TimeWindow {
        let start = now() + Duration::days(days);
        TimeWindow::new(start, start + Duration::hours(1)).unwrap()
    }

    fn fresh(policy: &BookingPolicy) -> crate::models::Appointment {
        create_appointment(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            window_days_out(7),
            None,
            policy,
            now(),
        )
        .0
    }

    #[test]
    fn test_create_status_depends_on_confirmation_policy() {
        let (appt, event) = create_appointment(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            window_days_out(7),
            Some("first visit".to_string()),
            &policy(true),
            now(),
        );
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(event.kind, LifecycleEventKind::Created);
        assert_eq!(event.appointment_id, appt.id);

        let (appt, _) = create_appointment(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            window_days_out(7),
            None,
            &policy(false),
            now(),
        );
        assert_eq!(appt.status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn test_happy_path_scheduled_confirmed_completed() {
        let p = policy(true);
        let appt = fresh(&p);

        let (confirmed, event) = transition(&appt, AppointmentStatus::Confirmed, &p, now()).unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
        assert_eq!(event.kind, LifecycleEventKind::Confirmed);
        // The input is untouched
        assert_eq!(appt.status, AppointmentStatus::Scheduled);

        let (completed, event) =
            transition(&confirmed, AppointmentStatus::Completed, &p, now()).unwrap();
        assert_eq!(completed.status, AppointmentStatus::Completed);
        assert_eq!(event.kind, LifecycleEventKind::Completed);
    }

    #[test]
    fn test_direct_completion_gated_by_confirmation_requirement() {
        let strict = policy(true);
        let appt = fresh(&strict);
        let err = transition(&appt, AppointmentStatus::Completed, &strict, now()).unwrap_err();
        assert!(matches!(
            err,
            SchedulingError::InvalidTransition {
                from: AppointmentStatus::Scheduled,
                to: AppointmentStatus::Completed,
            }
        ));

        // Without the confirmation step, scheduled -> completed is legal.
        let relaxed = policy(false);
        let mut appt = fresh(&relaxed);
        appt.status = AppointmentStatus::Scheduled;
        let (done, _) = transition(&appt, AppointmentStatus::Completed, &relaxed, now()).unwrap();
        assert_eq!(done.status, AppointmentStatus::Completed);
    }

    #[test]
    fn test_terminal_states_admit_no_transitions() {
        let p = policy(true);
        let mut appt = fresh(&p);
        appt.status = AppointmentStatus::Completed;
        for target in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
        ] {
            assert!(transition(&appt, target, &p, now()).is_err());
        }

        appt.status = AppointmentStatus::Cancelled;
        for target in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
        ] {
            assert!(transition(&appt, target, &p, now()).is_err());
        }
    }

    #[test]
    fn test_same_status_transition_is_rejected() {
        let p = policy(true);
        let appt = fresh(&p);
        let err = transition(&appt, AppointmentStatus::Scheduled, &p, now()).unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidTransition { .. }));
    }

    #[test]
    fn test_cancellation_respects_the_policy_window() {
        let p = policy(true);
        let appt = fresh(&p); // starts 7 days out

        let (cancelled, event) =
            transition(&appt, AppointmentStatus::Cancelled, &p, now()).unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(event.kind, LifecycleEventKind::Cancelled);

        // Ten hours before the start, inside the 24 hour cutoff
        let late = appt.window.start() - Duration::hours(10);
        let err = transition(&appt, AppointmentStatus::Cancelled, &p, late).unwrap_err();
        assert!(matches!(
            err,
            SchedulingError::ModificationWindowClosed { action: "cancel", .. }
        ));
    }
}
