// --- File: crates/salonbook_scheduling/src/availability.rs ---
//! Availability Calculator: the bookable slots of one professional on one
//! calendar day.

use crate::error::SchedulingError;
use crate::models::{Appointment, AppointmentStatus, ServiceDefinition, TimeWindow, WorkingSchedule};
use crate::time::local_to_utc;
use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

/// Computes the ordered set of bookable slots for `schedule`'s professional
/// on `day`, each exactly the service duration long.
///
/// Candidate starts are generated only at `interval`-aligned boundaries
/// relative to the working-hours start — never at arbitrary appointment end
/// times — so callers always see a predictable, evenly spaced grid. A
/// candidate survives iff the full duration fits before closing, does not
/// intersect the configured break, and does not overlap any non-cancelled
/// appointment. An empty result is a normal outcome, not an error.
pub fn compute_slots(
    schedule: &WorkingSchedule,
    day: NaiveDate,
    service: &ServiceDefinition,
    existing: &[Appointment],
    interval: Duration,
    tz: Tz,
) -> Result<Vec<TimeWindow>, SchedulingError> {
    if interval <= Duration::zero() {
        return Err(SchedulingError::InvalidSchedulingInterval(
            interval.num_minutes(),
        ));
    }
    let Some(hours) = schedule.for_day(day.weekday()) else {
        debug!(
            professional = %schedule.professional_id,
            %day,
            "professional does not work this weekday"
        );
        return Ok(Vec::new());
    };

    let duration = service.duration();
    let busy: Vec<TimeWindow> = existing
        .iter()
        .filter(|a| {
            a.professional_id == schedule.professional_id
                && a.status != AppointmentStatus::Cancelled
        })
        .map(|a| a.window)
        .collect();

    debug!(
        professional = %schedule.professional_id,
        %day,
        service = %service.id,
        busy_count = busy.len(),
        "computing available slots"
    );

    let mut slots = Vec::new();
    let mut start_of_slot = hours.start;
    loop {
        let (end_of_slot, wrapped) = start_of_slot.overflowing_add_signed(duration);
        if wrapped != 0 || end_of_slot > hours.end {
            break;
        }

        let blocked_by_break = matches!(
            (hours.break_start, hours.break_end),
            (Some(bs), Some(be)) if start_of_slot < be && bs < end_of_slot
        );
        if !blocked_by_break {
            let start_utc = local_to_utc(tz, day.and_time(start_of_slot))?;
            // Slots are exactly `duration` of absolute time, so the end is
            // derived from the UTC instant rather than re-projected locally.
            if let Some(window) = TimeWindow::new(start_utc, start_utc + duration) {
                if !busy.iter().any(|b| window.overlaps(b)) {
                    slots.push(window);
                }
            }
        }

        let (next, wrapped) = start_of_slot.overflowing_add_signed(interval);
        if wrapped != 0 || next >= hours.end {
            break;
        }
        start_of_slot = next;
    }

    Ok(slots)
}
