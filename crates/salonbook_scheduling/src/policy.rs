// --- File: crates/salonbook_scheduling/src/policy.rs ---
//! Booking Policy Engine: business-configurable constraints layered on top of
//! the raw conflict check, plus the reschedule/cancellation window question.

use crate::conflict::{self, BookingDecision, RejectReason};
use crate::models::{
    Appointment, BookingPolicy, ServiceDefinition, TimeWindow, WorkingSchedule,
};
use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;
use uuid::Uuid;

/// Applies notice/advance policy, then delegates to the Conflict Validator.
/// Conflict rejections pass through unchanged.
pub fn validate_booking(
    proposed_start: DateTime<Utc>,
    proposed_end: DateTime<Utc>,
    schedule: &WorkingSchedule,
    existing: &[Appointment],
    policy: &BookingPolicy,
    now: DateTime<Utc>,
    tz: Tz,
) -> BookingDecision {
    let lead_time = proposed_start - now;
    if lead_time < Duration::hours(policy.min_notice_hours) {
        return BookingDecision::reject(
            RejectReason::MinimumNotice,
            format!(
                "bookings require at least {} hours notice",
                policy.min_notice_hours
            ),
        );
    }
    if lead_time > Duration::days(policy.max_advance_days) {
        return BookingDecision::reject(
            RejectReason::MaximumAdvance,
            format!(
                "bookings may be made at most {} days in advance",
                policy.max_advance_days
            ),
        );
    }

    conflict::validate(proposed_start, proposed_end, schedule, existing, tz)
}

/// Everything needed to evaluate one booking request. Lookups (service,
/// schedule, existing appointments) are performed by the caller; the core
/// itself does no I/O.
pub struct BookingRequest<'a> {
    pub proposed_start: DateTime<Utc>,
    pub proposed_end: DateTime<Utc>,
    pub professional_id: Uuid,
    /// `None` when the requested service id did not resolve.
    pub service: Option<&'a ServiceDefinition>,
    /// `None` when the requested professional id did not resolve.
    pub schedule: Option<&'a WorkingSchedule>,
    pub existing: &'a [Appointment],
    pub policy: &'a BookingPolicy,
    /// The business's configured scheduling interval (slot granularity).
    pub interval: Duration,
    pub now: DateTime<Utc>,
}

/// Full booking evaluation: input resolution, slot shape, policy, conflict.
///
/// Beyond [`validate_booking`], this rejects unresolved service/professional
/// ids and proposals that are not one of the advertised slots — wrong length
/// for the service, or a start not aligned to the scheduling-interval grid
/// measured from that day's working-hours start.
pub fn evaluate_booking(request: &BookingRequest<'_>, tz: Tz) -> BookingDecision {
    let Some(window) = TimeWindow::new(request.proposed_start, request.proposed_end) else {
        return BookingDecision::reject(
            RejectReason::InvalidWindow,
            format!(
                "window start {} is not before end {}",
                request.proposed_start, request.proposed_end
            ),
        );
    };

    let Some(service) = request.service else {
        return BookingDecision::reject(RejectReason::InvalidService, "unknown service");
    };
    let Some(schedule) = request.schedule else {
        return BookingDecision::reject(
            RejectReason::InvalidProfessional,
            "unknown professional",
        );
    };
    if !service
        .eligible_professionals
        .contains(&request.professional_id)
    {
        return BookingDecision::reject(
            RejectReason::InvalidProfessional,
            format!(
                "professional {} does not offer service {}",
                request.professional_id, service.id
            ),
        );
    }

    if let BookingDecision::Reject(rejection) = check_slot_shape(&window, service, schedule, request.interval, tz) {
        return BookingDecision::Reject(rejection);
    }

    debug!(
        professional = %request.professional_id,
        service = %service.id,
        start = %window.start(),
        "evaluating booking request"
    );
    validate_booking(
        window.start(),
        window.end(),
        schedule,
        request.existing,
        request.policy,
        request.now,
        tz,
    )
}

/// The proposed window must be one of the slots the Availability Calculator
/// would advertise: exactly the service duration, starting on the
/// interval-aligned grid. Days without working hours are left to the conflict
/// validator, which reports them as outside working hours.
fn check_slot_shape(
    window: &TimeWindow,
    service: &ServiceDefinition,
    schedule: &WorkingSchedule,
    interval: Duration,
    tz: Tz,
) -> BookingDecision {
    if window.duration() != service.duration() {
        return BookingDecision::reject(
            RejectReason::UnavailableSlot,
            format!(
                "window is {} minutes but service {} takes {}",
                window.duration().num_minutes(),
                service.id,
                service.duration_minutes
            ),
        );
    }

    let local_start = window.start().with_timezone(&tz);
    if let Some(hours) = schedule.for_day(local_start.weekday()) {
        // Compare in seconds so a sub-minute offset does not slip through.
        let offset = local_start.time() - hours.start;
        let interval_seconds = interval.num_seconds();
        if interval_seconds > 0
            && (offset < Duration::zero() || offset.num_seconds() % interval_seconds != 0)
        {
            return BookingDecision::reject(
                RejectReason::UnavailableSlot,
                format!(
                    "start {} is not aligned to the {} minute booking grid",
                    local_start.time(),
                    interval.num_minutes()
                ),
            );
        }
    }
    BookingDecision::Accept
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationAction {
    Reschedule,
    Cancel,
}

impl ModificationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reschedule => "reschedule",
            Self::Cancel => "cancel",
        }
    }
}

/// Answers the policy question "may this appointment still be rescheduled or
/// cancelled?". Returns `false` — never an error — when outside policy, so
/// the caller can present a user-facing message. The modification itself is
/// performed (or refused) by the caller.
pub fn can_modify(
    appointment: &Appointment,
    policy: &BookingPolicy,
    now: DateTime<Utc>,
    action: ModificationAction,
) -> bool {
    if appointment.status.is_terminal() {
        return false;
    }
    let remaining = appointment.window.start() - now;
    match action {
        ModificationAction::Reschedule => {
            policy.allow_reschedule && remaining >= Duration::hours(policy.reschedule_limit_hours)
        }
        ModificationAction::Cancel => {
            policy.allow_cancellation
                && remaining >= Duration::hours(policy.cancellation_limit_hours)
        }
    }
}
