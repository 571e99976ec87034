// --- File: crates/salonbook_scheduling/src/conflict.rs ---
//! Conflict Validator: decides accept/reject for a proposed window against a
//! professional's working hours and existing appointments.

use crate::models::{Appointment, AppointmentStatus, TimeWindow, WorkingSchedule};
use crate::time::is_within;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Stable reason codes shared by all callers (UI, chatbot, online widget).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    InvalidWindow,
    OutsideWorkingHours,
    AlreadyBooked,
    MinimumNotice,
    MaximumAdvance,
    UnavailableSlot,
    InvalidService,
    InvalidProfessional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Rejection {
    pub reason: RejectReason,
    pub detail: String,
    /// Set for [`RejectReason::AlreadyBooked`]: the appointment the proposal
    /// collides with.
    pub conflict_with: Option<Uuid>,
}

impl Rejection {
    pub fn new(reason: RejectReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
            conflict_with: None,
        }
    }

    pub fn with_conflict(mut self, id: Uuid) -> Self {
        self.conflict_with = Some(id);
        self
    }
}

/// Outcome of a booking validation. Rejections are expected, frequent
/// results the caller branches on — not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingDecision {
    Accept,
    Reject(Rejection),
}

impl BookingDecision {
    pub fn reject(reason: RejectReason, detail: impl Into<String>) -> Self {
        Self::Reject(Rejection::new(reason, detail))
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Validates a proposed window against the professional's schedule and
/// existing appointments.
///
/// Rules are checked in order and the first failure determines the reason:
/// window well-formedness, working-hours containment, then overlap with any
/// non-cancelled appointment. Cancelled appointments are excluded from the
/// conflict set entirely — a cancelled slot is freely rebookable.
pub fn validate(
    proposed_start: DateTime<Utc>,
    proposed_end: DateTime<Utc>,
    schedule: &WorkingSchedule,
    existing: &[Appointment],
    tz: Tz,
) -> BookingDecision {
    let Some(window) = TimeWindow::new(proposed_start, proposed_end) else {
        return BookingDecision::reject(
            RejectReason::InvalidWindow,
            format!("window start {proposed_start} is not before end {proposed_end}"),
        );
    };

    let day = window.start().with_timezone(&tz).weekday();
    let within = schedule
        .for_day(day)
        .map(|hours| is_within(&window, hours, day, tz))
        .unwrap_or(false);
    if !within {
        return BookingDecision::reject(
            RejectReason::OutsideWorkingHours,
            format!("window is outside working hours on {day}"),
        );
    }

    for appointment in existing {
        if appointment.status == AppointmentStatus::Cancelled {
            continue;
        }
        if window.overlaps(&appointment.window) {
            return BookingDecision::Reject(
                Rejection::new(
                    RejectReason::AlreadyBooked,
                    format!("window overlaps appointment {}", appointment.id),
                )
                .with_conflict(appointment.id),
            );
        }
    }

    BookingDecision::Accept
}
