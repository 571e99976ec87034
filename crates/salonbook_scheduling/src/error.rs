// --- File: crates/salonbook_scheduling/src/error.rs ---
use crate::models::AppointmentStatus;
use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the scheduling core.
///
/// Policy rejections are NOT represented here; those are ordinary
/// `BookingDecision::Reject` values the caller branches on. This enum covers
/// configuration defects and lifecycle violations, both of which abort the
/// operation loudly.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Unknown or invalid IANA time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Local time {0} does not exist in time zone {1} (DST gap)")]
    UnrepresentableLocalTime(NaiveDateTime, String),

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Invalid service definition: {0}")]
    InvalidService(String),

    #[error("Scheduling interval must be positive, got {0} minutes")]
    InvalidSchedulingInterval(i64),

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("{action} window closed by policy for appointment {id}")]
    ModificationWindowClosed { id: Uuid, action: &'static str },
}
