// --- File: crates/salonbook_scheduling/src/models.rs ---
use crate::error::SchedulingError;
use chrono::{DateTime, Duration, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A half-open interval of absolute UTC instants.
///
/// Always `start < end`; constructed only through [`TimeWindow::new`] and
/// immutable afterwards. Never stores naive/local time — conversion to the
/// business's wall clock happens at the point of comparison (see
/// [`crate::time`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Returns `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap check: windows that merely touch at a boundary do
    /// not overlap, so a 10:00–11:00 and an 11:00–12:00 booking are
    /// compatible.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One weekday's bookable hours, optionally split by a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
}

impl WorkingHours {
    /// Validates `start < break_start < break_end < end`. A break is either
    /// fully present or fully absent.
    pub fn new(
        start: NaiveTime,
        end: NaiveTime,
        break_start: Option<NaiveTime>,
        break_end: Option<NaiveTime>,
    ) -> Result<Self, SchedulingError> {
        if start >= end {
            return Err(SchedulingError::InvalidWorkingHours(format!(
                "start {start} must be before end {end}"
            )));
        }
        match (break_start, break_end) {
            (None, None) => {}
            (Some(bs), Some(be)) => {
                if !(start < bs && bs < be && be < end) {
                    return Err(SchedulingError::InvalidWorkingHours(format!(
                        "break {bs}-{be} must lie strictly inside {start}-{end}"
                    )));
                }
            }
            _ => {
                return Err(SchedulingError::InvalidWorkingHours(
                    "break_start and break_end must be given together".into(),
                ));
            }
        }
        Ok(Self {
            start,
            end,
            break_start,
            break_end,
        })
    }
}

/// Per-professional weekly schedule. A weekday absent from the map means the
/// professional does not work that day.
#[derive(Debug, Clone)]
pub struct WorkingSchedule {
    pub professional_id: Uuid,
    hours: HashMap<Weekday, WorkingHours>,
}

impl WorkingSchedule {
    pub fn new(professional_id: Uuid, hours: HashMap<Weekday, WorkingHours>) -> Self {
        Self {
            professional_id,
            hours,
        }
    }

    pub fn for_day(&self, day: Weekday) -> Option<&WorkingHours> {
        self.hours.get(&day)
    }
}

/// Immutable catalog entry owned by the business-catalog collaborator;
/// read-only to the scheduling core.
#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i64,
    /// Price in the smallest currency unit (e.g. cents).
    pub price: i64,
    pub eligible_professionals: HashSet<Uuid>,
}

impl ServiceDefinition {
    pub fn new(
        id: Uuid,
        name: String,
        duration_minutes: i64,
        price: i64,
        eligible_professionals: HashSet<Uuid>,
    ) -> Result<Self, SchedulingError> {
        if duration_minutes <= 0 {
            return Err(SchedulingError::InvalidService(format!(
                "duration_minutes must be positive, got {duration_minutes}"
            )));
        }
        if price < 0 {
            return Err(SchedulingError::InvalidService(format!(
                "price must not be negative, got {price}"
            )));
        }
        Ok(Self {
            id,
            name,
            duration_minutes,
            price,
            eligible_professionals,
        })
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// One professional, one customer, one service. Appointments are never
/// deleted, only marked cancelled; `status` is mutated exclusively by
/// [`crate::lifecycle`].
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Appointment {
    pub id: Uuid,
    pub business_id: Uuid,
    pub customer_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub window: TimeWindow,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Business-configured booking constraints. Owned and mutated by the
/// business-settings collaborator; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingPolicy {
    pub min_notice_hours: i64,
    pub max_advance_days: i64,
    pub allow_reschedule: bool,
    pub reschedule_limit_hours: i64,
    pub allow_cancellation: bool,
    pub cancellation_limit_hours: i64,
    pub require_confirmation: bool,
    pub confirmation_deadline_hours: i64,
}
