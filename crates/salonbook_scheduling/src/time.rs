// --- File: crates/salonbook_scheduling/src/time.rs ---
//! TimeWindow utilities: interval overlap, timezone normalization, and
//! working-hours containment.
//!
//! All timestamps crossing the crate boundary are absolute UTC instants.
//! Conversion to a business's wall clock uses its configured IANA time zone;
//! the executing process's local time zone is never consulted.

use crate::error::SchedulingError;
use crate::models::{TimeWindow, WorkingHours};
use chrono::{DateTime, Datelike, LocalResult, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use std::str::FromStr;

/// Resolves a configured IANA time zone name.
///
/// An unrecognized identifier is a setup defect and fails fast, rather than
/// silently falling back to some default zone.
pub fn resolve_time_zone(name: &str) -> Result<Tz, SchedulingError> {
    Tz::from_str(name).map_err(|_| SchedulingError::InvalidTimeZone(name.to_string()))
}

/// Converts a business-local wall-clock time to a UTC instant.
///
/// During a DST fold the earlier of the two instants is chosen; a wall-clock
/// time inside a spring-forward gap does not exist and is reported as an
/// error.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, SchedulingError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) => Ok(t.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(SchedulingError::UnrepresentableLocalTime(
            local,
            tz.name().to_string(),
        )),
    }
}

/// Symmetric half-open overlap check. See [`TimeWindow::overlaps`].
pub fn overlaps(a: &TimeWindow, b: &TimeWindow) -> bool {
    a.overlaps(b)
}

/// True iff the window's wall-clock projection in `tz` falls on `day`,
/// entirely inside `[hours.start, hours.end]`, entirely outside the break
/// when one is configured, and does not span midnight into another weekday.
pub fn is_within(window: &TimeWindow, hours: &WorkingHours, day: Weekday, tz: Tz) -> bool {
    let local_start = window.start().with_timezone(&tz);
    let local_end = window.end().with_timezone(&tz);

    if local_start.weekday() != day {
        return false;
    }
    // Working hours never cross midnight, so neither may a contained window.
    if local_end.date_naive() != local_start.date_naive() {
        return false;
    }

    let start_t = local_start.time();
    let end_t = local_end.time();
    if start_t < hours.start || end_t > hours.end {
        return false;
    }
    if let (Some(break_start), Some(break_end)) = (hours.break_start, hours.break_end) {
        if start_t < break_end && break_start < end_t {
            return false;
        }
    }
    true
}
