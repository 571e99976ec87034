// --- File: crates/salonbook_scheduling/src/lifecycle.rs ---
//! Appointment Lifecycle: the status state machine and the events each
//! transition emits.
//!
//! `scheduled -> confirmed -> completed`, with cancellation permitted from
//! `scheduled` and `confirmed`. `completed` and `cancelled` are terminal. No
//! other component sets `status` directly.

use crate::error::SchedulingError;
use crate::models::{Appointment, AppointmentStatus, BookingPolicy, TimeWindow};
use crate::policy::{can_modify, ModificationAction};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum LifecycleEventKind {
    Created,
    Confirmed,
    Completed,
    Cancelled,
}

/// Emitted after a successful creation or transition, for the notification
/// collaborator (reminders, financial reconciliation, commissions). Emission
/// is fire-and-forget at the caller; the core only produces the value.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LifecycleEvent {
    pub appointment_id: Uuid,
    pub kind: LifecycleEventKind,
    pub occurred_at: DateTime<Utc>,
}

/// Creates a new appointment after a successful policy/conflict validation.
///
/// Entry status is `scheduled`, or `confirmed` directly when the policy does
/// not require confirmation.
#[allow(clippy::too_many_arguments)]
pub fn create_appointment(
    business_id: Uuid,
    customer_id: Uuid,
    professional_id: Uuid,
    service_id: Uuid,
    window: TimeWindow,
    notes: Option<String>,
    policy: &BookingPolicy,
    now: DateTime<Utc>,
) -> (Appointment, LifecycleEvent) {
    let status = if policy.require_confirmation {
        AppointmentStatus::Scheduled
    } else {
        AppointmentStatus::Confirmed
    };
    let appointment = Appointment {
        id: Uuid::new_v4(),
        business_id,
        customer_id,
        professional_id,
        service_id,
        window,
        status,
        notes,
    };
    let event = LifecycleEvent {
        appointment_id: appointment.id,
        kind: LifecycleEventKind::Created,
        occurred_at: now,
    };
    debug!(appointment = %appointment.id, ?status, "appointment created");
    (appointment, event)
}

fn transition_allowed(
    from: AppointmentStatus,
    to: AppointmentStatus,
    policy: &BookingPolicy,
) -> bool {
    use AppointmentStatus::*;
    match (from, to) {
        (Scheduled, Confirmed) => true,
        (Scheduled, Cancelled) => true,
        // Direct completion only when the booking never needed confirmation.
        (Scheduled, Completed) => !policy.require_confirmation,
        (Confirmed, Completed) => true,
        (Confirmed, Cancelled) => true,
        _ => false,
    }
}

/// Applies a status transition, returning the updated appointment and the
/// event to emit.
///
/// Invalid transitions fail with [`SchedulingError::InvalidTransition`] and
/// never mutate state. Cancellation additionally re-checks the policy window
/// ([`can_modify`]); a cancel attempt outside the window fails with
/// [`SchedulingError::ModificationWindowClosed`] rather than trusting every
/// caller to have asked first.
pub fn transition(
    appointment: &Appointment,
    target: AppointmentStatus,
    policy: &BookingPolicy,
    now: DateTime<Utc>,
) -> Result<(Appointment, LifecycleEvent), SchedulingError> {
    if target == appointment.status || !transition_allowed(appointment.status, target, policy) {
        return Err(SchedulingError::InvalidTransition {
            from: appointment.status,
            to: target,
        });
    }

    if target == AppointmentStatus::Cancelled
        && !can_modify(appointment, policy, now, ModificationAction::Cancel)
    {
        return Err(SchedulingError::ModificationWindowClosed {
            id: appointment.id,
            action: ModificationAction::Cancel.as_str(),
        });
    }

    let mut updated = appointment.clone();
    updated.status = target;
    let kind = match target {
        AppointmentStatus::Confirmed => LifecycleEventKind::Confirmed,
        AppointmentStatus::Completed => LifecycleEventKind::Completed,
        AppointmentStatus::Cancelled => LifecycleEventKind::Cancelled,
        // Unreachable: nothing transitions back into `scheduled`.
        AppointmentStatus::Scheduled => LifecycleEventKind::Created,
    };
    debug!(
        appointment = %appointment.id,
        from = ?appointment.status,
        to = ?target,
        "status transition applied"
    );
    Ok((
        updated,
        LifecycleEvent {
            appointment_id: appointment.id,
            kind,
            occurred_at: now,
        },
    ))
}
