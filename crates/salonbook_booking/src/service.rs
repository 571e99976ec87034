// --- File: crates/salonbook_booking/src/service.rs ---
//! Appointment storage abstraction.
//!
//! The repository owns the one critical section in the system: a booking is
//! validated and inserted in a single [`AppointmentRepository::insert_checked`]
//! call, so two requests racing for the same slot serialize on the store and
//! exactly one wins. Handlers never re-check after the fact.

use chrono::{DateTime, Utc};
use salonbook_common::services::BoxFuture;
use salonbook_scheduling::conflict::BookingDecision;
use salonbook_scheduling::models::{Appointment, AppointmentStatus};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("appointment not found: {0}")]
    NotFound(Uuid),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Conflict check run inside the repository's critical section. Receives
/// every stored appointment; filtering (professional, status) is the
/// closure's business.
pub type ConflictCheck<'a> = Box<dyn Fn(&[Appointment]) -> BookingDecision + Send + Sync + 'a>;

pub trait AppointmentRepository: Send + Sync {
    /// Appointments for one professional whose window overlaps `[from, to)`.
    fn appointments_between(
        &self,
        professional_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<Appointment>, RepositoryError>;

    fn get(&self, id: Uuid) -> BoxFuture<'_, Appointment, RepositoryError>;

    /// Validate-and-insert as one atomic step.
    ///
    /// Runs `check` against the current contents and inserts `appointment`
    /// only on [`BookingDecision::Accept`]. The decision is returned either
    /// way. No other write may interleave between the check and the insert.
    fn insert_checked<'a>(
        &'a self,
        appointment: Appointment,
        check: ConflictCheck<'a>,
    ) -> BoxFuture<'a, BookingDecision, RepositoryError>;

    /// Replaces a stored appointment after a lifecycle transition.
    fn apply(&self, appointment: Appointment) -> BoxFuture<'_, Appointment, RepositoryError>;

    /// All appointments overlapping `[from, to)`, for the admin listing.
    fn list(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Appointment>, RepositoryError>;
}

/// Mutex-guarded map. The single lock is what makes `insert_checked` a
/// compare-and-commit.
#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    appointments: Mutex<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_start(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by_key(|a| a.window.start());
    appointments
}

impl AppointmentRepository for InMemoryAppointmentRepository {
    fn appointments_between(
        &self,
        professional_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<Appointment>, RepositoryError> {
        Box::pin(async move {
            let guard = self.appointments.lock().await;
            let matching = guard
                .values()
                .filter(|a| {
                    a.professional_id == professional_id
                        && a.window.start() < to
                        && from < a.window.end()
                })
                .cloned()
                .collect();
            Ok(sorted_by_start(matching))
        })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, Appointment, RepositoryError> {
        Box::pin(async move {
            let guard = self.appointments.lock().await;
            guard.get(&id).cloned().ok_or(RepositoryError::NotFound(id))
        })
    }

    fn insert_checked<'a>(
        &'a self,
        appointment: Appointment,
        check: ConflictCheck<'a>,
    ) -> BoxFuture<'a, BookingDecision, RepositoryError> {
        Box::pin(async move {
            let mut guard = self.appointments.lock().await;
            let current = sorted_by_start(guard.values().cloned().collect());
            let decision = check(&current);
            if decision.is_accept() {
                debug!(appointment = %appointment.id, "booking committed");
                guard.insert(appointment.id, appointment);
            }
            Ok(decision)
        })
    }

    fn apply(&self, appointment: Appointment) -> BoxFuture<'_, Appointment, RepositoryError> {
        Box::pin(async move {
            let mut guard = self.appointments.lock().await;
            if !guard.contains_key(&appointment.id) {
                return Err(RepositoryError::NotFound(appointment.id));
            }
            guard.insert(appointment.id, appointment.clone());
            Ok(appointment)
        })
    }

    fn list(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_cancelled: bool,
    ) -> BoxFuture<'_, Vec<Appointment>, RepositoryError> {
        Box::pin(async move {
            let guard = self.appointments.lock().await;
            let matching = guard
                .values()
                .filter(|a| a.window.start() < to && from < a.window.end())
                .filter(|a| include_cancelled || a.status != AppointmentStatus::Cancelled)
                .cloned()
                .collect();
            Ok(sorted_by_start(matching))
        })
    }
}
