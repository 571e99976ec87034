// --- File: crates/salonbook_booking/src/handlers.rs ---
use crate::catalog::Catalog;
use crate::notify::{emit_in_background, DynNotificationSink};
use crate::service::{AppointmentRepository, RepositoryError};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use salonbook_common::error::HttpStatusCode;
use salonbook_config::AppConfig;
use salonbook_scheduling::availability::compute_slots;
use salonbook_scheduling::conflict::{BookingDecision, RejectReason, Rejection};
use salonbook_scheduling::error::SchedulingError;
use salonbook_scheduling::lifecycle::{create_appointment, transition, LifecycleEventKind};
use salonbook_scheduling::models::{Appointment, AppointmentStatus, TimeWindow};
use salonbook_scheduling::policy::{evaluate_booking, BookingRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

// Shared state for all booking handlers
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub repository: Arc<dyn AppointmentRepository>,
    pub notifier: DynNotificationSink,
}

/// Errors surfaced by transition and lookup handlers.
#[derive(Error, Debug)]
pub enum BookingApiError {
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl HttpStatusCode for BookingApiError {
    fn status_code(&self) -> u16 {
        match self {
            BookingApiError::Scheduling(SchedulingError::InvalidTransition { .. }) => 409,
            BookingApiError::Scheduling(SchedulingError::ModificationWindowClosed { .. }) => 422,
            BookingApiError::Scheduling(_) => 500,
            BookingApiError::Repository(RepositoryError::NotFound(_)) => 404,
            BookingApiError::Repository(RepositoryError::Storage(_)) => 500,
        }
    }
}

fn into_response_error(err: BookingApiError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
pub struct AvailabilityQuery {
    /// Day to query, YYYY-MM-DD in the business time zone.
    pub date: String,
    pub service_id: Uuid,
    pub professional_id: Uuid,
}

/// One bookable slot, RFC3339 in the business time zone.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailableSlot {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailableSlotsResponse {
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    /// Price in the smallest currency unit.
    pub price: i64,
    pub slots: Vec<AvailableSlot>,
}

/// Handler to get bookable slots for one professional, service and day.
#[axum::debug_handler]
pub async fn get_availability_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, (StatusCode, String)> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)".to_string(),
        )
    })?;

    let service = state.catalog.service(query.service_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Unknown service {}", query.service_id),
        )
    })?;
    let schedule = state
        .catalog
        .schedule(query.professional_id)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Unknown professional {}", query.professional_id),
            )
        })?;
    if !service
        .eligible_professionals
        .contains(&query.professional_id)
    {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "Professional {} does not offer service {}",
                query.professional_id, query.service_id
            ),
        ));
    }

    // Fetch with a day of slack on both sides; a local day never maps to
    // more than +-14h of UTC offset.
    let anchor = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
    let existing = state
        .repository
        .appointments_between(
            query.professional_id,
            anchor - Duration::days(1),
            anchor + Duration::days(2),
        )
        .await
        .map_err(|e| into_response_error(e.into()))?;

    let tz = state.catalog.time_zone;
    let slots = compute_slots(schedule, date, service, &existing, state.catalog.interval, tz)
        .map_err(|e| into_response_error(e.into()))?
        .into_iter()
        .map(|w| AvailableSlot {
            start: w.start().with_timezone(&tz).to_rfc3339(),
            end: w.end().with_timezone(&tz).to_rfc3339(),
        })
        .collect();

    Ok(Json(AvailableSlotsResponse {
        professional_id: query.professional_id,
        service_id: query.service_id,
        date,
        duration_minutes: service.duration_minutes,
        price: service.price,
        slots,
    }))
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookAppointmentRequest {
    pub customer_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    /// Slot start as returned by the availability endpoint.
    pub start_time: chrono::DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub appointment: Option<Appointment>,
    pub rejection: Option<Rejection>,
}

fn rejection_status(reason: RejectReason) -> StatusCode {
    match reason {
        RejectReason::AlreadyBooked => StatusCode::CONFLICT,
        RejectReason::InvalidWindow
        | RejectReason::InvalidService
        | RejectReason::InvalidProfessional => StatusCode::BAD_REQUEST,
        RejectReason::OutsideWorkingHours
        | RejectReason::MinimumNotice
        | RejectReason::MaximumAdvance
        | RejectReason::UnavailableSlot => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn rejected(rejection: Rejection) -> (StatusCode, Json<BookingResponse>) {
    let status = rejection_status(rejection.reason);
    (
        status,
        Json(BookingResponse {
            success: false,
            appointment: None,
            rejection: Some(rejection),
        }),
    )
}

/// Handler to book one appointment.
///
/// Validation and insertion happen inside the repository's critical section,
/// so a slot can never be double-booked by concurrent requests.
#[axum::debug_handler]
pub async fn book_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), (StatusCode, String)> {
    let Some(service) = state.catalog.service(request.service_id).cloned() else {
        return Ok(rejected(Rejection::new(
            RejectReason::InvalidService,
            format!("unknown service {}", request.service_id),
        )));
    };
    let Some(schedule) = state.catalog.schedule(request.professional_id).cloned() else {
        return Ok(rejected(Rejection::new(
            RejectReason::InvalidProfessional,
            format!("unknown professional {}", request.professional_id),
        )));
    };

    let start = request.start_time;
    let end = start + service.duration();
    let Some(window) = TimeWindow::new(start, end) else {
        return Ok(rejected(Rejection::new(
            RejectReason::InvalidWindow,
            format!("window start {start} is not before end {end}"),
        )));
    };

    let now = Utc::now();
    let (appointment, event) = create_appointment(
        state.catalog.business_id,
        request.customer_id,
        request.professional_id,
        request.service_id,
        window,
        request.notes.clone(),
        &state.catalog.policy,
        now,
    );

    let professional_id = request.professional_id;
    let policy = state.catalog.policy.clone();
    let interval = state.catalog.interval;
    let time_zone = state.catalog.time_zone;
    let decision = state
        .repository
        .insert_checked(
            appointment.clone(),
            Box::new(move |all| {
                let mine: Vec<Appointment> = all
                    .iter()
                    .filter(|a| a.professional_id == professional_id)
                    .cloned()
                    .collect();
                evaluate_booking(
                    &BookingRequest {
                        proposed_start: start,
                        proposed_end: end,
                        professional_id,
                        service: Some(&service),
                        schedule: Some(&schedule),
                        existing: &mine,
                        policy: &policy,
                        interval,
                        now,
                    },
                    time_zone,
                )
            }),
        )
        .await
        .map_err(|e| into_response_error(e.into()))?;

    match decision {
        BookingDecision::Accept => {
            info!(
                appointment = %appointment.id,
                professional = %professional_id,
                start = %start,
                "appointment booked"
            );
            emit_in_background(
                state.notifier.clone(),
                "appointment.created",
                json!({ "event": event, "appointment": appointment }),
            );
            Ok((
                StatusCode::CREATED,
                Json(BookingResponse {
                    success: true,
                    appointment: Some(appointment),
                    rejection: None,
                }),
            ))
        }
        BookingDecision::Reject(rejection) => {
            info!(reason = ?rejection.reason, "booking rejected");
            Ok(rejected(rejection))
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TransitionResponse {
    pub success: bool,
    pub appointment: Appointment,
}

async fn apply_transition(
    state: &BookingState,
    id: Uuid,
    target: AppointmentStatus,
) -> Result<Json<TransitionResponse>, (StatusCode, String)> {
    let appointment = state
        .repository
        .get(id)
        .await
        .map_err(|e| into_response_error(e.into()))?;

    let (updated, event) = transition(&appointment, target, &state.catalog.policy, Utc::now())
        .map_err(|e| into_response_error(e.into()))?;

    let stored = state
        .repository
        .apply(updated)
        .await
        .map_err(|e| into_response_error(e.into()))?;

    let topic = match event.kind {
        LifecycleEventKind::Created => "appointment.created",
        LifecycleEventKind::Confirmed => "appointment.confirmed",
        LifecycleEventKind::Completed => "appointment.completed",
        LifecycleEventKind::Cancelled => "appointment.cancelled",
    };
    emit_in_background(
        state.notifier.clone(),
        topic,
        json!({ "event": event, "appointment": stored }),
    );

    Ok(Json(TransitionResponse {
        success: true,
        appointment: stored,
    }))
}

/// Handler to confirm a scheduled appointment.
#[axum::debug_handler]
pub async fn confirm_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransitionResponse>, (StatusCode, String)> {
    apply_transition(&state, id, AppointmentStatus::Confirmed).await
}

/// Handler to mark an appointment completed.
#[axum::debug_handler]
pub async fn complete_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransitionResponse>, (StatusCode, String)> {
    apply_transition(&state, id, AppointmentStatus::Completed).await
}

/// Handler to cancel an appointment, subject to the cancellation window.
#[axum::debug_handler]
pub async fn cancel_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransitionResponse>, (StatusCode, String)> {
    apply_transition(&state, id, AppointmentStatus::Cancelled).await
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
pub struct AppointmentListQuery {
    /// Inclusive, YYYY-MM-DD.
    pub start_date: String,
    /// Inclusive, YYYY-MM-DD.
    pub end_date: String,
    #[serde(default)]
    pub include_cancelled: bool,
    #[serde(default)]
    pub professional_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
}

/// Handler to list appointments for the back office.
#[axum::debug_handler]
pub async fn list_appointments_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<AppointmentListResponse>, (StatusCode, String)> {
    let start = NaiveDate::parse_from_str(&query.start_date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid start_date format (YYYY-MM-DD)".to_string(),
        )
    })?;
    let end = NaiveDate::parse_from_str(&query.end_date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid end_date format (YYYY-MM-DD)".to_string(),
        )
    })?;
    if end < start {
        return Err((
            StatusCode::BAD_REQUEST,
            "end_date must not be before start_date".to_string(),
        ));
    }

    // Fetch with a day of slack on both sides, then keep only appointments
    // whose start falls on a requested business-local date.
    let from = Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap()) - Duration::days(1);
    let to = Utc.from_utc_datetime(&end.and_hms_opt(0, 0, 0).unwrap()) + Duration::days(2);

    let mut appointments = state
        .repository
        .list(from, to, query.include_cancelled)
        .await
        .map_err(|e| into_response_error(e.into()))?;
    let tz = state.catalog.time_zone;
    appointments.retain(|a| {
        let local_date = a.window.start().with_timezone(&tz).date_naive();
        local_date >= start && local_date <= end
    });
    if let Some(professional_id) = query.professional_id {
        appointments.retain(|a| a.professional_id == professional_id);
    }

    Ok(Json(AppointmentListResponse { appointments }))
}
