// --- File: crates/salonbook_booking/src/doc.rs ---

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    AppointmentListQuery, AppointmentListResponse, AvailabilityQuery, AvailableSlot,
    AvailableSlotsResponse, BookAppointmentRequest, BookingResponse, TransitionResponse,
};
use salonbook_scheduling::conflict::{RejectReason, Rejection};
use salonbook_scheduling::lifecycle::{LifecycleEvent, LifecycleEventKind};
use salonbook_scheduling::models::{Appointment, AppointmentStatus, TimeWindow};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Bookable slots for the day", body = AvailableSlotsResponse),
        (status = 400, description = "Invalid date or ineligible professional", body = String),
        (status = 404, description = "Unknown service or professional", body = String)
    )
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/book",
    request_body(content = BookAppointmentRequest, example = json!({
        "customer_id": "0e9f3fb4-3a95-4f3e-b7a1-2a9a4d3c1d11",
        "professional_id": "08b32cd8-5a85-4a77-8b19-5ba0f2d7f2da",
        "service_id": "6d1b1b8e-0b0a-4a86-9f2e-6f4fbc4f2f10",
        "start_time": "2025-05-15T10:00:00Z",
        "notes": "First visit"
    })),
    responses(
        (status = 201, description = "Appointment created", body = BookingResponse),
        (status = 400, description = "Unknown service/professional or malformed window", body = BookingResponse),
        (status = 409, description = "Slot already booked", body = BookingResponse,
         example = json!({
             "success": false,
             "appointment": null,
             "rejection": {
                 "reason": "ALREADY_BOOKED",
                 "detail": "overlaps an existing appointment",
                 "conflict_with": "b2f6c1de-4e0a-44e2-9d70-1c3f5a8e9b21"
             }
         })
        ),
        (status = 422, description = "Rejected by booking policy or slot grid", body = BookingResponse)
    )
)]
fn doc_book_appointment_handler() {}

#[utoipa::path(
    patch,
    path = "/appointments/{id}/confirm",
    params(("id" = Uuid, Path, description = "The appointment to confirm")),
    responses(
        (status = 200, description = "Appointment confirmed", body = TransitionResponse),
        (status = 404, description = "Unknown appointment", body = String),
        (status = 409, description = "Transition not allowed from the current status", body = String)
    )
)]
fn doc_confirm_appointment_handler() {}

#[utoipa::path(
    patch,
    path = "/appointments/{id}/complete",
    params(("id" = Uuid, Path, description = "The appointment to mark completed")),
    responses(
        (status = 200, description = "Appointment completed", body = TransitionResponse),
        (status = 404, description = "Unknown appointment", body = String),
        (status = 409, description = "Transition not allowed from the current status", body = String)
    )
)]
fn doc_complete_appointment_handler() {}

#[utoipa::path(
    patch,
    path = "/appointments/{id}/cancel",
    params(("id" = Uuid, Path, description = "The appointment to cancel")),
    responses(
        (status = 200, description = "Appointment cancelled", body = TransitionResponse),
        (status = 404, description = "Unknown appointment", body = String),
        (status = 409, description = "Transition not allowed from the current status", body = String),
        (status = 422, description = "Cancellation window closed", body = String)
    )
)]
fn doc_cancel_appointment_handler() {}

#[utoipa::path(
    get,
    path = "/admin/appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Appointments in the date range", body = AppointmentListResponse),
        (status = 400, description = "Invalid date range", body = String)
    )
)]
fn doc_list_appointments_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability_handler,
        doc_book_appointment_handler,
        doc_confirm_appointment_handler,
        doc_complete_appointment_handler,
        doc_cancel_appointment_handler,
        doc_list_appointments_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            AvailableSlot,
            AvailableSlotsResponse,
            BookAppointmentRequest,
            BookingResponse,
            TransitionResponse,
            AppointmentListQuery,
            AppointmentListResponse,
            Appointment,
            AppointmentStatus,
            TimeWindow,
            Rejection,
            RejectReason,
            LifecycleEvent,
            LifecycleEventKind
        )
    ),
    tags(
        (name = "booking", description = "Appointment booking API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
