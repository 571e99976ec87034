// --- File: crates/salonbook_booking/src/routes.rs ---

use crate::catalog::Catalog;
use crate::handlers::{
    book_appointment_handler, cancel_appointment_handler, complete_appointment_handler,
    confirm_appointment_handler, get_availability_handler, list_appointments_handler,
    BookingState,
};
use crate::notify::TracingNotificationSink;
use crate::service::InMemoryAppointmentRepository;
use axum::{
    routing::{get, patch, post},
    Router,
};
use salonbook_common::error::SalonbookError;
use salonbook_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all booking routes, wiring the default
/// collaborators (in-memory store, tracing notification sink).
pub fn routes(config: Arc<AppConfig>) -> Result<Router, SalonbookError> {
    let catalog = Arc::new(Catalog::from_config(&config)?);
    let state = Arc::new(BookingState {
        config,
        catalog,
        repository: Arc::new(InMemoryAppointmentRepository::new()),
        notifier: Arc::new(TracingNotificationSink),
    });
    Ok(routes_with_state(state))
}

/// Router over an explicit state, for tests and alternative wiring.
pub fn routes_with_state(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/book", post(book_appointment_handler))
        .route(
            "/appointments/{id}/confirm",
            patch(confirm_appointment_handler),
        )
        .route(
            "/appointments/{id}/complete",
            patch(complete_appointment_handler),
        )
        .route(
            "/appointments/{id}/cancel",
            patch(cancel_appointment_handler),
        )
        .route("/admin/appointments", get(list_appointments_handler))
        .with_state(state)
}
