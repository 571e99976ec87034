// --- File: crates/salonbook_booking/src/notify.rs ---
//! Lifecycle event publication.
//!
//! Events feed reminder scheduling and back-office reconciliation downstream.
//! Emission is fire-and-forget: a failed delivery is logged and never fails
//! the booking operation that produced the event.

use salonbook_common::services::{BoxFuture, BoxedError, NotificationResult, NotificationSink};
use std::sync::Arc;
use tracing::{info, warn};

pub type DynNotificationSink = Arc<dyn NotificationSink<Error = BoxedError>>;

/// Default sink: writes each event to the structured log.
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    type Error = BoxedError;

    fn emit(
        &self,
        topic: &str,
        payload: serde_json::Value,
    ) -> BoxFuture<'_, NotificationResult, BoxedError> {
        let topic = topic.to_string();
        Box::pin(async move {
            info!(topic = %topic, payload = %payload, "lifecycle event");
            Ok(NotificationResult {
                delivered: true,
                detail: None,
            })
        })
    }
}

/// Publish in the background and log failures.
pub fn emit_in_background(sink: DynNotificationSink, topic: &'static str, payload: serde_json::Value) {
    tokio::spawn(async move {
        match sink.emit(topic, payload).await {
            Ok(result) if !result.delivered => {
                warn!(topic, detail = ?result.detail, "notification not delivered");
            }
            Ok(_) => {}
            Err(e) => warn!(topic, error = %e, "notification emission failed"),
        }
    });
}
