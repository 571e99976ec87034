// --- File: crates/salonbook_common/src/services.rs ---
//! Service abstractions shared across the application.
//!
//! These traits decouple the booking logic from concrete implementations of
//! its collaborators, allowing for dependency injection and easier testing.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Outcome of a notification delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    pub delivered: bool,
    pub detail: Option<String>,
}

/// A trait for downstream notification consumers.
///
/// Lifecycle events (created, confirmed, completed, cancelled) are published
/// to a sink for reminder scheduling and back-office reconciliation. Delivery
/// is fire-and-forget from the caller's point of view; a failed emission must
/// never fail the booking operation that produced it.
pub trait NotificationSink: Send + Sync {
    /// Error type returned by the sink.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Publish one event payload under a topic such as `appointment.created`.
    fn emit(
        &self,
        topic: &str,
        payload: serde_json::Value,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}
