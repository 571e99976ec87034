// --- File: crates/salonbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{config_error, HttpStatusCode, SalonbookError};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export service abstractions for easier access
pub use services::{BoxFuture, BoxedError, NotificationResult, NotificationSink};
